mod health_check;
mod send_emails;

pub use health_check::*;
pub use send_emails::*;
