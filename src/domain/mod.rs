mod call_date;
mod email_address;
mod message_body;
mod service;
mod submission;
mod submitter_name;

pub use call_date::CallDate;
pub use email_address::EmailAddress;
pub use message_body::MessageBody;
pub use service::Service;
pub use submission::{
    BookCallForm, CallBooking, ContactForm, ContactMessage, Submission, SubmissionRequest,
};
pub use submitter_name::SubmitterName;
