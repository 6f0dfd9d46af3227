//! HTML bodies and subjects for the two emails sent per submission.
//!
//! Every user-supplied value goes through the template engine's HTML escaping.

use anyhow::Context;
use chrono::{DateTime, Utc};
use rinja_axum::Template;

use crate::domain::{CallBooking, Service, Submission};

pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

struct BookingDetails<'a> {
    date: String,
    service: &'a str,
    phone: &'a str,
    address: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "emails/user_confirmation.html")]
struct UserConfirmationTemplate<'a> {
    name: &'a str,
    booking: Option<BookingDetails<'a>>,
    message: &'a str,
    website_url: &'a str,
}

#[derive(Template)]
#[template(path = "emails/staff_notification.html")]
struct StaffNotificationTemplate<'a> {
    heading: &'a str,
    banner: &'a str,
    request_noun: &'a str,
    received_at: String,
    name: &'a str,
    email: &'a str,
    phone: Option<&'a str>,
    address: Option<&'a str>,
    date: Option<String>,
    service: Option<&'a str>,
    message: &'a str,
}

impl<'a> From<&'a CallBooking> for BookingDetails<'a> {
    fn from(booking: &'a CallBooking) -> Self {
        Self {
            date: booking
                .date
                .map(|date| date.formatted())
                .unwrap_or_else(|| "To be confirmed".to_string()),
            service: booking
                .service
                .as_ref()
                .map_or(Service::FALLBACK_LABEL, Service::label),
            phone: booking.phone.as_deref().unwrap_or("Not provided"),
            address: booking.address.as_deref(),
        }
    }
}

/// The thank-you email addressed to whoever filled in the form.
pub fn user_confirmation(
    submission: &Submission,
    website_url: &str,
) -> anyhow::Result<RenderedEmail> {
    let (subject, booking) = match submission {
        Submission::BookCall(booking) => (
            "Thank you for booking a call with The Machine Monk!",
            Some(BookingDetails::from(booking)),
        ),
        Submission::Contact(_) => ("Thank you for contacting The Machine Monk!", None),
    };
    let html = UserConfirmationTemplate {
        name: submission.name().as_ref(),
        booking,
        message: submission.message().as_ref(),
        website_url,
    }
    .render()
    .context("Failed to render the confirmation email")?;

    Ok(RenderedEmail {
        subject: subject.to_string(),
        html,
    })
}

/// The heads-up sent to the internal mailbox.
pub fn staff_notification(
    submission: &Submission,
    received_at: DateTime<Utc>,
) -> anyhow::Result<RenderedEmail> {
    let name = submission.name().as_ref();
    let template = match submission {
        Submission::BookCall(booking) => StaffNotificationTemplate {
            heading: "Call Booking",
            banner: "Call Booking",
            request_noun: "call booking request",
            received_at: format_received_at(received_at),
            name,
            email: booking.email.as_ref(),
            phone: booking.phone.as_deref(),
            address: booking.address.as_deref(),
            date: booking.date.map(|date| date.formatted()),
            service: booking.service.as_ref().map(Service::label),
            message: booking.message.as_ref(),
        },
        Submission::Contact(contact) => StaffNotificationTemplate {
            heading: "Contact Form",
            banner: "Contact",
            request_noun: "inquiry",
            received_at: format_received_at(received_at),
            name,
            email: contact.email.as_ref(),
            phone: None,
            address: None,
            date: None,
            service: None,
            message: contact.message.as_ref(),
        },
    };
    let subject = match submission {
        Submission::BookCall(_) => format!("New Call Booking from {}", name),
        Submission::Contact(_) => format!("New Contact Form Submission from {}", name),
    };
    let html = template
        .render()
        .context("Failed to render the staff notification email")?;

    Ok(RenderedEmail { subject, html })
}

fn format_received_at(received_at: DateTime<Utc>) -> String {
    received_at.format("%B %-d, %Y at %H:%M UTC").to_string()
}
