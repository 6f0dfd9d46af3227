use serde::Deserialize;

use super::{CallDate, EmailAddress, MessageBody, Service, SubmitterName};

/// Body posted by the website forms.
///
/// Fields are optional on the wire so that a missing field is reported by
/// [`Submission::try_from`] with a readable message.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "formData", rename_all = "kebab-case")]
pub enum SubmissionRequest {
    BookCall(BookCallForm),
    Contact(ContactForm),
}

#[derive(Debug, Default, Deserialize)]
pub struct BookCallForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum Submission {
    BookCall(CallBooking),
    Contact(ContactMessage),
}

#[derive(Debug)]
pub struct CallBooking {
    pub name: SubmitterName,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date: Option<CallDate>,
    pub service: Option<Service>,
    pub message: MessageBody,
}

#[derive(Debug)]
pub struct ContactMessage {
    pub name: SubmitterName,
    pub email: EmailAddress,
    pub message: MessageBody,
}

impl Submission {
    pub fn kind(&self) -> &'static str {
        match self {
            Submission::BookCall(_) => "book-call",
            Submission::Contact(_) => "contact",
        }
    }

    pub fn name(&self) -> &SubmitterName {
        match self {
            Submission::BookCall(booking) => &booking.name,
            Submission::Contact(contact) => &contact.name,
        }
    }

    pub fn email(&self) -> &EmailAddress {
        match self {
            Submission::BookCall(booking) => &booking.email,
            Submission::Contact(contact) => &contact.email,
        }
    }

    pub fn message(&self) -> &MessageBody {
        match self {
            Submission::BookCall(booking) => &booking.message,
            Submission::Contact(contact) => &contact.message,
        }
    }
}

impl TryFrom<SubmissionRequest> for Submission {
    type Error = String;

    fn try_from(value: SubmissionRequest) -> Result<Self, Self::Error> {
        match value {
            SubmissionRequest::BookCall(form) => form.try_into().map(Submission::BookCall),
            SubmissionRequest::Contact(form) => form.try_into().map(Submission::Contact),
        }
    }
}

impl TryFrom<BookCallForm> for CallBooking {
    type Error = String;

    fn try_from(value: BookCallForm) -> Result<Self, Self::Error> {
        let name = SubmitterName::parse(required(value.name, "name")?)?;
        let email = EmailAddress::parse(required(value.email, "email")?)?;
        let message = MessageBody::parse(required(value.message, "message")?)?;
        let date = not_blank(value.date)
            .map(|date| CallDate::parse(&date))
            .transpose()?;
        let service = not_blank(value.service).map(|service| Service::parse(&service));
        Ok(Self {
            name,
            email,
            phone: not_blank(value.phone),
            address: not_blank(value.address),
            date,
            service,
            message,
        })
    }
}

impl TryFrom<ContactForm> for ContactMessage {
    type Error = String;

    fn try_from(value: ContactForm) -> Result<Self, Self::Error> {
        let name = SubmitterName::parse(required(value.name, "name")?)?;
        let email = EmailAddress::parse(required(value.email, "email")?)?;
        let message = MessageBody::parse(required(value.message, "message")?)?;
        Ok(Self {
            name,
            email,
            message,
        })
    }
}

fn required(field: Option<String>, field_name: &str) -> Result<String, String> {
    field.ok_or_else(|| format!("missing field `{}` in formData.", field_name))
}

fn not_blank(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}
