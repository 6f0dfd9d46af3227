use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::EmailAddress;

/// Client for the transactional email provider's REST API.
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: EmailAddress,
    sender_name: String,
    authorization_token: SecretString,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

/// Shape of the provider's error payloads, e.g. `{"statusCode":422,"message":"..."}`.
#[derive(Deserialize)]
struct ProviderErrorBody {
    message: String,
}

#[derive(thiserror::Error, Debug)]
pub enum SendEmailError {
    #[error("provider rejected the message with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("provider request failed, {0}")]
    Transport(#[source] reqwest::Error),
}

impl From<reqwest::Error> for SendEmailError {
    // the provider url is internal and must not end up in responses
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.without_url())
    }
}

/// What the provider hands back for an accepted message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendReceipt {
    pub id: String,
}

impl EmailClient {
    pub fn new(
        sender: EmailAddress,
        sender_name: String,
        base_url: String,
        authorization_token: SecretString,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            sender,
            sender_name,
            authorization_token,
        })
    }

    #[tracing::instrument(
        name = "Sending an email through the provider",
        skip(self, html_content, reply_to),
        fields(recipient = %recipient)
    )]
    pub async fn send_email(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        html_content: &str,
        reply_to: Option<&EmailAddress>,
    ) -> Result<SendReceipt, SendEmailError> {
        let url = format!("{}/emails", self.base_url);
        let request_body = SendEmailRequest {
            from: format!("{} <{}>", self.sender_name, self.sender.as_ref()),
            to: [recipient.as_ref()],
            subject,
            html: html_content,
            reply_to: reply_to.map(AsRef::as_ref),
        };
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&request_body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        let receipt = response.json::<SendReceipt>().await?;
        tracing::info!(email_id = %receipt.id, "Email accepted by the provider");
        Ok(receipt)
    }
}

async fn rejection(response: Response) -> SendEmailError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ProviderErrorBody>(&body) {
        Ok(error) => error.message,
        Err(_) if !body.trim().is_empty() => body.trim().to_owned(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_owned(),
    };
    SendEmailError::Rejected {
        status: status.as_u16(),
        message,
    }
}
