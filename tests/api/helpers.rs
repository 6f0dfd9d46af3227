use std::sync::LazyLock;

use machine_monk_notifier::{
    configuration::get_configuration,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};
use wiremock::{MockServer, ResponseTemplate};

// Ensure that the `tracing` stack is only initialised once using `LazyLock`
static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // `TEST_LOG=true cargo test` to see the logs
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub internal_recipient: String,
    pub api_client: reqwest::Client,
}

/// A request body as captured by the mock provider.
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub reply_to: Option<String>,
}

impl TestApp {
    pub async fn post_send_emails(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/send-emails", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw_send_emails(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/send-emails", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn sent_emails(&self) -> Vec<SentEmail> {
        self.email_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|request| {
                let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
                SentEmail {
                    to: body["to"][0].as_str().unwrap().to_owned(),
                    subject: body["subject"].as_str().unwrap().to_owned(),
                    html: body["html"].as_str().unwrap().to_owned(),
                    reply_to: body["reply_to"].as_str().map(str::to_owned),
                }
            })
            .collect()
    }
}

pub fn provider_accepts() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "email-123" }))
}

pub async fn spawn_app() -> TestApp {
    LazyLock::force(&TRACING);

    // Stands in for the email provider's API
    let email_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // Use a random OS port
        c.application.port = 0;
        c.email_client.base_url = email_server.uri();
        c
    };

    let internal_recipient = configuration.notification.internal_recipient.clone();
    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());
    tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        email_server,
        internal_recipient,
        api_client: reqwest::Client::new(),
    }
}
