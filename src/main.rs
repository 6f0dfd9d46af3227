use machine_monk_notifier::{
    configuration::get_configuration,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber(
        "machine-monk-notifier".into(),
        "info".into(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let configuration = get_configuration()?;

    let application = Application::build(configuration).await?;
    tracing::info!(port = application.port(), "Notification dispatcher listening");

    application.run_until_stopped().await
}
