use newsletter_provider::config::get_configuration;
use newsletter_provider::startup::Application;
use newsletter_provider::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber(String::from("newsletter_provider"), String::from("info"));

    init_subscriber(subscriber);

    let config = get_configuration().expect("Missing configuration file.");
    let application = Application::build(config)
        .await
        .expect("Failed to build application.");

    tracing::info!("Server listening on port {}", application.get_port());

    application.run_until_stop().await
}
