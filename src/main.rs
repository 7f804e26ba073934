use bakery_orders::{configuration::Settings, startup::Application, telemetry::{get_subscriber, init_subscriber}, utils::run_migrations};

#[actix_web::main]
async fn main() -> anyhow::Result<()>{
    let subscriber = get_subscriber("bakery_orders".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = Settings::get()?;

    let application = Application::new(config)?;
    run_migrations(&application.pool)?;

    tracing::info!("Listening on {}:{}", application.host, application.port);
    application.server.await?;
    Ok(())
}
