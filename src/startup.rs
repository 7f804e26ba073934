use std::net::TcpListener;

use actix_web::{dev::Server, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::{
    auth::Tokenizer,
    configuration::Settings,
    error::ShopError,
    routes::{
        cancel_customer_order, get_customer_profile, get_order, get_order_receipt, get_orders, get_products,
        health_check, login, post_customer_profile, post_feedback, post_order, validate_promotion_code,
    },
    utils::{build_pool, DbPool},
};

pub struct Application{
    pub host: String,
    pub port: u16,
    pub pool: DbPool,
    pub server: Server
}

impl Application {
    // Binds the listener straight away so that port 0 resolves to the real port
    pub fn new(settings: Settings) -> Result<Self, anyhow::Error>{
        let pool = build_pool(
            &settings.database.get_database_table_url(),
            settings.database.max_connections
        )?;
        let tokenizer = Tokenizer::new(&settings.jwt);

        let listener = TcpListener::bind((settings.application.host.as_str(), settings.application.port))?;
        let port = listener.local_addr()?.port();

        let server = run(listener, pool.clone(), tokenizer)?;

        Ok(Application{
            host: settings.application.host,
            port,
            pool,
            server
        })
    }
}

pub fn run(listener: TcpListener, pool: DbPool, tokenizer: Tokenizer) -> Result<Server, anyhow::Error>{
    let pool = web::Data::new(pool);
    let tokenizer = web::Data::new(tokenizer);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .configure(configure_routes)
            .app_data(pool.clone())
            .app_data(tokenizer.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        .app_data(json_config())
        .app_data(query_config())
        .app_data(form_config())
        .app_data(path_config())
        .route("/health", web::get().to(health_check))
        .route("/login", web::post().to(login))
        .route("/products", web::get().to(get_products))
        .service(
            web::scope("/customer")
                .route("/promotions/validate", web::get().to(validate_promotion_code))
                .route("/orders", web::post().to(post_order))
                .route("/orders", web::get().to(get_orders))
                .route("/orders/{order_id}", web::get().to(get_order))
                .route("/orders/{order_id}/receipt", web::get().to(get_order_receipt))
                .route("/orders/{order_id}/cancel", web::post().to(cancel_customer_order))
                .route("/orders/{order_id}/feedback", web::post().to(post_feedback))
                .route("/profile", web::get().to(get_customer_profile))
                .route("/profile", web::post().to(post_customer_profile))
        );
}

// Malformed input is answered with the same JSON body as every other
// validation failure. The parser's own wording only goes to the log.
fn rejected(message: &str, err: impl std::fmt::Display) -> actix_web::Error {
    tracing::info!(error = %err, "Rejected malformed request");
    ShopError::Validation(message.to_string()).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| rejected("Invalid request body", err))
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| rejected("Invalid query parameters", err))
}

pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, _req| rejected("Invalid form data", err))
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| rejected("Invalid order id", err))
}
