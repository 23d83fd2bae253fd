// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, and start HTTP server

use actix_web::{
    http::StatusCode,
    middleware::{Compress, Condition, DefaultHeaders, ErrorHandlers, Logger},
    web, App, HttpServer,
};
use dotenv::dotenv;
use std::io;
use taxfarm_api::config::{self, Config};
use taxfarm_api::errors::redact_server_error;
use taxfarm_api::handlers;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.clone()
        } else {
            "info,actix_web=info,sqlx=warn".to_string()
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    log::info!("Starting taxfarm-api...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize database connection pool (shared for the whole process)
    let pool = match config::init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let redact_errors = config.is_production();
    let app_pool = pool.clone();

    HttpServer::new(move || {
        App::new()
            // Application state (database pool)
            .app_data(web::Data::new(app_pool.clone()))
            // Middleware
            .wrap(Condition::new(
                redact_errors,
                ErrorHandlers::new()
                    .handler(StatusCode::INTERNAL_SERVER_ERROR, redact_server_error),
            ))
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "DENY"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .wrap(Logger::default())
            .wrap(Compress::default())
            // Routes
            .configure(handlers::configure)
            .default_service(web::route().to(handlers::not_found))
    })
    .bind(&server_addr)?
    .run()
    .await?;

    log::info!("Server stopped, closing database pool");
    pool.close().await;
    Ok(())
}
