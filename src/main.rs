use actix_web::{middleware, web, App, HttpServer};
use refstat::config::Settings;
use refstat::core::Extractor;
use refstat::routes::{self, relay, AppState};
use refstat::services::RelayClient;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_logging(&settings);

    info!("Starting RefStat Lite...");

    let extractor = Extractor::new(&settings.extractor).map_err(|e| {
        error!("Invalid extractor configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let relay = RelayClient::new(&settings.relay).map_err(|e| {
        error!("Failed to initialize relay client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    info!(
        "Extractor ready (min text length: {}), relay user agent: {}",
        settings.extractor.min_text_len, settings.relay.user_agent
    );

    let app_state = AppState {
        extractor: Arc::new(extractor),
        relay,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
            .wrap(middleware::Logger::default())
            .configure(routes::configure_routes)
            .default_service(web::to(relay::forward))
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

/// `RUST_LOG` wins over the configured level when set
fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}
