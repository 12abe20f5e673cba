//! Printdesk server - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use std::time::Duration;

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use printdesk_lib::api::{self, ApiDoc, MaxUploadSize};
use printdesk_lib::auth::AdminKey;
use printdesk_lib::config::{ADMIN_KEY_HEADER, Config};
use printdesk_lib::db::DbPool;
use printdesk_lib::middleware;
use printdesk_lib::services::{ImageFetcher, Mailer, Storage};

/// Log a fatal startup error and exit.
fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    error!("{}: {}", context, err);
    std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        std::process::exit(1);
    }

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL, S3 credentials and PRINTDESK_ADMIN_KEY must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Printdesk Server v{}", env!("CARGO_PKG_VERSION"));
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
        info!("Using development defaults for DATABASE_URL, S3 and PRINTDESK_ADMIN_KEY");
    }

    // Initialize database
    let pool = DbPool::new(&config)
        .await
        .unwrap_or_else(|e| fail("Failed to initialize database", e));
    info!("Database connection established");

    if config.database.run_migrations {
        pool.run_migrations()
            .await
            .unwrap_or_else(|e| fail("Failed to run migrations", e));
    } else {
        info!("Skipping migrations (PRINTDESK_RUN_MIGRATIONS=false)");
    }

    // Initialize storage and outbound clients
    let storage = Storage::new(&config.storage)
        .await
        .unwrap_or_else(|e| fail("Failed to initialize S3 storage", e));

    let http_client = ImageFetcher::build_client(Duration::from_secs(config.http_timeout_secs))
        .unwrap_or_else(|e| fail("Failed to build HTTP client", e));
    let fetcher = ImageFetcher::new(http_client.clone(), config.max_source_image_size);

    let mailer = match config.mail {
        Some(ref settings) => Some(web::Data::new(Mailer::new(http_client, settings))),
        None => {
            warn!("Mail API not configured, email notifications are disabled");
            None
        }
    };

    // Prepare shared state
    let bind_address = config.bind_address();
    let admin_key = AdminKey::from_secret(config.admin_key.clone());
    let max_upload_size = config.max_upload_size;
    let allowed_origins = config.allowed_origins.clone();

    info!(
        "Limits: {}MB uploads, {}MB source images, {}s outbound timeout",
        max_upload_size / 1024 / 1024,
        config.max_source_image_size / 1024 / 1024,
        config.http_timeout_secs
    );

    let worker_count = if config.is_development() {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!(
            "Starting server at http://{} ({} workers)",
            bind_address, cpus
        );
        cpus
    };
    info!("API documentation at http://{}/api/docs/", bind_address);

    let pool = web::Data::new(pool);
    let admin_key = web::Data::new(admin_key);
    let storage = web::Data::new(storage);
    let fetcher = web::Data::new(fetcher);
    let upload_limit = web::Data::new(MaxUploadSize(max_upload_size));
    let openapi = ApiDoc::openapi();

    // Start HTTP server
    let server = HttpServer::new(move || {
        // Configure CORS
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .allowed_header(ADMIN_KEY_HEADER)
            .max_age(3600);

        let mut app = App::new()
            // Add CORS middleware (must be before other middleware)
            .wrap(cors)
            // Add request logging middleware
            .wrap(middleware::RequestLogger)
            // Add shared state
            .app_data(pool.clone())
            .app_data(admin_key.clone())
            .app_data(storage.clone())
            .app_data(fetcher.clone())
            .app_data(upload_limit.clone())
            .app_data(api::json_config())
            .app_data(api::query_config())
            .app_data(api::path_config())
            // Multipart limits are enforced while streaming each field
            .app_data(web::PayloadConfig::new(max_upload_size * 2))
            .service(
                SwaggerUi::new("/api/docs/{_:.*}").url("/api/openapi.json", openapi.clone()),
            );

        if let Some(ref mailer) = mailer {
            app = app.app_data(mailer.clone());
        }

        // Configure API routes
        app.service(
            web::scope("/api/v1")
                .configure(api::configure_health_routes)
                .configure(api::configure_admin_routes),
        )
    });

    // Set worker count
    server
        .workers(worker_count)
        .bind(&bind_address)?
        .run()
        .await
}
