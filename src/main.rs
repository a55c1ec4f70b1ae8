mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{
    middleware::{Compress, Logger},
    web, App, HttpServer,
};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::{Config, StoreKind};
use database::{DocumentStore, MemoryStore, MongoStore};

/// Builds the store once; every worker shares the same instance.
async fn connect_store(
    config: &Config,
) -> Result<Arc<dyn DocumentStore>, Box<dyn std::error::Error>> {
    match config.store {
        StoreKind::Mongo => {
            log::info!("📊 Connecting to MongoDB database '{}'", config.database_name);
            let store = MongoStore::connect(&config.database_url, &config.database_name).await?;
            log::info!("✅ MongoDB connected successfully");
            Ok(Arc::new(store))
        }
        StoreKind::Memory => {
            log::warn!("⚠️  Using in-memory store: data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    log::info!("🚀 Starting Task Manager Service...");

    let store = match connect_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            log::error!("❌ Failed to connect to the document store: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    let store_data: web::Data<dyn DocumentStore> = web::Data::from(store);
    let bind_address = config.bind_address();

    log::info!("🌐 Server is running on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);

    let openapi = api::swagger::ApiDoc::openapi();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(store_data.clone())
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(api::configure)
    })
    .bind(bind_address.as_str())?
    .run()
    .await
}
