use std::{io, sync::Arc};

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::info;

use tripcore_api::{
    config::ServerConfig,
    db,
    routes,
    services::{
        availability_service::{MongoAvailabilitySource, TimeoutAvailability},
        listing_service::MongoListingSource,
        recommendation_scoring::ScoringConfig,
        recommendation_service::RecommendationEngine,
    },
    state::AppState,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env().map_err(io::Error::other)?;
    let client = db::mongo::create_mongo_client(&config.mongo_uri, &config.listings_database)
        .await
        .map_err(io::Error::other)?;

    let scoring = ScoringConfig::from_env();
    let availability = TimeoutAvailability::new(
        MongoAvailabilitySource::new(client.clone(), config.listings_database.clone()),
        scoring.availability_timeout(),
    );
    let state = AppState::new(
        Arc::new(MongoListingSource::new(client, config.listings_database.clone())),
        RecommendationEngine::with_config(Arc::new(availability), scoring),
    );

    info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind((config.host, config.port))?
    .run()
    .await
}
