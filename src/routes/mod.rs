use actix_web::web;

pub mod health;
pub mod pricing;
pub mod recommendations;

/// Mount every route. Shared by the server and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .route("/pricing/quote", web::post().to(pricing::quote))
                .service(
                    web::scope("/recommendations")
                        .route("", web::post().to(recommendations::recommend))
                        .route("/rank", web::post().to(recommendations::rank)),
                ),
        );
}
