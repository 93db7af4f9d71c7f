pub mod health;
pub mod auth;
pub mod books;
pub mod collection;
pub mod reviews;
pub mod streaks;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(health::health_check)
            .configure(auth::auth_routes)
            .configure(books::books_routes)
            .configure(collection::collection_routes)
            .configure(reviews::reviews_routes)
            .configure(streaks::streaks_routes)
    );
}
