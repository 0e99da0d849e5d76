use actix_web::dev::Server;
use actix_web::{middleware, web, App, HttpServer};
use std::net::TcpListener;

pub mod api_client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod nav;
pub mod state;
pub mod views;

use config::Config;
use state::AppState;

pub fn run(listener: TcpListener, config: Config) -> Result<Server, std::io::Error> {
    let listing = format!("/{}/{{category}}", config.variant.route_prefix());
    let data = web::Data::new(AppState::new(config));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(handlers::health_check))
            .route("/", web::get().to(handlers::categories_page))
            .route(&listing, web::get().to(handlers::quizzes_by_category))
            .service(
                web::scope("/quiz")
                    .route("/{id}", web::get().to(handlers::quiz_page))
                    .route("/{id}/submit", web::get().to(handlers::submit_answers))
                    .route("/{id}/results", web::get().to(handlers::quiz_results))
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
