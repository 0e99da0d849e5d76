use env_logger::Env;
use std::net::TcpListener;
use trivia_web::config::Config;
use trivia_web::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!(
        "Serving {} against {}",
        config.variant.brand(),
        config.api_base_url
    );
    log::info!("Starting server at http://{}", config.bind_address);

    let listener = TcpListener::bind(&config.bind_address)?;
    run(listener, config)?.await
}
