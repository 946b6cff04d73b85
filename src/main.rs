use actix_cors::Cors;
use actix_files as fs;
use actix_web::http::header;
use actix_web::{web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use chat_relay::config::Config;
use chat_relay::upstream::CompletionClient;
use chat_relay::web::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting chat relay");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let upstream = Data::new(CompletionClient::new(&config));
    let allowed_origins = config.allowed_origins.clone();
    let port = config.port;

    info!("Server running on port {}", port);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["POST", "GET"])
            .allowed_headers(vec![
                header::CONTENT_TYPE,
                header::HeaderName::from_static("api-key"),
            ]);
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .app_data(upstream.clone())
            .wrap(cors)
            .configure(routes::configure)
            .service(fs::Files::new("/", "./static").index_file("index.html"))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
