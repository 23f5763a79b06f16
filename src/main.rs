use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{error, info};

use travel_admin_api::backend::HttpBackend;
use travel_admin_api::config::{AppConfig, AppContext};
use travel_admin_api::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        info!("Release mode");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {}", err);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, err));
        }
    };

    let backend = match HttpBackend::from_config(&config) {
        Ok(backend) => backend,
        Err(err) => {
            error!("Failed to create backend client: {}", err);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, err));
        }
    };
    info!("Using travel backend at {}", config.backend_url);

    let context = web::Data::new(AppContext::new(backend, config.environment.clone()));
    let allowed_origin = config.allowed_origin.clone();

    info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        let cors = match &allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
            None => Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
        };

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(context.clone())
            .configure(routes::config::<HttpBackend>)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
