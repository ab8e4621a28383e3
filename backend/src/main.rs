use actix_web::{web, App, HttpServer};
use cropfield_backend::config::Config;
use cropfield_backend::services;
use cropfield_backend::services::boundary::resolver::BoundaryResolver;
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = web::Data::new(Config::load());
    let resolver = web::Data::new(BoundaryResolver::new());
    let bind = (config.host.clone(), config.port);

    info!("Server running at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(config.max_upload_bytes))
            .app_data(config.clone())
            .app_data(resolver.clone())
            .service(services::boundary::configure_routes())
            .service(services::health::configure_routes())
    })
    .bind(bind)?
    .run()
    .await
}
