use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use docdiff_gateway::RetryPolicy;
use docdiff_object_store::store::ObjectStore;
use docdiff_remote_function::{function::RemoteFunction, RemoteFunctionTrait};

use crate::state::ApiState;

pub mod download;
pub mod health;
pub mod upload;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub remote_function: RemoteFunction,
    pub retry_policy: RetryPolicy,
    pub object_store: ObjectStore,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(upload::upload)
        .service(download::download)
        .service(health::health);
}

pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let state = ApiState::new(
        config.remote_function,
        config.retry_policy,
        config.object_store,
        config.max_upload_bytes,
    );

    log::info!(
        "docdiff gateway listening on {}:{} (remote function: {})",
        config.host,
        config.port,
        state.submission.remote_function().name()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
