use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;
use std::sync::Arc;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod models;
mod routes;
mod utils;
mod view;

use config::Config;
use db::AttendanceStore;

use crate::docs::ApiDoc;
use crate::utils::face_status::FaceStatusProbe;
use crate::utils::launcher::{CommandRunner, Launcher};
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(
        addr = %config.server_addr,
        work_dir = %config.work_dir.display(),
        "Server starting..."
    );

    let store = AttendanceStore::new(&config.database_url)
        .with_context(|| format!("invalid DATABASE_URL {}", config.database_url))?;
    let probe = FaceStatusProbe::new(&config.faces_dir, &config.features_file);
    let launcher = Launcher::new(&config, probe.clone(), Arc::new(CommandRunner));

    let store = Data::new(store);
    let probe = Data::new(probe);
    let launcher = Data::new(launcher);
    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(store.clone())
            .app_data(probe.clone())
            .app_data(launcher.clone())
            .configure(routes::configure)
    })
    .bind(&server_addr)
    .with_context(|| format!("could not bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
