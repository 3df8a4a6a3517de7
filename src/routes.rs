use crate::api::{attendance, index, launch};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index::index)))
        .service(web::resource("/status").route(web::get().to(index::status)))
        .service(web::resource("/attendance").route(web::post().to(attendance::attendance)))
        .service(web::resource("/export").route(web::get().to(attendance::export)))
        .service(web::resource("/start_register").route(web::post().to(launch::start_register)))
        .service(
            web::resource("/start_attendance").route(web::post().to(launch::start_attendance)),
        );
}
