use std::sync::Arc;

use actix_web::web;
use campus_db::store::{SchoolStore, UserStore};
use chrono::Duration;

use crate::config::Settings;

/// Shared per-worker state handed to every handler through `web::Data`.
pub struct AppState {
    pub schools: Arc<dyn SchoolStore>,
    pub users: Arc<dyn UserStore>,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(
        schools: impl SchoolStore + 'static,
        users: impl UserStore + 'static,
        settings: &Settings,
    ) -> Self {
        AppState {
            schools: Arc::new(schools),
            users: Arc::new(users),
            jwt_secret: settings.jwt_secret.clone(),
            token_ttl: Duration::hours(settings.token_ttl_hours),
            bcrypt_cost: settings.bcrypt_cost,
        }
    }
}

/// Registers every route. The numeric `{id}` patterns keep `/school/new` and
/// `/school/list` from being read as record ids.
pub fn configure_service(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::account::index)
        .service(routes::account::login_form)
        .service(routes::account::login)
        .service(routes::account::signup_form)
        .service(routes::account::signup)
        .service(routes::account::logout)
        .service(routes::school::new_school)
        .service(routes::school::create_school)
        .route("/school/list", web::get().to(routes::school::list_schools))
        .route("/schools", web::get().to(routes::school::list_schools))
        .service(routes::school::edit_school)
        .service(routes::school::update_school)
        .service(routes::school::delete_school)
        .service(routes::school::view_school);
}

pub mod auth;
pub mod config;
pub mod error;
pub mod forms;
pub mod notice;
mod routes;
mod views;
