#![allow(dead_code)]

use std::sync::Arc;

use actix_web::http::header::{self, HeaderName};
use actix_web::web;
use campus_common::utils::{create_token, Role};
use campus_db::store::{MemorySchoolStore, MemoryUserStore};
use campus_web::AppState;
use chrono::Duration;

pub const SECRET: &str = "integration-secret";

pub fn state() -> web::Data<AppState> {
    web::Data::new(AppState {
        schools: Arc::new(MemorySchoolStore::new()),
        users: Arc::new(MemoryUserStore::new()),
        jwt_secret: SECRET.to_owned(),
        token_ttl: Duration::hours(1),
        bcrypt_cost: 4,
    })
}

pub fn bearer(user: &str) -> (HeaderName, String) {
    let token = create_token(user.to_owned(), Role::User, SECRET, Duration::hours(1))
        .expect("token should encode");
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub fn lincoln() -> [(&'static str, &'static str); 4] {
    [
        ("school_name", "Lincoln HS"),
        ("grade", "10"),
        ("start_time", "08:30"),
        ("number_classes", "7"),
    ]
}
