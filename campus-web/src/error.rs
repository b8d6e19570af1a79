use actix_web::error::BlockingError;
use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use campus_db::store::StoreError;
use log::error;

use crate::views;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("record not found")]
    NotFound,
    #[error("record already exists")]
    Conflict,
    #[error("not signed in")]
    Unauthenticated,
    #[error("store: {0}")]
    Store(StoreError),
    #[error("blocking task: {0}")]
    Blocking(#[from] BlockingError),
    #[error("password hash: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound,
            StoreError::Conflict => AppError::Conflict,
            err => AppError::Store(err),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::Unauthenticated => StatusCode::SEE_OTHER,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::Unauthenticated => HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/login"))
                .finish(),
            AppError::NotFound | AppError::Conflict => HttpResponse::build(status)
                .content_type(ContentType::html())
                .body(views::error_page(status, &self.to_string())),
            _ => {
                error!("request failed: {}", self);
                HttpResponse::build(status)
                    .content_type(ContentType::html())
                    .body(views::error_page(status, "Something went wrong."))
            }
        }
    }
}
