use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use campus_common::utils::get_claims;

use crate::error::AppError;
use crate::AppState;

/// The signed-in caller. Extracting it from a request without a valid token
/// fails with [`AppError::Unauthenticated`], which redirects to `/login`
/// before the handler body runs.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req
            .app_data::<web::Data<AppState>>()
            .and_then(|state| get_claims(req, &state.jwt_secret))
            .map(|claims| CurrentUser { id: claims.sub });
        ready(user.ok_or(AppError::Unauthenticated))
    }
}
