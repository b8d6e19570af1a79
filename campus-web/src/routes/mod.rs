use actix_web::http::header::{self, ContentType};
use actix_web::{web, HttpRequest, HttpResponse};
use campus_db::store::StoreResult;

use crate::error::AppError;
use crate::notice::Notice;

pub(crate) mod account;
pub(crate) mod school;

/// Runs a synchronous store call on the blocking pool.
pub(crate) async fn block<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(web::block(f).await??)
}

pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// Renders a page that shows, then clears, any pending notice.
pub(crate) fn render_with_notice(
    req: &HttpRequest,
    page: impl FnOnce(Option<Notice>) -> String,
) -> HttpResponse {
    let notice = Notice::from_request(req);
    let mut res = HttpResponse::Ok();
    res.content_type(ContentType::html());
    if notice.is_some() {
        res.cookie(Notice::removal_cookie());
    }
    res.body(page(notice))
}

pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
