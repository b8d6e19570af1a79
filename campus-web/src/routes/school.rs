use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use campus_db::models::school::School;
use chrono::{Local, NaiveDate};
use log::{info, warn};

use super::{block, html, redirect, render_with_notice};
use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::forms::SchoolForm;
use crate::notice::Notice;
use crate::views;
use crate::AppState;

const NEW_PATH: &str = "/school/new";

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn school_path(id: i32) -> String {
    format!("/school/{}", id)
}

fn edit_path(id: i32) -> String {
    format!("/school/edit/{}", id)
}

async fn fetch(state: &AppState, id: i32) -> Result<School, AppError> {
    let schools = state.schools.clone();
    block(move || schools.get(id)).await
}

async fn fetch_all(state: &AppState) -> Result<Vec<School>, AppError> {
    let schools = state.schools.clone();
    block(move || schools.all()).await
}

/// Non-authors are sent back to the record with a notice; nothing else about
/// the request is looked at.
fn deny_edit(school: &School, user: &CurrentUser) -> Option<HttpResponse> {
    if school.is_authored_by(&user.id) {
        return None;
    }
    warn!("{} may not edit school {}", user.id, school.id);
    Some(
        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, school_path(school.id)))
            .cookie(Notice::EditDenied.cookie())
            .finish(),
    )
}

#[get("/school/{id:\\d+}")]
pub(crate) async fn view_school(
    state: web::Data<AppState>,
    user: CurrentUser,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let school = fetch(&state, path.into_inner()).await?;
    Ok(render_with_notice(&req, |notice| {
        views::school_page(&school, &user, notice)
    }))
}

#[get("/school/new")]
pub(crate) async fn new_school(user: CurrentUser) -> HttpResponse {
    html(views::school_form_page(
        &SchoolForm::default(),
        NEW_PATH,
        "New School",
        &user,
    ))
}

#[post("/school/new")]
pub(crate) async fn create_school(
    state: web::Data<AppState>,
    user: CurrentUser,
    form: web::Form<SchoolForm>,
) -> Result<HttpResponse, AppError> {
    let mut form = form.into_inner();
    let input = match form.validate() {
        Some(input) => input,
        None => {
            return Ok(html(views::school_form_page(
                &form,
                NEW_PATH,
                "New School",
                &user,
            )))
        }
    };

    let school = input.into_new_school(user.id.clone(), today());
    let schools = state.schools.clone();
    let created = block(move || schools.create(school)).await?;
    info!("{} created school {}", user.id, created.id);

    Ok(redirect(&school_path(created.id)))
}

/// Served at both `/school/list` and `/schools`.
pub(crate) async fn list_schools(
    state: web::Data<AppState>,
    user: CurrentUser,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let schools = fetch_all(&state).await?;
    Ok(render_with_notice(&req, |notice| {
        views::schools_page(&schools, &user, notice)
    }))
}

#[get("/school/edit/{id:\\d+}")]
pub(crate) async fn edit_school(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let school = fetch(&state, id).await?;
    if let Some(denied) = deny_edit(&school, &user) {
        return Ok(denied);
    }

    let form = SchoolForm::from_school(&school);
    Ok(html(views::school_form_page(
        &form,
        &edit_path(id),
        "Edit School",
        &user,
    )))
}

#[post("/school/edit/{id:\\d+}")]
pub(crate) async fn update_school(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
    form: Result<web::Form<SchoolForm>, actix_web::Error>,
) -> Result<HttpResponse, actix_web::Error> {
    let id = path.into_inner();
    let school = fetch(&state, id).await?;
    if let Some(denied) = deny_edit(&school, &user) {
        return Ok(denied);
    }

    // Body errors only surface once the caller is known to be the author.
    let mut form = form?.into_inner();
    let input = match form.validate() {
        Some(input) => input,
        None => {
            return Ok(html(views::school_form_page(
                &form,
                &edit_path(id),
                "Edit School",
                &user,
            )))
        }
    };

    let changes = input.into_changes(today());
    let schools = state.schools.clone();
    block(move || schools.update(id, changes)).await?;
    info!("{} updated school {}", user.id, id);

    Ok(redirect(&school_path(id)))
}

#[get("/school/delete/{id:\\d+}")]
pub(crate) async fn delete_school(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let school = fetch(&state, id).await?;

    let notice = if school.is_authored_by(&user.id) {
        let schools = state.schools.clone();
        block(move || schools.delete(id)).await?;
        info!("{} deleted school {}", user.id, id);
        Notice::Deleted
    } else {
        warn!("{} may not delete school {}", user.id, id);
        Notice::DeleteDenied
    };

    let remaining = fetch_all(&state).await?;
    Ok(html(views::schools_page(&remaining, &user, Some(notice))))
}
