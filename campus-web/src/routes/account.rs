use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{get, post, web, HttpResponse};
use bcrypt::{hash, verify};
use campus_common::utils::{create_token, Role, TOKEN_COOKIE};
use campus_db::models::user::{NewUser, User};
use chrono::Utc;
use log::{info, warn};

use super::{block, html, redirect};
use crate::error::AppError;
use crate::forms::{LoginForm, SignUpForm};
use crate::views;
use crate::AppState;

const BAD_LOGIN: &str = "Invalid user id or password.";

#[get("/")]
pub(crate) async fn index() -> HttpResponse {
    redirect("/schools")
}

#[get("/login")]
pub(crate) async fn login_form() -> HttpResponse {
    html(views::login_page("", None))
}

#[post("/login")]
pub(crate) async fn login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let LoginForm { id, password } = form.into_inner();

    let users = state.users.clone();
    let uid = id.clone();
    let user = match block(move || users.get(&uid)).await {
        Ok(user) => user,
        Err(AppError::NotFound) => return Ok(reject_login(&id)),
        Err(e) => return Err(e),
    };
    if !user.is_active {
        return Ok(reject_login(&id));
    }
    let stored = user.hash_pwd.clone();
    if !web::block(move || verify(&password, &stored)).await?? {
        return Ok(reject_login(&id));
    }

    let users = state.users.clone();
    let uid = user.id.clone();
    block(move || users.touch_last_login(&uid, Utc::now().naive_utc())).await?;

    let token = issue_token(&state, &user)?;
    info!("{} signed in", user.id);

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/schools"))
        .cookie(
            Cookie::build(TOKEN_COOKIE, token)
                .path("/")
                .http_only(true)
                .finish(),
        )
        .finish())
}

fn reject_login(id: &str) -> HttpResponse {
    warn!("failed sign in for {:?}", id);
    html(views::login_page(id, Some(BAD_LOGIN)))
}

fn issue_token(state: &AppState, user: &User) -> Result<String, AppError> {
    let role = user.user_role.parse().unwrap_or(Role::User);
    Ok(create_token(
        user.id.clone(),
        role,
        &state.jwt_secret,
        state.token_ttl,
    )?)
}

#[get("/signup")]
pub(crate) async fn signup_form() -> HttpResponse {
    html(views::signup_page(&SignUpForm::default()))
}

#[post("/signup")]
pub(crate) async fn signup(
    state: web::Data<AppState>,
    form: web::Form<SignUpForm>,
) -> Result<HttpResponse, AppError> {
    let mut form = form.into_inner();
    if !form.validate() {
        return Ok(html(views::signup_page(&form)));
    }

    let password = form.password.clone();
    let cost = state.bcrypt_cost;
    let new_user = NewUser {
        id: form.id.clone(),
        hash_pwd: web::block(move || hash(&password, cost)).await??,
        email: form.email.clone(),
        user_role: Role::User.to_string(),
    };
    let users = state.users.clone();
    match block(move || users.create(new_user)).await {
        Ok(user) => {
            info!("{} signed up", user.id);
            Ok(redirect("/login"))
        }
        Err(AppError::Conflict) => {
            form.errors.insert("id", "That user id is already taken.");
            Ok(html(views::signup_page(&form)))
        }
        Err(e) => Err(e),
    }
}

#[get("/logout")]
pub(crate) async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(TOKEN_COOKIE, "").path("/").finish();
    cookie.make_removal();
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/login"))
        .cookie(cookie)
        .finish()
}
