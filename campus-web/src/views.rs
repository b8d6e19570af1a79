use std::fmt::Write;

use actix_web::http::StatusCode;
use campus_db::models::school::School;

use crate::auth::CurrentUser;
use crate::forms::{SchoolForm, SignUpForm, GRADES};
use crate::notice::Notice;

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(title: &str, user: Option<&CurrentUser>, notice: Option<Notice>, body: &str) -> String {
    let nav = match user {
        Some(user) => format!(
            concat!(
                r#"<a href="/schools">Schools</a> <a href="/school/new">New School</a> "#,
                r#"<span>{}</span> <a href="/logout">Sign out</a>"#,
            ),
            escape(&user.id)
        ),
        None => r#"<a href="/login">Sign in</a> <a href="/signup">Sign up</a>"#.to_owned(),
    };
    let flash = notice
        .map(|n| format!(r#"<p class="notice">{}</p>"#, escape(n.message())))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<nav>{nav}</nav>
{flash}
{body}
</body>
</html>
"#,
        title = escape(title),
        nav = nav,
        flash = flash,
        body = body,
    )
}

fn field_error(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#" <span class="error">{}</span>"#, escape(e)))
        .unwrap_or_default()
}

pub(crate) fn school_page(school: &School, user: &CurrentUser, notice: Option<Notice>) -> String {
    let mut body = format!(
        r#"<h1>{name}</h1>
<dl>
<dt>Grade</dt><dd>{grade}</dd>
<dt>Start time</dt><dd>{start}</dd>
<dt>Number of classes</dt><dd>{classes}</dd>
<dt>Author</dt><dd>{author}</dd>
</dl>
"#,
        name = escape(&school.school_name),
        grade = escape(&school.grade),
        start = school.start_time.format("%H:%M"),
        classes = school.number_classes,
        author = escape(&school.author_id),
    );
    if school.is_authored_by(&user.id) {
        let _ = write!(
            body,
            concat!(
                r#"<p><a href="/school/edit/{id}">Edit</a> "#,
                r#"<a href="/school/delete/{id}">Delete</a></p>"#,
            ),
            id = school.id
        );
    }
    layout(&school.school_name, Some(user), notice, &body)
}

pub(crate) fn schools_page(
    schools: &[School],
    user: &CurrentUser,
    notice: Option<Notice>,
) -> String {
    let mut body = String::from("<h1>Schools</h1>\n<ul>\n");
    for school in schools {
        let _ = writeln!(
            body,
            r#"<li><a href="/school/{}">{}</a> (grade {}, {} classes)</li>"#,
            school.id,
            escape(&school.school_name),
            escape(&school.grade),
            school.number_classes,
        );
    }
    body.push_str("</ul>\n");
    layout("Schools", Some(user), notice, &body)
}

pub(crate) fn school_form_page(
    form: &SchoolForm,
    action: &str,
    heading: &str,
    user: &CurrentUser,
) -> String {
    let mut grades = String::new();
    for grade in GRADES.iter() {
        let selected = if form.grade.trim() == *grade { " selected" } else { "" };
        let _ = write!(grades, r#"<option value="{g}"{s}>{g}</option>"#, g = grade, s = selected);
    }

    let body = format!(
        r#"<h1>{heading}</h1>
<form method="post" action="{action}">
<label>School name <input name="school_name" value="{name}"></label>{name_err}<br>
<label>Grade <select name="grade"><option value=""></option>{grades}</select></label>{grade_err}<br>
<label>Start time <input type="time" name="start_time" value="{start}"></label>{start_err}<br>
<label>Number of classes
<input type="number" min="0" name="number_classes" value="{classes}"></label>{classes_err}<br>
<button type="submit">Submit</button>
</form>
"#,
        heading = escape(heading),
        action = escape(action),
        name = escape(&form.school_name),
        name_err = field_error(form.error("school_name")),
        grades = grades,
        grade_err = field_error(form.error("grade")),
        start = escape(&form.start_time),
        start_err = field_error(form.error("start_time")),
        classes = escape(&form.number_classes),
        classes_err = field_error(form.error("number_classes")),
    );
    layout(heading, Some(user), None, &body)
}

pub(crate) fn login_page(id: &str, error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Sign in</h1>
<form method="post" action="/login">
<label>User id <input name="id" value="{id}"></label><br>
<label>Password <input type="password" name="password"></label><br>
{error}
<button type="submit">Sign in</button>
</form>
"#,
        id = escape(id),
        error = field_error(error),
    );
    layout("Sign in", None, None, &body)
}

pub(crate) fn signup_page(form: &SignUpForm) -> String {
    let body = format!(
        r#"<h1>Sign up</h1>
<form method="post" action="/signup">
<label>User id <input name="id" value="{id}"></label>{id_err}<br>
<label>Email <input type="email" name="email" value="{email}"></label>{email_err}<br>
<label>Password <input type="password" name="password"></label>{password_err}<br>
<button type="submit">Sign up</button>
</form>
"#,
        id = escape(&form.id),
        id_err = field_error(form.error("id")),
        email = escape(&form.email),
        email_err = field_error(form.error("email")),
        password_err = field_error(form.error("password")),
    );
    layout("Sign up", None, None, &body)
}

pub(crate) fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n",
        status.as_u16(),
        escape(message)
    );
    layout(status.canonical_reason().unwrap_or("Error"), None, None, &body)
}
