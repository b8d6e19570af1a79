use actix_web::cookie::Cookie;
use actix_web::HttpRequest;
use strum_macros::{Display, EnumString};

pub const NOTICE_COOKIE: &str = "notice";

/// One-shot message shown on the next rendered page. Only the code travels in
/// the cookie; the text stays server side.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Notice {
    EditDenied,
    DeleteDenied,
    Deleted,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::EditDenied => "You can't edit a school you don't own.",
            Notice::DeleteDenied => "You can't delete a School you don't own.",
            Notice::Deleted => "The School was deleted.",
        }
    }

    pub fn cookie(self) -> Cookie<'static> {
        Cookie::build(NOTICE_COOKIE, self.to_string())
            .path("/")
            .http_only(true)
            .finish()
    }

    /// Unknown codes are dropped rather than shown.
    pub fn from_request(req: &HttpRequest) -> Option<Notice> {
        req.cookie(NOTICE_COOKIE)
            .and_then(|cookie| cookie.value().parse().ok())
    }

    pub fn removal_cookie() -> Cookie<'static> {
        let mut cookie = Cookie::build(NOTICE_COOKIE, "").path("/").finish();
        cookie.make_removal();
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_notice_read_back_from_cookie() {
        let req = TestRequest::default()
            .cookie(Notice::EditDenied.cookie())
            .to_http_request();
        assert_eq!(Notice::from_request(&req), Some(Notice::EditDenied));
    }

    #[test]
    fn test_unknown_code_is_ignored() {
        let req = TestRequest::default()
            .cookie(Cookie::new(NOTICE_COOKIE, "<script>"))
            .to_http_request();
        assert_eq!(Notice::from_request(&req), None);
    }
}
