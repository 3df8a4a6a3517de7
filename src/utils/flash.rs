use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, HttpResponseBuilder, dev::Payload};
use futures::future::{Ready, ready};

pub const FLASH_COOKIE: &str = "flash";

/// One-shot notification carried from a redirect to the next rendered page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Flash(pub Option<String>);

impl FromRequest for Flash {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let message = req
            .cookie(FLASH_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|m| !m.is_empty());

        ready(Ok(Flash(message)))
    }
}

impl Flash {
    pub fn message(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Clears the cookie on the response if a message was shown.
    pub fn consume(&self, builder: &mut HttpResponseBuilder) {
        if self.0.is_some() {
            let mut removal = Cookie::new(FLASH_COOKIE, "");
            removal.set_path("/");
            removal.make_removal();
            builder.cookie(removal);
        }
    }
}

/// `302 Found` to `location` with `message` queued for the next page.
pub fn redirect_with(location: &str, message: &str) -> HttpResponse {
    let mut cookie = Cookie::new(FLASH_COOKIE, message);
    cookie.set_path("/");
    cookie.set_http_only(true);

    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .append_header((header::SET_COOKIE, cookie.encoded().to_string()))
        .finish()
}

/// `302 Found` to `location` without a message.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
