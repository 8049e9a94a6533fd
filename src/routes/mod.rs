use actix_identity::Identity;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::listing::SEARCH_DEBOUNCE_MS;
use crate::domain::types::CategoryName;

pub mod admin;
pub mod api;
pub mod compare;
pub mod main;
pub mod products;

/// Cookie holding the selected colour theme.
pub const THEME_COOKIE: &str = "theme";

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    HttpResponse::Ok().body(tera.render(template, context).unwrap_or_else(|e| {
        log::error!("Failed to render template '{template}': {e}");
        String::new()
    }))
}

pub fn render_not_found(tera: &Tera, context: &Context) -> HttpResponse {
    HttpResponse::NotFound().body(tera.render("main/not_found.html", context).unwrap_or_else(
        |e| {
            log::error!("Failed to render template 'main/not_found.html': {e}");
            String::new()
        },
    ))
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Page the request came from, for post-redirect-get round trips.
pub fn referer_or<'a>(request: &'a HttpRequest, fallback: &'a str) -> &'a str {
    request
        .headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(fallback)
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Current theme from the cookie; anything but `dark` is light.
pub fn current_theme(request: &HttpRequest) -> &'static str {
    match request.cookie(THEME_COOKIE) {
        Some(cookie) if cookie.value() == "dark" => "dark",
        _ => "light",
    }
}

pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    request: &HttpRequest,
    admin: &Option<Identity>,
    categories: &[CategoryName],
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("is_admin", &admin.is_some());
    context.insert("nav_categories", categories);
    context.insert("current_page", current_page);
    context.insert("theme", current_theme(request));
    context.insert("search_debounce_ms", &SEARCH_DEBOUNCE_MS);
    context
}
