use actix_identity::Identity;
use actix_web::cookie::Cookie;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Local;
use tera::Tera;

use crate::events::CategoryCache;
use crate::repository::DieselRepository;
use crate::routes::{
    THEME_COOKIE, base_context, current_theme, redirect, referer_or, render_not_found,
    render_template,
};
use crate::services::storefront::{
    ListingParams, show_category as show_category_service, show_home as show_home_service,
};

#[get("/")]
pub async fn index(
    request: HttpRequest,
    admin: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    params: web::Query<ListingParams>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<CategoryCache>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page = show_home_service(&params, repo.get_ref(), &Local::now());
    let categories = cache.categories(repo.get_ref());

    let mut context = base_context(&flash_messages, &request, &admin, &categories, "index");
    context.insert("page", &page);
    render_template(&tera, "main/index.html", &context)
}

#[get("/category/{name}")]
pub async fn show_category(
    request: HttpRequest,
    name: web::Path<String>,
    admin: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    params: web::Query<ListingParams>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<CategoryCache>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page = show_category_service(&name, &params, repo.get_ref());
    let categories = cache.categories(repo.get_ref());

    let mut context = base_context(&flash_messages, &request, &admin, &categories, "category");
    context.insert("page", &page);
    render_template(&tera, "main/category.html", &context)
}

#[post("/theme")]
pub async fn toggle_theme(request: HttpRequest) -> impl Responder {
    let next = match current_theme(&request) {
        "dark" => "light",
        _ => "dark",
    };

    let cookie = Cookie::build(THEME_COOKIE, next)
        .path("/")
        .permanent()
        .finish();

    let mut response = redirect(referer_or(&request, "/"));
    if let Err(e) = response.add_cookie(&cookie) {
        log::error!("Failed to set theme cookie: {e}");
    }
    response
}

/// Fallback for unknown paths.
pub async fn not_found(
    request: HttpRequest,
    admin: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    cache: web::Data<CategoryCache>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let categories = cache.categories(repo.get_ref());
    let context = base_context(&flash_messages, &request, &admin, &categories, "not_found");
    render_not_found(&tera, &context)
}
