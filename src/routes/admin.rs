use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::products::ClickAnalyticsDto;
use crate::events::{CategoryCache, CategoryFeed};
use crate::forms::auth::{LoginForm, LoginFormPayload};
use crate::forms::products::{AddProductForm, AddProductFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::admin::{
    create_product as create_product_service, show_dashboard as show_dashboard_service,
};
use crate::services::analytics::fetch_click_analytics;
use crate::services::auth::AdminAuthenticator;

/// Sends anonymous visitors to the login page.
fn ensure_admin(admin: &Option<Identity>) -> Result<(), HttpResponse> {
    match admin {
        Some(_) => Ok(()),
        None => Err(redirect("/admin/login")),
    }
}

#[get("/admin/login")]
pub async fn show_login(
    request: HttpRequest,
    admin: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    cache: web::Data<CategoryCache>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if admin.is_some() {
        return redirect("/admin");
    }
    let categories = cache.categories(repo.get_ref());
    let context = base_context(&flash_messages, &request, &admin, &categories, "login");
    render_template(&tera, "admin/login.html", &context)
}

#[post("/admin/login")]
pub async fn login(
    request: HttpRequest,
    authenticator: web::Data<AdminAuthenticator>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let payload: LoginFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/admin/login");
        }
    };

    match authenticator.verify(&payload) {
        Ok(id) => {
            if let Err(e) = Identity::login(&request.extensions(), id) {
                log::error!("Failed to start admin session: {e}");
                return HttpResponse::InternalServerError().finish();
            }
            FlashMessage::success("Signed in.").send();
            redirect("/admin")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Invalid username or password.").send();
            redirect("/admin/login")
        }
        Err(err) => {
            log::error!("Failed to verify admin credentials: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/logout")]
pub async fn logout(admin: Option<Identity>) -> impl Responder {
    if let Some(identity) = admin {
        identity.logout();
    }
    redirect("/")
}

#[get("/admin")]
pub async fn dashboard(
    request: HttpRequest,
    admin: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    cache: web::Data<CategoryCache>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_admin(&admin) {
        return response;
    }

    let dashboard = show_dashboard_service(repo.get_ref());
    let categories = cache.categories(repo.get_ref());

    let mut context = base_context(&flash_messages, &request, &admin, &categories, "admin");
    context.insert("dashboard", &dashboard);
    render_template(&tera, "admin/dashboard.html", &context)
}

#[post("/admin/products")]
pub async fn add_product(
    admin: Option<Identity>,
    repo: web::Data<DieselRepository>,
    feed: web::Data<CategoryFeed>,
    web::Form(form): web::Form<AddProductForm>,
) -> impl Responder {
    if let Err(response) = ensure_admin(&admin) {
        return response;
    }

    let payload: AddProductFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/admin");
        }
    };

    match create_product_service(payload, repo.get_ref(), feed.get_ref()) {
        Ok(product) => FlashMessage::success(format!("Added \"{}\".", product.title)).send(),
        Err(err @ ServiceError::PermissionDenied) => FlashMessage::error(err.to_string()).send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to add product: {err}");
            FlashMessage::error("Failed to add product. Please try again.").send();
        }
    }

    redirect("/admin")
}

#[get("/admin/analytics")]
pub async fn analytics(
    request: HttpRequest,
    admin: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    cache: web::Data<CategoryCache>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_admin(&admin) {
        return response;
    }

    let rows: Vec<ClickAnalyticsDto> = fetch_click_analytics(repo.get_ref())
        .into_iter()
        .map(ClickAnalyticsDto::from)
        .collect();
    let categories = cache.categories(repo.get_ref());

    let mut context = base_context(&flash_messages, &request, &admin, &categories, "analytics");
    context.insert("rows", &rows);
    render_template(&tera, "admin/analytics.html", &context)
}
