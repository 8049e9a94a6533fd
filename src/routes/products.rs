use actix_identity::Identity;
use actix_session::Session;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::compare::ComparedSet;
use crate::events::CategoryCache;
use crate::repository::DieselRepository;
use crate::routes::compare::read_compared;
use crate::routes::{base_context, redirect, render_not_found, render_template};
use crate::services::ServiceError;
use crate::services::storefront::{
    purchase as purchase_service, show_product as show_product_service,
};

#[get("/product/{product_id}")]
pub async fn show_product(
    request: HttpRequest,
    product_id: web::Path<String>,
    admin: Option<Identity>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    cache: web::Data<CategoryCache>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let categories = cache.categories(repo.get_ref());
    let mut context = base_context(&flash_messages, &request, &admin, &categories, "product");

    match show_product_service(&product_id, repo.get_ref()) {
        Ok(page) => {
            let compared: ComparedSet = read_compared(&session);
            context.insert("page", &page);
            context.insert(
                "in_comparison",
                &compared.ids().iter().any(|id| id.as_str() == page.product.id),
            );
            context.insert("comparison_full", &compared.is_full());
            render_template(&tera, "products/show.html", &context)
        }
        Err(ServiceError::NotFound) => render_not_found(&tera, &context),
        Err(err) => {
            log::error!("Failed to render product page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Records the purchase-intent click, then sends the shopper to the
/// marketplace.
#[post("/product/{product_id}/buy")]
pub async fn buy_product(
    request: HttpRequest,
    product_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match purchase_service(&product_id, user_agent, repo.get_ref()) {
        Ok(link) => redirect(link.as_str()),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to start purchase: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
