use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::compare::ComparedSet;
use crate::events::CategoryCache;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, referer_or, render_template};
use crate::services::ServiceError;
use crate::services::storefront::{
    add_to_comparison, remove_from_comparison, show_comparison as show_comparison_service,
};

const COMPARE_SESSION_KEY: &str = "compare";

/// Comparison set stored in the session; unreadable state counts as empty.
pub fn read_compared(session: &Session) -> ComparedSet {
    match session.get::<ComparedSet>(COMPARE_SESSION_KEY) {
        Ok(Some(set)) => ComparedSet::from_ids(set.ids().iter().cloned()),
        Ok(None) => ComparedSet::default(),
        Err(e) => {
            log::warn!("Discarding unreadable comparison set: {e}");
            ComparedSet::default()
        }
    }
}

fn store_compared(session: &Session, set: &ComparedSet) {
    if let Err(e) = session.insert(COMPARE_SESSION_KEY, set) {
        log::error!("Failed to store comparison set: {e}");
    }
}

#[get("/compare")]
pub async fn show_comparison(
    request: HttpRequest,
    admin: Option<Identity>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    cache: web::Data<CategoryCache>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let set = read_compared(&session);
    let products = show_comparison_service(&set, repo.get_ref());
    let categories = cache.categories(repo.get_ref());

    let mut context = base_context(&flash_messages, &request, &admin, &categories, "compare");
    context.insert("products", &products);
    context.insert("capacity", &ComparedSet::CAPACITY);
    render_template(&tera, "compare/index.html", &context)
}

#[post("/compare/clear")]
pub async fn clear_comparison(request: HttpRequest, session: Session) -> impl Responder {
    store_compared(&session, &ComparedSet::default());
    redirect(referer_or(&request, "/compare"))
}

#[post("/compare/{product_id}/remove")]
pub async fn remove_compared(
    request: HttpRequest,
    product_id: web::Path<String>,
    session: Session,
) -> impl Responder {
    let mut set = read_compared(&session);
    if remove_from_comparison(&mut set, &product_id) {
        store_compared(&session, &set);
    }
    redirect(referer_or(&request, "/compare"))
}

#[post("/compare/{product_id}")]
pub async fn add_compared(
    request: HttpRequest,
    product_id: web::Path<String>,
    session: Session,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let mut set = read_compared(&session);

    match add_to_comparison(&mut set, &product_id, repo.get_ref()) {
        Ok(true) => {
            store_compared(&session, &set);
            FlashMessage::success("Added to comparison.").send();
        }
        Ok(false) if set.ids().iter().any(|id| id.as_str() == product_id.trim()) => {
            FlashMessage::info("Already in comparison.").send()
        }
        Ok(false) => FlashMessage::warning(format!(
            "You can compare up to {} products at a time.",
            ComparedSet::CAPACITY
        ))
        .send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Product not found.").send(),
        Err(err) => {
            log::error!("Failed to add product to comparison: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(referer_or(&request, "/compare"))
}
