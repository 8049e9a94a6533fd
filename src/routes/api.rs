use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, get, post, web};
use serde::{Deserialize, Serialize};

use crate::dto::products::ProductCard;
use crate::events::CategoryFeed;
use crate::forms::products::{AddProductFormPayload, ApiProductForm};
use crate::repository::DieselRepository;
use crate::services::storefront::{ListingParams, list_products, show_suggestions};
use crate::services::{ServiceError, admin::create_product as create_product_service};

#[derive(Deserialize, Debug)]
struct SuggestionsQueryParams {
    q: Option<String>,
}

#[derive(Serialize)]
struct ApiError {
    error: String,
    code: Option<&'static str>,
}

fn error_response(err: &ServiceError) -> HttpResponse {
    let body = ApiError {
        error: err.to_string(),
        code: err.code(),
    };
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().json(body),
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            HttpResponse::BadRequest().json(body)
        }
        ServiceError::PermissionDenied => HttpResponse::Forbidden().json(body),
        ServiceError::Internal => HttpResponse::InternalServerError().json(body),
    }
}

#[get("/v1/products")]
pub async fn api_v1_products(
    params: web::Query<ListingParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    HttpResponse::Ok().json(list_products(&params, repo.get_ref()))
}

#[post("/v1/products")]
pub async fn api_v1_create_product(
    admin: Option<Identity>,
    repo: web::Data<DieselRepository>,
    feed: web::Data<CategoryFeed>,
    web::Json(form): web::Json<ApiProductForm>,
) -> impl Responder {
    if admin.is_none() {
        return error_response(&ServiceError::Unauthorized);
    }

    let payload: AddProductFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(&ServiceError::from(e)),
    };

    match create_product_service(payload, repo.get_ref(), feed.get_ref()) {
        Ok(product) => HttpResponse::Created().json(ProductCard::from(product)),
        Err(err) => error_response(&err),
    }
}

#[get("/v1/suggestions")]
pub async fn api_v1_suggestions(
    params: web::Query<SuggestionsQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let query = params.q.as_deref().unwrap_or_default();
    HttpResponse::Ok().json(show_suggestions(query, repo.get_ref()))
}
