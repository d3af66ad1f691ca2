use actix_web::{HttpRequest, HttpResponse, Responder, get};

use crate::services::ServiceError;
use crate::services::filters::normalize_filter_query;

#[get("/v1/filters/normalize")]
/// Return the canonical params, state and query string for a listings URL query.
pub async fn normalize_filters(req: HttpRequest) -> impl Responder {
    match normalize_filter_query(req.query_string()) {
        Ok(normalized) => HttpResponse::Ok().json(normalized),
        Err(ServiceError::Form(message)) => HttpResponse::BadRequest().body(message),
        Err(err) => {
            log::error!("Failed to normalize filter query: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
