pub mod documents;
pub mod focus_areas;
pub mod opportunities;
pub mod proposals;

use std::collections::HashMap;

use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};

use crate::errors::AppError;
use crate::models::context::DataContext;

/// CSRF guard for the JSON mutation endpoints: a cross-origin form POST
/// cannot carry an application/json content type, so requiring it on
/// mutations blocks those without a token round trip. Reads are exempt.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST
        || method == actix_web::http::Method::PUT
        || method == actix_web::http::Method::DELETE
    {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = serde_json::json!({
                "error": "Content-Type must be application/json for mutation requests"
            });
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Build the request's tenant context from its query parameters. Each
/// request gets its own context — and its own `UnifiedDataService` —
/// so nothing scoped to one tenant can serve another.
pub(crate) fn context_from_query(
    query: &HashMap<String, String>,
) -> Result<DataContext, AppError> {
    let context_type = query
        .get("context_type")
        .map(String::as_str)
        .unwrap_or("organization");
    let id = query
        .get("context_id")
        .cloned()
        .ok_or_else(|| AppError::Invalid("context_id is required".into()))?;
    let name = query.get("context_name").cloned().unwrap_or_default();

    match context_type {
        "organization" => Ok(DataContext::Organization { id, name }),
        "freelancer" => {
            let user_id = query.get("user_id").cloned().ok_or_else(|| {
                AppError::Invalid("user_id is required for freelancer context".into())
            })?;
            Ok(DataContext::Freelancer { id, user_id, name })
        }
        other => Err(AppError::Invalid(format!("unknown context_type: {other}"))),
    }
}

/// Split a comma-separated query value into trimmed, non-empty parts.
pub(crate) fn csv_param(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Configure API v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/opportunities")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(opportunities::list))
            .route("/{id}", web::get().to(opportunities::read))
            .route("/{id}/bookmark", web::post().to(opportunities::bookmark)),
    );
    cfg.service(
        web::scope("/proposals")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(proposals::list))
            .route("", web::post().to(proposals::create))
            .route("/{id}", web::get().to(proposals::read))
            .route("/{id}", web::put().to(proposals::update))
            .route("/{id}", web::delete().to(proposals::delete))
            .route("/{id}/draft", web::put().to(proposals::update_draft)),
    );
    cfg.service(web::scope("/documents").route("", web::get().to(documents::list)));
    cfg.service(web::scope("/focus-areas").route("", web::get().to(focus_areas::list)));
}
