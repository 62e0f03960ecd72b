use std::collections::HashMap;

use actix_web::{HttpResponse, web};

use super::context_from_query;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::proposal::{DraftInput, NewProposal, ProposalUpdate};
use crate::service::UnifiedDataService;

/// GET /api/v1/proposals - The context's proposals, most recently
/// updated first, with drafts and sections.
pub async fn list(
    pool: web::Data<DbPool>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let ctx = context_from_query(&query)?;
    let conn = pool.get()?;
    let proposals = UnifiedDataService::new(&conn, ctx).fetch_proposals()?;
    Ok(HttpResponse::Ok().json(proposals))
}

/// GET /api/v1/proposals/{id} - Single proposal with draft, sections,
/// and comments.
pub async fn read(
    pool: web::Data<DbPool>,
    query: web::Query<HashMap<String, String>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = context_from_query(&query)?;
    let conn = pool.get()?;
    match UnifiedDataService::new(&conn, ctx).get_proposal(&path)? {
        Some(proposal) => Ok(HttpResponse::Ok().json(proposal)),
        None => Err(AppError::NotFound),
    }
}

/// POST /api/v1/proposals - Create a proposal for the context in the body.
pub async fn create(
    pool: web::Data<DbPool>,
    query: web::Query<HashMap<String, String>>,
    body: web::Json<NewProposal>,
) -> Result<HttpResponse, AppError> {
    let ctx = context_from_query(&query)?;
    let conn = pool.get()?;
    let proposal = UnifiedDataService::new(&conn, ctx).create_proposal(&body)?;
    Ok(HttpResponse::Created().json(proposal))
}

/// PUT /api/v1/proposals/{id} - Partial update; a draft in the body
/// also upserts the draft sub-entity.
pub async fn update(
    pool: web::Data<DbPool>,
    query: web::Query<HashMap<String, String>>,
    path: web::Path<String>,
    body: web::Json<ProposalUpdate>,
) -> Result<HttpResponse, AppError> {
    let ctx = context_from_query(&query)?;
    let conn = pool.get()?;
    let proposal = UnifiedDataService::new(&conn, ctx).update_proposal(&path, &body)?;
    Ok(HttpResponse::Ok().json(proposal))
}

/// PUT /api/v1/proposals/{id}/draft - Standalone draft upsert, used by
/// editor autosave.
pub async fn update_draft(
    pool: web::Data<DbPool>,
    query: web::Query<HashMap<String, String>>,
    path: web::Path<String>,
    body: web::Json<DraftInput>,
) -> Result<HttpResponse, AppError> {
    let ctx = context_from_query(&query)?;
    let conn = pool.get()?;
    UnifiedDataService::new(&conn, ctx).update_proposal_draft(&path, &body.html)?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/v1/proposals/{id} - Hard delete.
pub async fn delete(
    pool: web::Data<DbPool>,
    query: web::Query<HashMap<String, String>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = context_from_query(&query)?;
    let conn = pool.get()?;
    UnifiedDataService::new(&conn, ctx).delete_proposal(&path)?;
    Ok(HttpResponse::NoContent().finish())
}
