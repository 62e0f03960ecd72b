use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use super::{context_from_query, csv_param};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::focus_area;
use crate::models::opportunity::{Opportunity, OpportunityFilters};
use crate::service::UnifiedDataService;

fn filters_from_query(query: &HashMap<String, String>) -> OpportunityFilters {
    OpportunityFilters {
        search: query.get("search").cloned(),
        focus_areas: query.get("focus_areas").map(|s| csv_param(s)).unwrap_or_default(),
        amount_min: query.get("amount_min").and_then(|v| v.parse().ok()),
        amount_max: query.get("amount_max").and_then(|v| v.parse().ok()),
        geographic_scope: query.get("geographic_scope").cloned(),
        show_closed: query
            .get("show_closed")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false),
    }
}

#[derive(Serialize)]
struct RankedOpportunity {
    match_score: u8,
    #[serde(flatten)]
    opportunity: Opportunity,
}

/// GET /api/v1/opportunities - List opportunities visible to the context.
/// Query params: context_type, context_id, user_id, search, focus_areas,
/// amount_min, amount_max, geographic_scope, show_closed, and optionally
/// match_areas (comma-separated) to re-rank by focus-area match.
pub async fn list(
    pool: web::Data<DbPool>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let ctx = context_from_query(&query)?;
    let filters = filters_from_query(&query);
    let conn = pool.get()?;
    let service = UnifiedDataService::new(&conn, ctx);
    let opportunities = service.fetch_opportunities(&filters)?;

    if let Some(raw) = query.get("match_areas") {
        let tenant_areas = csv_param(raw);
        let items: Vec<RankedOpportunity> =
            focus_area::rank_by_match(&opportunities, &tenant_areas)
                .into_iter()
                .map(|opportunity| RankedOpportunity {
                    match_score: focus_area::match_score(&tenant_areas, &opportunity.focus_areas),
                    opportunity,
                })
                .collect();
        return Ok(HttpResponse::Ok().json(items));
    }

    Ok(HttpResponse::Ok().json(opportunities))
}

/// GET /api/v1/opportunities/{id} - Single opportunity with the
/// viewer's bookmark state; 404 when no row matches.
pub async fn read(
    pool: web::Data<DbPool>,
    query: web::Query<HashMap<String, String>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = context_from_query(&query)?;
    let conn = pool.get()?;
    let service = UnifiedDataService::new(&conn, ctx);
    match service.get_opportunity(&path)? {
        Some(opportunity) => Ok(HttpResponse::Ok().json(opportunity)),
        None => Err(AppError::NotFound),
    }
}

#[derive(Deserialize)]
pub struct BookmarkRequest {
    /// The bookmark state *before* the toggle; the server performs the
    /// inverse operation.
    pub is_bookmarked: bool,
}

/// POST /api/v1/opportunities/{id}/bookmark - Toggle the viewer's bookmark.
pub async fn bookmark(
    pool: web::Data<DbPool>,
    query: web::Query<HashMap<String, String>>,
    path: web::Path<String>,
    body: web::Json<BookmarkRequest>,
) -> Result<HttpResponse, AppError> {
    let ctx = context_from_query(&query)?;
    let conn = pool.get()?;
    UnifiedDataService::new(&conn, ctx).bookmark_opportunity(&path, body.is_bookmarked)?;
    Ok(HttpResponse::NoContent().finish())
}
