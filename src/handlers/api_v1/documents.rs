use std::collections::HashMap;

use actix_web::{HttpResponse, web};

use super::context_from_query;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::service::UnifiedDataService;

/// GET /api/v1/documents - The context's documents, newest first.
pub async fn list(
    pool: web::Data<DbPool>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let ctx = context_from_query(&query)?;
    let conn = pool.get()?;
    let documents = UnifiedDataService::new(&conn, ctx).fetch_documents()?;
    Ok(HttpResponse::Ok().json(documents))
}
