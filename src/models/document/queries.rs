use rusqlite::{Connection, Row, params};

use super::types::*;
use crate::errors::AppError;
use crate::models::context::DataContext;

fn row_to_document(row: &Row, ctx: &DataContext) -> rusqlite::Result<Document> {
    let metadata = row
        .get::<_, Option<String>>("metadata")?
        .as_deref()
        .and_then(|raw| serde_json::from_str(raw).ok());

    Ok(Document {
        id: row.get("id")?,
        context_type: ctx.context_type(),
        context_id: ctx.context_id().to_string(),
        name: row.get("name")?,
        doc_type: row.get("type")?,
        file_path: row.get("file_path")?,
        file_size: row.get("file_size")?,
        mime_type: row.get("mime_type")?,
        metadata,
        uploaded_by: row.get("uploaded_by")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// The context's documents, newest first. Both tenant kinds scope
/// through the organization column — freelancer clients are stored as
/// organization-like rows, a store denormalization replicated here
/// rather than abstracted away.
pub fn find_all(conn: &Connection, ctx: &DataContext) -> Result<Vec<Document>, AppError> {
    find_all_inner(conn, ctx).map_err(|e| AppError::store("fetch documents", e))
}

fn find_all_inner(conn: &Connection, ctx: &DataContext) -> rusqlite::Result<Vec<Document>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM documents WHERE organization_id = ? ORDER BY created_at DESC",
    )?;
    let rows = stmt.query_map(params![ctx.context_id()], |row| row_to_document(row, ctx))?;
    rows.collect()
}
