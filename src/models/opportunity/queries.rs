use rusqlite::{Connection, OptionalExtension, Row, ToSql, params, params_from_iter};

use super::types::*;
use crate::db;
use crate::errors::AppError;
use crate::models::context::DataContext;
use crate::models::focus_area;

const SELECT_WITH_BOOKMARK: &str = "SELECT o.*, \
            EXISTS(SELECT 1 FROM bookmarked_opportunities b \
                   WHERE b.opportunity_id = o.id AND b.user_id = ?) AS is_bookmarked \
     FROM opportunities o";

fn row_to_opportunity(row: &Row) -> rusqlite::Result<Opportunity> {
    // focus_areas is a JSON array column; rows predating the taxonomy
    // cleanup may hold NULL or junk, which reads as an empty set.
    let focus_areas = row
        .get::<_, Option<String>>("focus_areas")?
        .as_deref()
        .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
        .unwrap_or_default();

    Ok(Opportunity {
        id: row.get("id")?,
        name: row.get("name")?,
        funder_name: row.get("funder_name")?,
        focus_area: row.get("focus_area")?,
        focus_areas,
        amount: row.get("amount")?,
        deadline: row.get("deadline")?,
        alignment_score: row.get("alignment_score")?,
        compliance_risk_score: row.get("compliance_risk_score")?,
        status: row.get("status")?,
        compliance_notes: row.get("compliance_notes")?,
        application_url: row.get("application_url")?,
        geographic_scope: row.get("geographic_scope")?,
        is_bookmarked: row.get("is_bookmarked")?,
        organization_id: row.get("organization_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Find opportunities visible to the context, filtered and sorted by
/// deadline with undated rows last. Organizations see the global
/// catalog plus their private rows; freelancers see the global catalog
/// only.
pub fn find_all(
    conn: &Connection,
    ctx: &DataContext,
    filters: &OpportunityFilters,
) -> Result<Vec<Opportunity>, AppError> {
    find_all_inner(conn, ctx, filters).map_err(|e| AppError::store("fetch opportunities", e))
}

fn find_all_inner(
    conn: &Connection,
    ctx: &DataContext,
    filters: &OpportunityFilters,
) -> rusqlite::Result<Vec<Opportunity>> {
    let mut sql = format!("{SELECT_WITH_BOOKMARK} WHERE 1=1");
    // Bound params in textual order; the bookmark subquery's viewer id
    // comes first. No user id means no row can match.
    let viewer = ctx.user_id().unwrap_or("").to_string();
    let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(viewer)];

    match ctx {
        DataContext::Organization { id, .. } => {
            sql.push_str(" AND (o.organization_id = ? OR o.organization_id IS NULL)");
            params.push(Box::new(id.clone()));
        }
        DataContext::Freelancer { .. } => {
            sql.push_str(" AND o.organization_id IS NULL");
        }
    }

    if let Some(search) = filters.search.as_deref() {
        sql.push_str(" AND (LOWER(o.name) LIKE ? OR LOWER(o.funder_name) LIKE ?)");
        let pattern = format!("%{}%", search.to_lowercase());
        params.push(Box::new(pattern.clone()));
        params.push(Box::new(pattern));
    }

    if !filters.focus_areas.is_empty() {
        // Expand canonical ids to every raw value legacy tagging used.
        let values = focus_area::expand_search_values(&filters.focus_areas);
        let placeholders = vec!["?"; values.len()].join(", ");
        sql.push_str(&format!(" AND o.focus_area IN ({placeholders})"));
        for v in values {
            params.push(Box::new(v));
        }
    }

    if let Some(min) = filters.amount_min {
        sql.push_str(" AND o.amount >= ?");
        params.push(Box::new(min));
    }

    if let Some(max) = filters.amount_max {
        sql.push_str(" AND o.amount <= ?");
        params.push(Box::new(max));
    }

    if let Some(scope) = filters.geographic_scope.as_deref() {
        sql.push_str(" AND o.geographic_scope = ?");
        params.push(Box::new(scope.to_string()));
    }

    if !filters.show_closed {
        sql.push_str(" AND o.status != 'closed'");
    }

    sql.push_str(" ORDER BY (o.deadline IS NULL), o.deadline ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params_from_iter(params.iter().map(|p| p.as_ref())),
        row_to_opportunity,
    )?;
    rows.collect()
}

/// Single opportunity by id, with the viewer's bookmark state. `None`
/// when no row matches — callers must tell "does not exist" apart from
/// store failure.
pub fn find_by_id(
    conn: &Connection,
    ctx: &DataContext,
    id: &str,
) -> Result<Option<Opportunity>, AppError> {
    let sql = format!("{SELECT_WITH_BOOKMARK} WHERE o.id = ?");
    let viewer = ctx.user_id().unwrap_or("");
    conn.query_row(&sql, params![viewer, id], row_to_opportunity)
        .optional()
        .map_err(|e| AppError::store("fetch opportunity", e))
}

/// Toggle the bookmark join-row for the context's user. The flag names
/// the state *before* the toggle, so true removes the bookmark and
/// false adds one. Contexts without a user account are a no-op.
///
/// Double-insert or delete-of-missing is left to the store's uniqueness
/// constraint; there is no pre-check here.
pub fn set_bookmark(
    conn: &Connection,
    ctx: &DataContext,
    opportunity_id: &str,
    is_bookmarked: bool,
) -> Result<(), AppError> {
    let Some(user_id) = ctx.user_id() else {
        return Ok(());
    };

    let result = if is_bookmarked {
        conn.execute(
            "DELETE FROM bookmarked_opportunities WHERE user_id = ? AND opportunity_id = ?",
            params![user_id, opportunity_id],
        )
    } else {
        conn.execute(
            "INSERT INTO bookmarked_opportunities (user_id, opportunity_id, created_at) \
             VALUES (?, ?, ?)",
            params![user_id, opportunity_id, db::now()],
        )
    };

    result
        .map(|_| ())
        .map_err(|e| AppError::store("update bookmark", e))
}
