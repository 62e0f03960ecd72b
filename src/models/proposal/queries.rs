use rusqlite::{Connection, OptionalExtension, Row, ToSql, params, params_from_iter};

use super::types::*;
use crate::db;
use crate::errors::AppError;
use crate::models::context::{ContextType, DataContext};

fn row_to_proposal(row: &Row, ctx: &DataContext) -> rusqlite::Result<Proposal> {
    let organization_id: Option<String> = row.get("organization_id")?;
    // Rows predating the unification migration have no context columns;
    // they are organization proposals keyed by organization_id.
    let context_type = row
        .get::<_, Option<String>>("context_type")?
        .as_deref()
        .and_then(ContextType::parse)
        .unwrap_or(ContextType::Organization);
    let context_id = row
        .get::<_, Option<String>>("context_id")?
        .or_else(|| organization_id.clone())
        .unwrap_or_default();

    Ok(Proposal {
        id: row.get("id")?,
        context_type,
        context_id,
        context_name: ctx.name().to_string(),
        opportunity_id: row.get("opportunity_id")?,
        opportunity_name: row.get("opportunity_name")?,
        owner_name: row.get("owner_name")?,
        status: row.get("status")?,
        progress: row.get("progress")?,
        due_date: row.get("due_date")?,
        checklist_status: row.get("checklist_status")?,
        compliance_summary: row.get("compliance_summary")?,
        draft: None,
        sections: Vec::new(),
        comments: Vec::new(),
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        organization_id,
        freelancer_user_id: row.get("freelancer_user_id")?,
    })
}

fn load_draft(conn: &Connection, proposal_id: &str) -> rusqlite::Result<Option<ProposalDraft>> {
    conn.query_row(
        "SELECT id, draft_html, last_edited_at FROM proposal_drafts WHERE proposal_id = ?",
        params![proposal_id],
        |row| {
            Ok(ProposalDraft {
                id: row.get(0)?,
                html: row.get(1)?,
                last_edited_at: row.get(2)?,
            })
        },
    )
    .optional()
}

fn load_sections(conn: &Connection, proposal_id: &str) -> rusqlite::Result<Vec<ProposalSection>> {
    let mut stmt = conn.prepare(
        "SELECT id, proposal_id, title, content, token_count, sort_order, updated_at \
         FROM proposal_sections WHERE proposal_id = ? ORDER BY sort_order ASC",
    )?;
    let rows = stmt.query_map(params![proposal_id], |row| {
        Ok(ProposalSection {
            id: row.get(0)?,
            proposal_id: row.get(1)?,
            title: row.get(2)?,
            content: row.get(3)?,
            token_count: row.get(4)?,
            sort_order: row.get(5)?,
            updated_at: row.get(6)?,
        })
    })?;
    rows.collect()
}

fn load_comments(conn: &Connection, proposal_id: &str) -> rusqlite::Result<Vec<ProposalComment>> {
    // The email join is a convenience projection: an author missing from
    // the identity store yields an empty email, not a dropped comment.
    let mut stmt = conn.prepare(
        "SELECT c.id, c.proposal_id, c.user_id, COALESCE(u.email, '') AS user_email, \
                c.content, c.created_at \
         FROM proposal_comments c \
         LEFT JOIN users u ON c.user_id = u.id \
         WHERE c.proposal_id = ? ORDER BY c.created_at ASC",
    )?;
    let rows = stmt.query_map(params![proposal_id], |row| {
        Ok(ProposalComment {
            id: row.get(0)?,
            proposal_id: row.get(1)?,
            user_id: row.get(2)?,
            user_email: row.get(3)?,
            content: row.get(4)?,
            created_at: row.get(5)?,
        })
    })?;
    rows.collect()
}

/// All of the context's proposals, most recently updated first, each
/// with its draft and ordered sections (comments load on the single
/// fetch only).
///
/// Freelancer scoping needs all three predicates — context type, the
/// freelancer's own user id, and the client id — or rows leak across
/// clients or across freelancers.
pub fn find_all(conn: &Connection, ctx: &DataContext) -> Result<Vec<Proposal>, AppError> {
    find_all_inner(conn, ctx).map_err(|e| AppError::store("fetch proposals", e))
}

fn find_all_inner(conn: &Connection, ctx: &DataContext) -> rusqlite::Result<Vec<Proposal>> {
    let (sql, query_params): (&str, Vec<&str>) = match ctx {
        DataContext::Organization { id, .. } => (
            "SELECT * FROM proposals WHERE organization_id = ? ORDER BY updated_at DESC",
            vec![id.as_str()],
        ),
        DataContext::Freelancer { id, user_id, .. } => (
            "SELECT * FROM proposals \
             WHERE context_type = 'freelancer' AND freelancer_user_id = ? AND context_id = ? \
             ORDER BY updated_at DESC",
            vec![user_id.as_str(), id.as_str()],
        ),
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params_from_iter(query_params), |row| {
        row_to_proposal(row, ctx)
    })?;
    let mut proposals: Vec<Proposal> = rows.collect::<Result<_, _>>()?;

    for proposal in &mut proposals {
        proposal.draft = load_draft(conn, &proposal.id)?;
        proposal.sections = load_sections(conn, &proposal.id)?;
    }
    Ok(proposals)
}

/// Single proposal by id with draft, sections, and comments. Not
/// context-filtered: ids are globally unique and access control sits in
/// front of this layer.
pub fn find_by_id(
    conn: &Connection,
    ctx: &DataContext,
    id: &str,
) -> Result<Option<Proposal>, AppError> {
    find_by_id_inner(conn, ctx, id).map_err(|e| AppError::store("fetch proposal", e))
}

fn find_by_id_inner(
    conn: &Connection,
    ctx: &DataContext,
    id: &str,
) -> rusqlite::Result<Option<Proposal>> {
    let found = conn
        .query_row("SELECT * FROM proposals WHERE id = ?", params![id], |row| {
            row_to_proposal(row, ctx)
        })
        .optional()?;

    let Some(mut proposal) = found else {
        return Ok(None);
    };
    proposal.draft = load_draft(conn, id)?;
    proposal.sections = load_sections(conn, id)?;
    proposal.comments = load_comments(conn, id)?;
    Ok(Some(proposal))
}

/// Create a proposal for the given input. Progress starts at 0 and the
/// checklist at "pending" regardless of input; status defaults to
/// "draft".
pub fn create(conn: &Connection, ctx: &DataContext, input: &NewProposal) -> Result<Proposal, AppError> {
    let (organization_id, freelancer_user_id) = match input.context_type {
        ContextType::Organization => (Some(input.context_id.as_str()), None),
        ContextType::Freelancer => {
            let user_id = input.freelancer_user_id.as_deref().ok_or_else(|| {
                AppError::Invalid("freelancer_user_id is required for freelancer proposals".into())
            })?;
            (None, Some(user_id))
        }
    };

    let id = db::new_id();
    let now = db::now();
    conn.execute(
        "INSERT INTO proposals (id, context_type, context_id, organization_id, \
             freelancer_user_id, opportunity_id, opportunity_name, owner_name, status, \
             progress, due_date, checklist_status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, 'pending', ?, ?)",
        params![
            id,
            input.context_type.as_str(),
            input.context_id,
            organization_id,
            freelancer_user_id,
            input.opportunity_id,
            input.opportunity_name,
            input.owner_name,
            input.status.as_deref().unwrap_or("draft"),
            input.due_date,
            now,
            now,
        ],
    )
    .map_err(|e| AppError::store("create proposal", e))?;

    find_by_id(conn, ctx, &id)?.ok_or(AppError::NotFound)
}

/// Apply a partial update. The proposal row's updated_at refreshes on
/// every call, even when only the draft changed. The metadata write and
/// the draft write are two independent store requests; if the second
/// fails after the first succeeded, the error propagates and the caller
/// knows state is split.
pub fn update(
    conn: &Connection,
    ctx: &DataContext,
    id: &str,
    changes: &ProposalUpdate,
) -> Result<Proposal, AppError> {
    let mut sets = vec!["updated_at = ?"];
    let mut values: Vec<Box<dyn ToSql>> = vec![Box::new(db::now())];

    if let Some(v) = &changes.opportunity_name {
        sets.push("opportunity_name = ?");
        values.push(Box::new(v.clone()));
    }
    if let Some(v) = &changes.owner_name {
        sets.push("owner_name = ?");
        values.push(Box::new(v.clone()));
    }
    if let Some(v) = &changes.status {
        sets.push("status = ?");
        values.push(Box::new(v.clone()));
    }
    if let Some(v) = changes.progress {
        sets.push("progress = ?");
        values.push(Box::new(v));
    }
    if let Some(v) = &changes.due_date {
        sets.push("due_date = ?");
        values.push(Box::new(v.clone()));
    }
    if let Some(v) = &changes.checklist_status {
        sets.push("checklist_status = ?");
        values.push(Box::new(v.clone()));
    }
    if let Some(v) = &changes.compliance_summary {
        sets.push("compliance_summary = ?");
        values.push(Box::new(v.clone()));
    }

    let sql = format!("UPDATE proposals SET {} WHERE id = ?", sets.join(", "));
    values.push(Box::new(id.to_string()));
    conn.execute(&sql, params_from_iter(values.iter().map(|p| p.as_ref())))
        .map_err(|e| AppError::store("update proposal", e))?;

    if let Some(draft) = &changes.draft {
        update_draft(conn, id, &draft.html)?;
    }

    find_by_id(conn, ctx, id)?.ok_or(AppError::NotFound)
}

/// Upsert the draft sub-entity, refreshing its last-edited timestamp.
/// Usable on its own for autosave paths.
pub fn update_draft(conn: &Connection, proposal_id: &str, html: &str) -> Result<(), AppError> {
    let now = db::now();
    conn.execute(
        "INSERT INTO proposal_drafts (id, proposal_id, draft_html, last_edited_at, \
             created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?) \
         ON CONFLICT (proposal_id) DO UPDATE SET \
             draft_html = excluded.draft_html, \
             last_edited_at = excluded.last_edited_at, \
             updated_at = excluded.updated_at",
        params![db::new_id(), proposal_id, html, now, now, now],
    )
    .map(|_| ())
    .map_err(|e| AppError::store("update proposal draft", e))
}

/// Hard delete. Drafts, sections, and comments go with the row via the
/// store's cascade rules.
pub fn delete(conn: &Connection, id: &str) -> Result<(), AppError> {
    conn.execute("DELETE FROM proposals WHERE id = ?", params![id])
        .map(|_| ())
        .map_err(|e| AppError::store("delete proposal", e))
}
