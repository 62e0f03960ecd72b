//! Shared test infrastructure for the data-access tests.
//!
//! Every test runs against its own temporary SQLite database with the
//! real schema applied, so context-scoping and cascade behavior are
//! exercised for real.

#![allow(dead_code)]

use rusqlite::{Connection, params};
use tempfile::TempDir;

use grantdesk::db::{self, MIGRATIONS};
use grantdesk::models::context::DataContext;

pub const ORG_ID: &str = "org-1";
pub const OTHER_ORG_ID: &str = "org-2";
pub const CLIENT_ID: &str = "client-1";
pub const FREELANCER_USER: &str = "freelancer-user-1";

/// Temp database with schema applied. Keep the TempDir alive for as
/// long as the Connection.
pub fn setup_test_db() -> (TempDir, Connection) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let conn = Connection::open(&db_path).expect("Failed to open test DB");

    conn.execute_batch("PRAGMA foreign_keys=ON;")
        .expect("Failed to set pragmas");
    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");

    (dir, conn)
}

/// Pooled variant for handler-level tests.
pub fn setup_test_pool() -> (TempDir, db::DbPool) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let pool = db::init_pool(db_path.to_str().unwrap());
    db::run_migrations(&pool);
    (dir, pool)
}

pub fn org_context() -> DataContext {
    DataContext::Organization {
        id: ORG_ID.to_string(),
        name: "Helping Hands".to_string(),
    }
}

pub fn freelancer_context() -> DataContext {
    DataContext::Freelancer {
        id: CLIENT_ID.to_string(),
        user_id: FREELANCER_USER.to_string(),
        name: "Acme Client".to_string(),
    }
}

pub fn insert_opportunity(
    conn: &Connection,
    id: &str,
    name: &str,
    organization_id: Option<&str>,
    status: &str,
    deadline: Option<&str>,
    focus_area: Option<&str>,
    focus_areas: &[&str],
    amount: Option<f64>,
    geographic_scope: Option<&str>,
) {
    let focus_areas_json = serde_json::to_string(focus_areas).unwrap();
    conn.execute(
        "INSERT INTO opportunities (id, name, funder_name, focus_area, focus_areas, amount, \
             deadline, status, geographic_scope, organization_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            id,
            name,
            format!("{name} Fund"),
            focus_area,
            focus_areas_json,
            amount,
            deadline,
            status,
            geographic_scope,
            organization_id,
            db::now(),
            db::now(),
        ],
    )
    .unwrap();
}

/// Raw proposal insert for read-path tests; write-path tests go through
/// the service instead.
pub fn insert_proposal(
    conn: &Connection,
    id: &str,
    context_type: &str,
    context_id: &str,
    organization_id: Option<&str>,
    freelancer_user_id: Option<&str>,
    opportunity_name: &str,
    updated_at: &str,
) {
    conn.execute(
        "INSERT INTO proposals (id, context_type, context_id, organization_id, \
             freelancer_user_id, opportunity_name, status, progress, checklist_status, \
             created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, 'draft', 0, 'pending', ?, ?)",
        params![
            id,
            context_type,
            context_id,
            organization_id,
            freelancer_user_id,
            opportunity_name,
            updated_at,
            updated_at,
        ],
    )
    .unwrap();
}

pub fn insert_user(conn: &Connection, id: &str, email: &str) {
    conn.execute(
        "INSERT INTO users (id, email) VALUES (?, ?)",
        params![id, email],
    )
    .unwrap();
}

pub fn insert_comment(
    conn: &Connection,
    id: &str,
    proposal_id: &str,
    user_id: &str,
    content: &str,
    created_at: &str,
) {
    conn.execute(
        "INSERT INTO proposal_comments (id, proposal_id, user_id, content, created_at) \
         VALUES (?, ?, ?, ?, ?)",
        params![id, proposal_id, user_id, content, created_at],
    )
    .unwrap();
}

pub fn insert_section(
    conn: &Connection,
    id: &str,
    proposal_id: &str,
    title: &str,
    sort_order: i64,
) {
    conn.execute(
        "INSERT INTO proposal_sections (id, proposal_id, title, content, sort_order, updated_at) \
         VALUES (?, ?, ?, '', ?, ?)",
        params![id, proposal_id, title, sort_order, db::now()],
    )
    .unwrap();
}

pub fn insert_document(
    conn: &Connection,
    id: &str,
    organization_id: &str,
    name: &str,
    created_at: &str,
) {
    conn.execute(
        "INSERT INTO documents (id, organization_id, name, type, created_at, updated_at) \
         VALUES (?, ?, ?, 'upload', ?, ?)",
        params![id, organization_id, name, created_at, created_at],
    )
    .unwrap();
}
