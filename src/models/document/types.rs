use serde::{Deserialize, Serialize};

use crate::models::context::ContextType;

/// File record tied to a tenant context. Upload and removal happen in
/// flows outside this core; it only lists them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub context_type: ContextType,
    pub context_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub file_path: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub uploaded_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
