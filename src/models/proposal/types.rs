use serde::{Deserialize, Serialize};

use crate::models::context::ContextType;

/// The single current rich-text body of a proposal, versioned only by
/// its last-edited timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub id: String,
    pub html: String,
    pub last_edited_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalSection {
    pub id: String,
    pub proposal_id: String,
    pub title: String,
    pub content: String,
    pub token_count: Option<i64>,
    pub sort_order: i64,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalComment {
    pub id: String,
    pub proposal_id: String,
    pub user_id: String,
    /// Resolved from the identity store at fetch time; empty when the
    /// author cannot be looked up.
    pub user_email: String,
    pub content: String,
    pub created_at: String,
}

/// Proposal in the unified shape. Belongs to exactly one context:
/// `organization_id` is set for organization proposals, and
/// `freelancer_user_id` for freelancer ones, never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    pub context_type: ContextType,
    pub context_id: String,
    pub context_name: String,
    pub opportunity_id: Option<String>,
    pub opportunity_name: String,
    pub owner_name: Option<String>,
    pub status: String,
    pub progress: i64,
    pub due_date: Option<String>,
    pub checklist_status: String,
    pub compliance_summary: Option<String>,
    pub draft: Option<ProposalDraft>,
    pub sections: Vec<ProposalSection>,
    pub comments: Vec<ProposalComment>,
    pub created_at: String,
    pub updated_at: String,
    pub organization_id: Option<String>,
    pub freelancer_user_id: Option<String>,
}

/// Input for creating a proposal. The opportunity name is denormalized
/// here once and never re-fetched. `freelancer_user_id` must be
/// supplied for freelancer proposals; the context alone does not carry
/// it on write paths.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProposal {
    pub opportunity_id: Option<String>,
    pub opportunity_name: String,
    pub owner_name: String,
    pub context_type: ContextType,
    pub context_id: String,
    #[serde(default)]
    pub freelancer_user_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Partial update; only `Some` fields are written. A `draft` triggers a
/// second, separate write into the draft sub-entity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProposalUpdate {
    pub opportunity_name: Option<String>,
    pub owner_name: Option<String>,
    pub status: Option<String>,
    pub progress: Option<i64>,
    pub due_date: Option<String>,
    pub checklist_status: Option<String>,
    pub compliance_summary: Option<String>,
    pub draft: Option<DraftInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftInput {
    pub html: String,
}
