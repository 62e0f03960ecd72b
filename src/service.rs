//! Unified data service: the one place tenant context turns into store
//! queries, so nothing downstream branches on tenant kind again.

use rusqlite::Connection;

use crate::errors::AppError;
use crate::models::context::DataContext;
use crate::models::document::{self, Document};
use crate::models::opportunity::{self, Opportunity, OpportunityFilters};
use crate::models::proposal::{self, NewProposal, Proposal, ProposalUpdate};

/// Context-bound façade over the store. One instance per logical
/// request: it captures a single `DataContext` at construction and must
/// never be shared across tenants, or queries scope to the wrong one.
///
/// Every method is a single round trip with no retry, cache, or
/// client-side locking; resilience belongs to callers.
pub struct UnifiedDataService<'a> {
    conn: &'a Connection,
    context: DataContext,
}

impl<'a> UnifiedDataService<'a> {
    pub fn new(conn: &'a Connection, context: DataContext) -> Self {
        UnifiedDataService { conn, context }
    }

    pub fn context(&self) -> &DataContext {
        &self.context
    }

    /// Opportunities visible to this context, filtered and sorted by
    /// deadline (undated rows last).
    pub fn fetch_opportunities(
        &self,
        filters: &OpportunityFilters,
    ) -> Result<Vec<Opportunity>, AppError> {
        opportunity::queries::find_all(self.conn, &self.context, filters)
    }

    /// `None` means the row does not exist, which is distinct from a
    /// store failure.
    pub fn get_opportunity(&self, id: &str) -> Result<Option<Opportunity>, AppError> {
        opportunity::queries::find_by_id(self.conn, &self.context, id)
    }

    /// Toggle a bookmark. `is_bookmarked` names the current state, so
    /// true removes and false adds. No-op without a user account.
    pub fn bookmark_opportunity(&self, id: &str, is_bookmarked: bool) -> Result<(), AppError> {
        opportunity::queries::set_bookmark(self.conn, &self.context, id, is_bookmarked)
    }

    /// This context's proposals, most recently updated first, with
    /// drafts and sections included.
    pub fn fetch_proposals(&self) -> Result<Vec<Proposal>, AppError> {
        proposal::queries::find_all(self.conn, &self.context)
    }

    /// Single proposal with draft, sections, and comments.
    pub fn get_proposal(&self, id: &str) -> Result<Option<Proposal>, AppError> {
        proposal::queries::find_by_id(self.conn, &self.context, id)
    }

    pub fn create_proposal(&self, input: &NewProposal) -> Result<Proposal, AppError> {
        proposal::queries::create(self.conn, &self.context, input)
    }

    pub fn update_proposal(&self, id: &str, changes: &ProposalUpdate) -> Result<Proposal, AppError> {
        proposal::queries::update(self.conn, &self.context, id, changes)
    }

    pub fn update_proposal_draft(&self, proposal_id: &str, html: &str) -> Result<(), AppError> {
        proposal::queries::update_draft(self.conn, proposal_id, html)
    }

    pub fn delete_proposal(&self, id: &str) -> Result<(), AppError> {
        proposal::queries::delete(self.conn, id)
    }

    pub fn fetch_documents(&self) -> Result<Vec<Document>, AppError> {
        document::queries::find_all(self.conn, &self.context)
    }
}
