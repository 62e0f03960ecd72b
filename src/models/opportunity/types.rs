use serde::{Deserialize, Serialize};

use crate::models::focus_area::HasFocusAreas;

/// Funding opportunity in the unified shape both tenant kinds consume.
/// `is_bookmarked` is computed per viewer at fetch time; alignment and
/// compliance-risk scores are written by the ingestion pipeline and
/// only read here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub name: String,
    pub funder_name: String,
    pub focus_area: Option<String>,
    pub focus_areas: Vec<String>,
    pub amount: Option<f64>,
    pub deadline: Option<String>,
    pub alignment_score: Option<f64>,
    pub compliance_risk_score: Option<f64>,
    pub status: String,
    pub compliance_notes: Option<String>,
    pub application_url: Option<String>,
    pub geographic_scope: Option<String>,
    pub is_bookmarked: bool,
    pub organization_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl HasFocusAreas for Opportunity {
    fn focus_areas(&self) -> &[String] {
        &self.focus_areas
    }
}

/// Recognized list filters. All optional; by default closed rows are
/// hidden and nothing else is restricted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OpportunityFilters {
    pub search: Option<String>,
    pub focus_areas: Vec<String>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    pub geographic_scope: Option<String>,
    pub show_closed: bool,
}
