use serde::{Deserialize, Serialize};

/// Which kind of tenant a request is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextType {
    Organization,
    Freelancer,
}

impl ContextType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContextType::Organization => "organization",
            ContextType::Freelancer => "freelancer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "organization" => Some(ContextType::Organization),
            "freelancer" => Some(ContextType::Freelancer),
            _ => None,
        }
    }
}

/// The tenant identity a data request runs on behalf of. Exactly one
/// variant is active for the lifetime of a `UnifiedDataService`, so
/// organization-scoped and freelancer-scoped filters can never mix.
///
/// For `Freelancer`, `id` names the client record (the freelancer's
/// customer) while `user_id` names the freelancer's own account; both
/// are needed to scope proposals correctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataContext {
    Organization { id: String, name: String },
    Freelancer { id: String, user_id: String, name: String },
}

impl DataContext {
    pub fn context_type(&self) -> ContextType {
        match self {
            DataContext::Organization { .. } => ContextType::Organization,
            DataContext::Freelancer { .. } => ContextType::Freelancer,
        }
    }

    /// The organization id or client id this context is scoped to.
    pub fn context_id(&self) -> &str {
        match self {
            DataContext::Organization { id, .. } => id,
            DataContext::Freelancer { id, .. } => id,
        }
    }

    /// The account bookmarks are keyed by. Organization contexts carry no
    /// user account, so their bookmark state always reads as false.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            DataContext::Organization { .. } => None,
            DataContext::Freelancer { user_id, .. } => Some(user_id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DataContext::Organization { name, .. } => name,
            DataContext::Freelancer { name, .. } => name,
        }
    }
}
