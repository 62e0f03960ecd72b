//! Focus-area taxonomy: the fixed 10-category catalog, the legacy
//! search-value shim for inconsistently tagged rows, and the match
//! scoring used to rank opportunities against a tenant's interests.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Canonical focus-area ids. Declared in catalog order so the catalog
/// can be indexed by discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FocusAreaId {
    ArtsCulture,
    Education,
    Environment,
    Health,
    HumanServices,
    YouthDevelopment,
    CommunityDevelopment,
    ResearchScience,
    International,
    Other,
}

impl FocusAreaId {
    pub const ALL: [FocusAreaId; 10] = [
        FocusAreaId::ArtsCulture,
        FocusAreaId::Education,
        FocusAreaId::Environment,
        FocusAreaId::Health,
        FocusAreaId::HumanServices,
        FocusAreaId::YouthDevelopment,
        FocusAreaId::CommunityDevelopment,
        FocusAreaId::ResearchScience,
        FocusAreaId::International,
        FocusAreaId::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FocusAreaId::ArtsCulture => "arts-culture",
            FocusAreaId::Education => "education",
            FocusAreaId::Environment => "environment",
            FocusAreaId::Health => "health",
            FocusAreaId::HumanServices => "human-services",
            FocusAreaId::YouthDevelopment => "youth-development",
            FocusAreaId::CommunityDevelopment => "community-development",
            FocusAreaId::ResearchScience => "research-science",
            FocusAreaId::International => "international",
            FocusAreaId::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.as_str() == s)
    }
}

/// One catalog entry. NTEE codes exist for cross-referencing ingestion
/// data; they play no part in scoring.
#[derive(Debug, Clone, Serialize)]
pub struct FocusArea {
    pub id: FocusAreaId,
    pub label: &'static str,
    pub description: &'static str,
    pub ntee_codes: &'static [&'static str],
    pub sort_order: u8,
    pub active: bool,
}

pub const FOCUS_AREAS: [FocusArea; 10] = [
    FocusArea {
        id: FocusAreaId::ArtsCulture,
        label: "Arts & Culture",
        description: "Museums, performing arts, cultural programs, humanities",
        ntee_codes: &["A"],
        sort_order: 1,
        active: true,
    },
    FocusArea {
        id: FocusAreaId::Education,
        label: "Education",
        description: "K-12, higher education, literacy, vocational training",
        ntee_codes: &["B"],
        sort_order: 2,
        active: true,
    },
    FocusArea {
        id: FocusAreaId::Environment,
        label: "Environment & Animals",
        description: "Conservation, climate, wildlife, sustainability",
        ntee_codes: &["C", "D"],
        sort_order: 3,
        active: true,
    },
    FocusArea {
        id: FocusAreaId::Health,
        label: "Health & Wellness",
        description: "Healthcare, mental health, public health, substance abuse",
        ntee_codes: &["E", "F", "G"],
        sort_order: 4,
        active: true,
    },
    FocusArea {
        id: FocusAreaId::HumanServices,
        label: "Human Services",
        description: "Social services, homelessness, food security, family support",
        ntee_codes: &["I", "J", "K", "L", "M", "N", "O", "P"],
        sort_order: 5,
        active: true,
    },
    FocusArea {
        id: FocusAreaId::YouthDevelopment,
        label: "Youth Development",
        description: "Youth programs, mentoring, after-school, camps",
        ntee_codes: &["O", "P"],
        sort_order: 6,
        active: true,
    },
    FocusArea {
        id: FocusAreaId::CommunityDevelopment,
        label: "Community Development",
        description: "Housing, economic development, community building, neighborhood improvement",
        ntee_codes: &["L", "S"],
        sort_order: 7,
        active: true,
    },
    FocusArea {
        id: FocusAreaId::ResearchScience,
        label: "Research & Science",
        description: "Scientific research, STEM education, technology innovation",
        ntee_codes: &["U", "H"],
        sort_order: 8,
        active: true,
    },
    FocusArea {
        id: FocusAreaId::International,
        label: "International",
        description: "International development, global health, foreign aid",
        ntee_codes: &["Q"],
        sort_order: 9,
        active: true,
    },
    FocusArea {
        id: FocusAreaId::Other,
        label: "Other",
        description: "Other causes and programs not listed above",
        ntee_codes: &["Y", "Z"],
        sort_order: 10,
        active: true,
    },
];

/// All 10 catalog entries in sort order.
pub fn all_focus_areas() -> &'static [FocusArea] {
    &FOCUS_AREAS
}

pub fn focus_area(id: FocusAreaId) -> &'static FocusArea {
    &FOCUS_AREAS[id as usize]
}

/// Every raw value the `focus_area` column has historically held for a
/// canonical id: the id itself, the display label, and the legacy
/// variants the ingestion cleanup scripts have encountered. This is a
/// data-quality shim — once ingestion writes canonical ids only, the
/// extra variants can be retired.
pub fn search_values(id: FocusAreaId) -> &'static [&'static str] {
    match id {
        FocusAreaId::ArtsCulture => &["arts-culture", "Arts & Culture", "Arts", "arts", "AR"],
        FocusAreaId::Education => &["education", "Education", "ED"],
        FocusAreaId::Environment => {
            &["environment", "Environment", "Environment & Animals", "ENV"]
        }
        FocusAreaId::Health => {
            &["health", "Health", "health-wellness", "Health & Wellness", "HL"]
        }
        FocusAreaId::HumanServices => {
            &["human-services", "Human Services", "Social Services", "ISS"]
        }
        FocusAreaId::YouthDevelopment => &["youth-development", "Youth Development"],
        FocusAreaId::CommunityDevelopment => {
            &["community-development", "Community Development", "Community", "CD"]
        }
        FocusAreaId::ResearchScience => &[
            "research-science",
            "Research & Science",
            "Research & Innovation",
            "Research",
            "Science",
            "NR",
            "ST",
            "RD",
        ],
        FocusAreaId::International => &["international", "International"],
        FocusAreaId::Other => &["other", "Other", "O", "OZ"],
    }
}

/// Expand filter ids into every raw value they may appear as in the
/// store. Ids that don't parse as canonical are kept verbatim so a
/// stale filter still matches rows tagged with that exact string.
pub fn expand_search_values(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for raw in ids {
        match FocusAreaId::parse(raw) {
            Some(id) => {
                for v in search_values(id) {
                    if seen.insert(*v) {
                        values.push((*v).to_string());
                    }
                }
            }
            None => {
                if seen.insert(raw.as_str()) {
                    values.push(raw.clone());
                }
            }
        }
    }
    values
}

/// Display labels for a list of ids, preserving order and length.
/// Unknown ids echo back verbatim — they indicate stale data, not a
/// caller bug worth halting over.
pub fn labels_for(ids: &[String]) -> Vec<String> {
    ids.iter()
        .map(|raw| match FocusAreaId::parse(raw) {
            Some(id) => focus_area(id).label.to_string(),
            None => raw.clone(),
        })
        .collect()
}

/// Number of the tenant's declared areas an opportunity touches.
/// Duplicates on either side count once.
pub fn overlap_count(tenant_areas: &[String], opportunity_areas: &[String]) -> usize {
    let tenant: HashSet<&str> = tenant_areas.iter().map(String::as_str).collect();
    let opportunity: HashSet<&str> = opportunity_areas.iter().map(String::as_str).collect();
    tenant.intersection(&opportunity).count()
}

/// Match score in [0, 100]: the share of the *tenant's* declared areas
/// the opportunity covers, rounded half-up. Zero when either side is
/// empty — an untagged opportunity cannot be judged, and a tenant with
/// no declared areas cannot judge.
///
/// The denominator is deliberately the tenant's area count, not the
/// union or the opportunity's count: an opportunity covering all of a
/// tenant's interests scores 100 even when it carries extra tags, while
/// one covering half of them scores 50 no matter how few tags it has.
pub fn match_score(tenant_areas: &[String], opportunity_areas: &[String]) -> u8 {
    let tenant: HashSet<&str> = tenant_areas.iter().map(String::as_str).collect();
    let opportunity: HashSet<&str> = opportunity_areas.iter().map(String::as_str).collect();
    if tenant.is_empty() || opportunity.is_empty() {
        return 0;
    }
    let overlap = tenant.intersection(&opportunity).count();
    ((overlap as f64 / tenant.len() as f64) * 100.0).round() as u8
}

/// Anything carrying a focus-area tag list can be ranked.
pub trait HasFocusAreas {
    fn focus_areas(&self) -> &[String];
}

/// Stable-sorted copy of `items`, best matches first: match score
/// descending, then raw overlap count descending, then input order.
/// The input is never mutated. Items with no tag list sort as score 0.
pub fn rank_by_match<T: HasFocusAreas + Clone>(items: &[T], tenant_areas: &[String]) -> Vec<T> {
    let mut ranked = items.to_vec();
    // Vec::sort_by is stable, which is what keeps tied items in input order.
    ranked.sort_by(|a, b| {
        let a_key = (
            match_score(tenant_areas, a.focus_areas()),
            overlap_count(tenant_areas, a.focus_areas()),
        );
        let b_key = (
            match_score(tenant_areas, b.focus_areas()),
            overlap_count(tenant_areas, b.focus_areas()),
        );
        b_key.cmp(&a_key)
    });
    ranked
}
