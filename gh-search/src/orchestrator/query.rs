//! GitHub query-string construction from a free-text query and facets.
//!
//! Text-field facets become a single `in:` restriction; qualifier facets are
//! appended as `qualifier:value` terms, which GitHub ANDs with the base query.
//!
//! ```text
//! {username, name, location} + "linus"  →  linus in:login,name location:linus
//! {}                         + "react"  →  react in:login,in:name,in:bio   (users)
//!                                          react in:name,in:description    (repos)
//! ```

use crate::config::SearchConfig;
use crate::types::{EntityKind, FacetMapping, FilterKey, SelectedFilterSet, ALL_FIELDS_LABEL};

/// Field restriction used for the user branch of a no-facet search.
const FALLBACK_USER_FIELDS: &str = "in:login,in:name,in:bio";

/// Field restriction used for the repository branch of a no-facet search.
const FALLBACK_REPO_FIELDS: &str = "in:name,in:description";

/// One request handed to a [`crate::backend::SearchBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendQuery {
    /// Which search endpoint to hit.
    pub kind: EntityKind,
    /// The complete `q` parameter, unencoded.
    pub q: String,
    /// Requested page size.
    pub per_page: u32,
}

/// A planned branch: the request plus the labels its hits are tagged with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub query: BackendQuery,
    pub labels: Vec<String>,
}

/// Build the `q` string for `query` restricted by `facets`.
///
/// `facets` are rendered in the order given. Qualifier values containing
/// whitespace are quoted so GitHub treats them as one term.
pub fn build_query(query: &str, facets: &[FilterKey]) -> String {
    let mut fields: Vec<&str> = Vec::new();
    let mut qualifiers: Vec<String> = Vec::new();

    for facet in facets {
        match facet.mapping() {
            FacetMapping::TextField(field) => {
                if !fields.contains(&field) {
                    fields.push(field);
                }
            }
            FacetMapping::Qualifier(name) => qualifiers.push(format!("{name}:{}", quote(query))),
        }
    }

    let mut q = query.to_string();
    if !fields.is_empty() {
        q.push_str(" in:");
        q.push_str(&fields.join(","));
    }
    for qualifier in qualifiers {
        q.push(' ');
        q.push_str(&qualifier);
    }
    q
}

/// Plan the upstream requests for one search.
///
/// Facets are partitioned by target entity. Each non-empty partition yields
/// one branch tagged with the labels of every facet in it. With no facets at
/// all, both fallback branches are planned and tagged [`ALL_FIELDS_LABEL`].
/// User branches always precede repository branches.
pub fn plan_branches(query: &str, filters: &SelectedFilterSet, config: &SearchConfig) -> Vec<Branch> {
    if filters.is_empty() {
        return vec![
            Branch {
                query: BackendQuery {
                    kind: EntityKind::User,
                    q: format!("{query} {FALLBACK_USER_FIELDS}"),
                    per_page: config.fallback_per_page,
                },
                labels: vec![ALL_FIELDS_LABEL.to_string()],
            },
            Branch {
                query: BackendQuery {
                    kind: EntityKind::Repository,
                    q: format!("{query} {FALLBACK_REPO_FIELDS}"),
                    per_page: config.fallback_per_page,
                },
                labels: vec![ALL_FIELDS_LABEL.to_string()],
            },
        ];
    }

    [EntityKind::User, EntityKind::Repository]
        .into_iter()
        .filter_map(|kind| {
            let facets: Vec<FilterKey> = filters
                .iter()
                .copied()
                .filter(|f| f.target() == kind)
                .collect();
            if facets.is_empty() {
                return None;
            }
            Some(Branch {
                query: BackendQuery {
                    kind,
                    q: build_query(query, &facets),
                    per_page: config.per_page,
                },
                labels: facets.iter().map(|f| f.label().to_string()).collect(),
            })
        })
        .collect()
}

fn quote(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!("\"{}\"", value.replace('"', ""))
    } else {
        value.to_string()
    }
}
