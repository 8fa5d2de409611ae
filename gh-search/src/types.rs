//! Core types: the facet catalog, selected filter sets and normalized results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// Label attached to every result of a search issued with no facets selected.
pub const ALL_FIELDS_LABEL: &str = "All fields";

/// The two entity types the GitHub search API can return.
///
/// Ordering is significant: users sort before repositories in a merged
/// result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A GitHub user or organisation account.
    User,
    /// A GitHub repository.
    #[serde(rename = "repo")]
    Repository,
}

impl EntityKind {
    /// Short tag used in result keys and display (`user` / `repo`).
    pub fn tag(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Repository => "repo",
        }
    }

    /// Path segment of the GitHub search endpoint for this entity.
    pub fn search_path(&self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Repository => "repositories",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// How a facet is expressed in the upstream query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetMapping {
    /// Restrict free-text matching to a field via `in:<field>`.
    TextField(&'static str),
    /// Append an exact `<qualifier>:<value>` term.
    Qualifier(&'static str),
}

/// Keys of the static facet catalog.
///
/// Declaration order is catalog order; `matched_by` labels follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKey {
    /// Match the account login.
    Username,
    /// Match the account display name.
    Name,
    /// Filter accounts by location.
    Location,
    /// Match the repository name.
    Repo,
    /// Filter repositories by primary language.
    Language,
}

impl FilterKey {
    /// All catalog keys, in catalog order.
    pub fn all() -> &'static [FilterKey] {
        &[
            Self::Username,
            Self::Name,
            Self::Location,
            Self::Repo,
            Self::Language,
        ]
    }

    /// The stable string key (`"username"`, `"repo"`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Name => "name",
            Self::Location => "location",
            Self::Repo => "repo",
            Self::Language => "language",
        }
    }

    /// Human-readable label recorded in `matched_by`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Username => "By Username",
            Self::Name => "By Display Name",
            Self::Location => "By Location",
            Self::Repo => "By Repo",
            Self::Language => "By Language",
        }
    }

    /// Which entity this facet applies to. Fixed per key.
    pub fn target(&self) -> EntityKind {
        match self {
            Self::Username | Self::Name | Self::Location => EntityKind::User,
            Self::Repo | Self::Language => EntityKind::Repository,
        }
    }

    /// How this facet is rendered into a GitHub query string.
    pub fn mapping(&self) -> FacetMapping {
        match self {
            Self::Username => FacetMapping::TextField("login"),
            Self::Name => FacetMapping::TextField("name"),
            Self::Location => FacetMapping::Qualifier("location"),
            Self::Repo => FacetMapping::TextField("name"),
            Self::Language => FacetMapping::Qualifier("language"),
        }
    }

    /// The catalog entry for this key.
    pub fn filter(&self) -> SearchFilter {
        SearchFilter {
            key: *self,
            label: self.label(),
            target: self.target(),
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FilterKey {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|k| k.key() == wanted)
            .ok_or_else(|| SearchError::InvalidInput(format!("unknown filter key `{}`", s.trim())))
    }
}

/// One selectable facet of the static catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchFilter {
    /// Unique identifier.
    pub key: FilterKey,
    /// Human-readable description.
    pub label: &'static str,
    /// Entity the facet applies to.
    pub target: EntityKind,
}

/// The full facet catalog, in catalog order.
pub fn catalog() -> Vec<SearchFilter> {
    FilterKey::all().iter().map(FilterKey::filter).collect()
}

/// Facets chosen for one search. Empty means "search everything".
pub type SelectedFilterSet = BTreeSet<FilterKey>;

/// Parse a list of string keys into a [`SelectedFilterSet`].
///
/// Duplicate keys collapse. Unknown keys are rejected.
pub fn parse_filters<I, S>(keys: I) -> Result<SelectedFilterSet, SearchError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keys.into_iter().map(|k| k.as_ref().parse()).collect()
}

/// Identity of a result: entity kind plus numeric GitHub id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultKey {
    /// Entity kind.
    pub kind: EntityKind,
    /// GitHub numeric id.
    pub id: u64,
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.id)
    }
}

/// Repository owner as embedded in repository search hits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// A user returned by `/search/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResult {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    /// Labels of the facets this hit was requested under.
    pub matched_by: Vec<String>,
    /// The untouched upstream item.
    pub raw: serde_json::Value,
}

/// A repository returned by `/search/repositories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoResult {
    pub id: u64,
    pub full_name: String,
    pub name: String,
    pub owner: Owner,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
    /// Labels of the facets this hit was requested under.
    pub matched_by: Vec<String>,
    /// The untouched upstream item.
    pub raw: serde_json::Value,
}

/// A normalized search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResultItem {
    User(UserResult),
    Repo(RepoResult),
}

impl ResultItem {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::User,
            Self::Repo(_) => EntityKind::Repository,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Self::User(u) => u.id,
            Self::Repo(r) => r.id,
        }
    }

    /// Unique `(kind, id)` key used for deduplication.
    pub fn key(&self) -> ResultKey {
        ResultKey {
            kind: self.kind(),
            id: self.id(),
        }
    }

    /// Login for users, `owner/name` for repositories.
    pub fn title(&self) -> &str {
        match self {
            Self::User(u) => &u.login,
            Self::Repo(r) => &r.full_name,
        }
    }

    pub fn html_url(&self) -> &str {
        match self {
            Self::User(u) => &u.html_url,
            Self::Repo(r) => &r.html_url,
        }
    }

    /// Account avatar; repositories use their owner's avatar.
    pub fn avatar_url(&self) -> &str {
        match self {
            Self::User(u) => &u.avatar_url,
            Self::Repo(r) => &r.owner.avatar_url,
        }
    }

    pub fn matched_by(&self) -> &[String] {
        match self {
            Self::User(u) => &u.matched_by,
            Self::Repo(r) => &r.matched_by,
        }
    }

    pub fn matched_by_mut(&mut self) -> &mut Vec<String> {
        match self {
            Self::User(u) => &mut u.matched_by,
            Self::Repo(r) => &mut r.matched_by,
        }
    }
}
