//! Core search orchestrator: plan branches, fan out, tag, merge.
//!
//! Plans one request per targeted entity (or the two-request fallback),
//! runs them concurrently with independent timeouts, tags every hit with
//! its branch labels, and merges the tagged hits into one ordered set.

use std::time::Duration;

use crate::backend::SearchBackend;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{EntityKind, ResultItem, SelectedFilterSet};

use super::merge::merge;
use super::query::{plan_branches, BackendQuery};

/// A branch that contributed nothing because its request failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchFailure {
    /// Entity the failed request targeted.
    pub kind: EntityKind,
    /// Why it failed.
    pub error: SearchError,
}

/// Everything one search produced.
///
/// `items` is always usable on its own. `failures` lets callers tell
/// "nothing matched" apart from "a branch failed".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    /// Merged, deduplicated results: users first, upstream order within kind.
    pub items: Vec<ResultItem>,
    /// Branches whose request failed and contributed zero items.
    pub failures: Vec<BranchFailure>,
}

impl SearchOutcome {
    /// `true` if no branch failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// `true` if there are no items and at least one branch failed.
    pub fn is_failed(&self) -> bool {
        self.items.is_empty() && !self.failures.is_empty()
    }
}

/// Orchestrate one filtered search.
///
/// # Pipeline
///
/// 1. Trim `query`; below `config.min_query_len` characters return an empty
///    outcome without calling the backend
/// 2. Plan branches from `filters` (see [`plan_branches`])
/// 3. Fan out with [`futures::future::join_all`]; each branch has its own
///    timeout and settles independently
/// 4. Log failures at warn level and record them in
///    [`SearchOutcome::failures`]; failed branches contribute zero items
/// 5. Tag successful hits with their branch labels
/// 6. Deduplicate and order with [`merge`]
///
/// The outcome is assembled only after every branch has settled.
pub async fn orchestrate_search<B: SearchBackend>(
    backend: &B,
    query: &str,
    filters: &SelectedFilterSet,
    config: &SearchConfig,
) -> SearchOutcome {
    let query = query.trim();
    if query.chars().count() < config.min_query_len {
        tracing::debug!(
            min = config.min_query_len,
            "query below minimum length, skipping search"
        );
        return SearchOutcome::default();
    }

    tracing::trace!(query, ?filters, "planning search");
    let branches = plan_branches(query, filters, config);
    let timeout = config.timeout();

    let pending = branches.iter().map(|branch| async move {
        let outcome = run_branch(backend, &branch.query, timeout).await;
        (branch, outcome)
    });
    let outcomes = futures::future::join_all(pending).await;

    let mut tagged: Vec<ResultItem> = Vec::new();
    let mut failures: Vec<BranchFailure> = Vec::new();

    for (branch, outcome) in outcomes {
        let kind = branch.query.kind;
        match outcome {
            Ok(items) => {
                tracing::debug!(%kind, count = items.len(), "search branch returned results");
                tagged.extend(items.into_iter().map(|mut item| {
                    *item.matched_by_mut() = branch.labels.clone();
                    item
                }));
            }
            Err(error) => {
                tracing::warn!(%kind, error = %error, "search branch failed");
                failures.push(BranchFailure { kind, error });
            }
        }
    }

    let items = merge(tagged);
    tracing::debug!(count = items.len(), failed = failures.len(), "search complete");
    SearchOutcome { items, failures }
}

/// Run one branch, converting an elapsed timeout into [`SearchError::Timeout`].
async fn run_branch<B: SearchBackend>(
    backend: &B,
    query: &BackendQuery,
    timeout: Duration,
) -> Result<Vec<ResultItem>, SearchError> {
    match tokio::time::timeout(timeout, backend.search(query)).await {
        Ok(result) => result,
        Err(_) => Err(SearchError::Timeout(format!(
            "{} search exceeded {}s",
            query.kind,
            timeout.as_secs()
        ))),
    }
}
