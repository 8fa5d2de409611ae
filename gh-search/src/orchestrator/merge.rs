//! Result merging: deduplicate by `(kind, id)` and order users first.
//!
//! When the same entity arrives more than once, the first occurrence keeps
//! its position and the later occurrences only contribute their
//! `matched_by` labels (order-preserving set union).

use std::collections::HashMap;

use crate::types::{ResultItem, ResultKey};

/// Merge tagged hits from every branch into one ordered result set.
///
/// 1. Deduplicate by [`ResultKey`], unioning `matched_by` labels.
/// 2. Stable-sort so every user precedes every repository.
///
/// Relative order within each kind is the order of first appearance, i.e.
/// the upstream relevance order.
pub fn merge(items: Vec<ResultItem>) -> Vec<ResultItem> {
    let mut positions: HashMap<ResultKey, usize> = HashMap::new();
    let mut merged: Vec<ResultItem> = Vec::with_capacity(items.len());

    for item in items {
        match positions.get(&item.key()) {
            Some(&index) => union_labels(merged[index].matched_by_mut(), item.matched_by()),
            None => {
                let mut item = item;
                dedup_labels(item.matched_by_mut());
                positions.insert(item.key(), merged.len());
                merged.push(item);
            }
        }
    }

    // `sort_by_key` is stable, so upstream order survives within each kind.
    merged.sort_by_key(ResultItem::kind);
    merged
}

fn union_labels(into: &mut Vec<String>, from: &[String]) {
    for label in from {
        if !into.contains(label) {
            into.push(label.clone());
        }
    }
}

fn dedup_labels(labels: &mut Vec<String>) {
    let mut seen: Vec<String> = Vec::with_capacity(labels.len());
    labels.retain(|label| {
        if seen.contains(label) {
            false
        } else {
            seen.push(label.clone());
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityKind, Owner, RepoResult, UserResult};
    use std::collections::HashSet;

    fn user(id: u64, labels: &[&str]) -> ResultItem {
        ResultItem::User(UserResult {
            id,
            login: format!("user{id}"),
            avatar_url: String::new(),
            html_url: format!("https://github.com/user{id}"),
            matched_by: labels.iter().map(|s| s.to_string()).collect(),
            raw: serde_json::Value::Null,
        })
    }

    fn repo(id: u64, labels: &[&str]) -> ResultItem {
        ResultItem::Repo(RepoResult {
            id,
            full_name: format!("owner/repo{id}"),
            name: format!("repo{id}"),
            owner: Owner::default(),
            html_url: String::new(),
            description: None,
            language: None,
            stargazers_count: 0,
            matched_by: labels.iter().map(|s| s.to_string()).collect(),
            raw: serde_json::Value::Null,
        })
    }

    fn keys(items: &[ResultItem]) -> Vec<String> {
        items.iter().map(|i| i.key().to_string()).collect()
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(merge(vec![]).is_empty());
    }

    #[test]
    fn unique_items_pass_through() {
        let merged = merge(vec![user(1, &["a"]), user(2, &["a"])]);
        assert_eq!(keys(&merged), vec!["user-1", "user-2"]);
    }

    #[test]
    fn duplicate_key_merged_with_label_union() {
        let merged = merge(vec![
            user(1, &["By Username", "By Display Name"]),
            user(1, &["By Display Name", "By Location"]),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged[0].matched_by(),
            ["By Username", "By Display Name", "By Location"].map(String::from)
        );
    }

    #[test]
    fn same_id_different_kind_kept_apart() {
        let merged = merge(vec![repo(5, &["r"]), user(5, &["u"])]);
        assert_eq!(keys(&merged), vec!["user-5", "repo-5"]);
    }

    #[test]
    fn users_precede_repos_with_stable_order() {
        let merged = merge(vec![
            repo(30, &[]),
            user(3, &[]),
            repo(10, &[]),
            user(1, &[]),
            repo(20, &[]),
            user(2, &[]),
        ]);
        assert_eq!(
            keys(&merged),
            vec!["user-3", "user-1", "user-2", "repo-30", "repo-10", "repo-20"]
        );
    }

    #[test]
    fn duplicate_keeps_first_position() {
        let merged = merge(vec![user(1, &["a"]), user(2, &["a"]), user(1, &["b"])]);
        assert_eq!(keys(&merged), vec!["user-1", "user-2"]);
        assert_eq!(merged[0].matched_by(), ["a", "b"].map(String::from));
    }

    #[test]
    fn repeated_labels_within_one_item_collapse() {
        let merged = merge(vec![user(1, &["x", "x", "y"])]);
        assert_eq!(merged[0].matched_by(), ["x", "y"].map(String::from));
    }

    #[test]
    fn keys_unique_and_users_first_for_mixed_input() {
        let mut input = Vec::new();
        for id in 0..20u64 {
            input.push(if id % 3 == 0 { repo(id % 7, &["r"]) } else { user(id % 5, &["u"]) });
        }
        let merged = merge(input);

        let unique: HashSet<ResultKey> = merged.iter().map(ResultItem::key).collect();
        assert_eq!(unique.len(), merged.len());

        let first_repo = merged
            .iter()
            .position(|i| i.kind() == EntityKind::Repository)
            .unwrap_or(merged.len());
        assert!(merged[first_repo..]
            .iter()
            .all(|i| i.kind() == EntityKind::Repository));
    }
}
