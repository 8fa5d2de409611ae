//! Match-score computation for merged results.
//!
//! Formula: `score = round(matched / max(1, selected) * 100)`
//!
//! where `matched` is the length of an item's `matched_by` list and
//! `selected` is the size of the current filter selection. The score is
//! derived on demand and never stored.

use crate::types::{ResultItem, SelectedFilterSet};

/// Compute a match percentage from label and selection counts.
///
/// `selected` of 0 is treated as 1. The result is capped at 100, which only
/// matters if `matched` exceeds `selected` (a no-facet search tags every item
/// with a single sentinel label and scores 100).
pub fn match_score(matched: usize, selected: usize) -> u8 {
    let selected = selected.max(1);
    let percent = (matched as f64 / selected as f64 * 100.0).round();
    percent.min(100.0) as u8
}

/// Match score of `item` against the current `filters`.
pub fn item_match_score(item: &ResultItem, filters: &SelectedFilterSet) -> u8 {
    match_score(item.matched_by().len(), filters.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{parse_filters, UserResult};

    fn tagged(labels: &[&str]) -> ResultItem {
        ResultItem::User(UserResult {
            id: 1,
            login: "torvalds".into(),
            avatar_url: String::new(),
            html_url: String::new(),
            matched_by: labels.iter().map(|s| s.to_string()).collect(),
            raw: serde_json::Value::Null,
        })
    }

    #[test]
    fn full_match_scores_100() {
        assert_eq!(match_score(1, 1), 100);
        assert_eq!(match_score(3, 3), 100);
    }

    #[test]
    fn partial_match_rounds_to_nearest() {
        assert_eq!(match_score(1, 3), 33);
        assert_eq!(match_score(2, 3), 67);
        assert_eq!(match_score(1, 2), 50);
        assert_eq!(match_score(3, 5), 60);
    }

    #[test]
    fn empty_selection_does_not_divide_by_zero() {
        assert_eq!(match_score(0, 0), 0);
        assert_eq!(match_score(1, 0), 100);
    }

    #[test]
    fn no_labels_scores_zero() {
        assert_eq!(match_score(0, 4), 0);
    }

    #[test]
    fn score_never_exceeds_100() {
        assert_eq!(match_score(5, 2), 100);
    }

    #[test]
    fn formula_holds_for_valid_ranges() {
        for selected in 0..=5usize {
            for matched in 0..=selected {
                let expected = (matched as f64 / selected.max(1) as f64 * 100.0).round() as u8;
                assert_eq!(match_score(matched, selected), expected);
            }
        }
    }

    #[test]
    fn item_score_uses_selection_size() {
        let filters = parse_filters(["username", "repo"]).expect("valid");
        assert_eq!(item_match_score(&tagged(&["By Username"]), &filters), 50);
        assert_eq!(
            item_match_score(&tagged(&["By Username", "By Repo"]), &filters),
            100
        );
    }

    #[test]
    fn torvalds_username_scenario_scores_100() {
        let filters = parse_filters(["username"]).expect("valid");
        assert_eq!(item_match_score(&tagged(&["By Username"]), &filters), 100);
    }
}
