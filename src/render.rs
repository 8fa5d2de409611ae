//! Plain-text rendering for the terminal front end.
//!
//! Every function returns a `String`; the binary decides where it goes.

use gh_search::{Page, RepoSummary, ResultItem, SearchFilter, SelectedFilterSet, UserProfile};

use crate::reviews::Review;
use crate::session::{DisplayState, FinderState};

pub const LOADING_MESSAGE: &str = "Loading results...";
pub const EMPTY_MESSAGE: &str = "No results. Try another query.";
pub const FAILED_MESSAGE: &str = "Search failed. Check your connection and try again.";
pub const IDLE_MESSAGE: &str = "Type at least two characters and search.";

/// Card for one result: kind badge, title, URL, labels and match score.
pub fn result_card(item: &ResultItem, score: u8, max_labels: usize) -> String {
    let mut out = String::new();
    let badge = match item {
        ResultItem::User(_) => "[User]",
        ResultItem::Repo(_) => "[Repo]",
    };
    out.push_str(&format!("{badge} {}  {score}% match\n", item.title()));
    out.push_str(&format!("    {}\n", item.html_url()));
    if let ResultItem::Repo(repo) = item {
        let mut meta = format!("    * {}", repo.stargazers_count);
        if let Some(language) = repo.language.as_deref() {
            meta.push_str(&format!("  {language}"));
        }
        out.push_str(&format!("{meta}\n"));
        if let Some(description) = repo.description.as_deref().filter(|d| !d.trim().is_empty()) {
            out.push_str(&format!("    {}\n", description.trim()));
        }
    }
    let labels: Vec<&str> = item
        .matched_by()
        .iter()
        .take(max_labels)
        .map(String::as_str)
        .collect();
    if !labels.is_empty() {
        out.push_str(&format!("    {}\n", labels.join(" | ")));
    }
    out
}

/// "Page 2 of 5" with navigation hints.
pub fn page_footer<T>(page: &Page<'_, T>) -> String {
    let mut out = format!("Page {} of {}", page.number, page.total_pages);
    if page.has_previous() {
        out.push_str("  [prev]");
    }
    if page.has_next() {
        out.push_str("  [next]");
    }
    out
}

/// The whole result area for the current session state.
pub fn results_view(state: &FinderState, max_labels: usize) -> String {
    match state.display {
        DisplayState::Idle => IDLE_MESSAGE.to_string(),
        DisplayState::Loading => LOADING_MESSAGE.to_string(),
        DisplayState::Empty => EMPTY_MESSAGE.to_string(),
        DisplayState::Failed => {
            let mut out = FAILED_MESSAGE.to_string();
            for failure in &state.failures {
                out.push_str(&format!("\n  {} search: {}", failure.kind, failure.error));
            }
            out
        }
        DisplayState::Results => {
            let page = state.current_page();
            let mut out = String::new();
            for item in page.items {
                out.push_str(&result_card(item, state.match_score(item), max_labels));
                out.push('\n');
            }
            if !state.failures.is_empty() {
                let kinds: Vec<String> = state.failures.iter().map(|f| f.kind.to_string()).collect();
                out.push_str(&format!("(partial results: {} search failed)\n", kinds.join(", ")));
            }
            out.push_str(&page_footer(&page));
            out
        }
    }
}

/// Facet catalog with the current selection marked.
pub fn catalog_view(catalog: &[SearchFilter], selected: &SelectedFilterSet) -> String {
    let mut out = String::new();
    for filter in catalog {
        let mark = if selected.contains(&filter.key) { 'x' } else { ' ' };
        out.push_str(&format!(
            "[{mark}] {:<9} {:<16} ({})\n",
            filter.key.key(),
            filter.label,
            filter.target
        ));
    }
    out
}

/// Profile header followed by the recent repository list.
pub fn profile_view(profile: &UserProfile, repos: &[RepoSummary]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} (@{})\n", profile.display_name(), profile.login));
    out.push_str(&format!("{}\n", profile.html_url));
    if let Some(bio) = profile.bio.as_deref().filter(|b| !b.trim().is_empty()) {
        out.push_str(&format!("{}\n", bio.trim()));
    }

    let details = [
        ("Company", profile.company.clone()),
        ("Location", profile.location.clone()),
        ("Blog", profile.blog_url()),
        ("Twitter", profile.twitter_username.as_ref().map(|t| format!("@{t}"))),
        ("Joined", profile.created_at.as_ref().map(|c| date_part(c).to_string())),
    ];
    for (name, value) in details {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            out.push_str(&format!("{name}: {value}\n"));
        }
    }
    out.push_str(&format!(
        "Repos: {}  Followers: {}  Following: {}\n",
        profile.public_repos.unwrap_or(0),
        profile.followers.unwrap_or(0),
        profile.following.unwrap_or(0)
    ));

    if repos.is_empty() {
        out.push_str("\nNo public repositories.\n");
        return out;
    }
    out.push_str("\nRecent repositories:\n");
    for repo in repos {
        out.push_str(&format!("  {}  * {}", repo.name, repo.stargazers_count));
        if let Some(language) = repo.language.as_deref() {
            out.push_str(&format!("  {language}"));
        }
        out.push('\n');
        if let Some(description) = repo.description.as_deref().filter(|d| !d.trim().is_empty()) {
            out.push_str(&format!("    {}\n", description.trim()));
        }
    }
    out
}

fn date_part(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

/// Five-slot star string, e.g. `***..` for three stars.
pub fn stars(count: u8) -> String {
    let filled = usize::from(count.min(5));
    format!("{}{}", "*".repeat(filled), ".".repeat(5 - filled))
}

pub fn review_card(review: &Review) -> String {
    format!(
        "{} {} ({})\n    \"{}\"\n",
        stars(review.stars),
        review.name,
        review.position,
        review.text
    )
}

/// One page of testimonials with its footer.
pub fn reviews_view(page: &Page<'_, Review>) -> String {
    if page.items.is_empty() {
        return "No reviews yet.".to_string();
    }
    let mut out = String::new();
    for review in page.items {
        out.push_str(&review_card(review));
    }
    out.push('\n');
    out.push_str(&page_footer(page));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gh_search::types::{Owner, RepoResult, UserResult};
    use gh_search::{catalog, paginate, FilterKey, SearchOutcome};

    use crate::session::{update, FinderEvent};

    fn repo() -> ResultItem {
        ResultItem::Repo(RepoResult {
            id: 10,
            full_name: "facebook/react".into(),
            name: "react".into(),
            owner: Owner {
                login: "facebook".into(),
                avatar_url: String::new(),
            },
            html_url: "https://github.com/facebook/react".into(),
            description: Some("The library for web and native user interfaces.".into()),
            language: Some("JavaScript".into()),
            stargazers_count: 230_000,
            matched_by: vec!["By Repo".into(), "By Language".into(), "Extra".into()],
            raw: serde_json::Value::Null,
        })
    }

    fn user() -> ResultItem {
        ResultItem::User(UserResult {
            id: 1,
            login: "torvalds".into(),
            avatar_url: String::new(),
            html_url: "https://github.com/torvalds".into(),
            matched_by: vec!["By Username".into()],
            raw: serde_json::Value::Null,
        })
    }

    #[test]
    fn repo_card_shows_meta_and_caps_labels() {
        let card = result_card(&repo(), 100, 2);
        assert!(card.starts_with("[Repo] facebook/react  100% match"));
        assert!(card.contains("* 230000  JavaScript"));
        assert!(card.contains("The library for web"));
        assert!(card.contains("By Repo | By Language"));
        assert!(!card.contains("Extra"));
    }

    #[test]
    fn user_card_has_badge_and_url() {
        let card = result_card(&user(), 50, 2);
        assert!(card.starts_with("[User] torvalds  50% match"));
        assert!(card.contains("https://github.com/torvalds"));
    }

    #[test]
    fn footer_marks_navigation() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(page_footer(&paginate(&items, 1, 2)), "Page 1 of 3  [next]");
        assert_eq!(page_footer(&paginate(&items, 2, 2)), "Page 2 of 3  [prev]  [next]");
        assert_eq!(page_footer(&paginate(&items, 3, 2)), "Page 3 of 3  [prev]");
    }

    #[test]
    fn results_view_follows_display_state() {
        let state = FinderState::default();
        assert_eq!(results_view(&state, 2), IDLE_MESSAGE);

        let (state, _) = update(state, FinderEvent::SetQuery("react".into()));
        let (state, request) = update(state, FinderEvent::SubmitSearch);
        assert_eq!(results_view(&state, 2), LOADING_MESSAGE);

        let outcome = SearchOutcome {
            items: vec![user(), repo()],
            failures: vec![],
        };
        let generation = request.expect("request").generation;
        let (state, _) = update(state, FinderEvent::SearchFinished { generation, outcome });
        let view = results_view(&state, 2);
        assert!(view.contains("[User] torvalds"));
        assert!(view.contains("[Repo] facebook/react"));
        assert!(view.ends_with("Page 1 of 1"));
    }

    #[test]
    fn catalog_marks_selection() {
        let selected = SelectedFilterSet::from([FilterKey::Language]);
        let view = catalog_view(&catalog(), &selected);
        let language = view.lines().find(|l| l.contains("language")).expect("line");
        assert!(language.starts_with("[x]"));
        let username = view.lines().find(|l| l.contains("username")).expect("line");
        assert!(username.starts_with("[ ]"));
    }

    #[test]
    fn star_string_clamps() {
        assert_eq!(stars(3), "***..");
        assert_eq!(stars(0), ".....");
        assert_eq!(stars(9), "*****");
    }

    #[test]
    fn profile_view_lists_details_and_repos() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "login": "octocat",
            "id": 583231,
            "html_url": "https://github.com/octocat",
            "name": "The Octocat",
            "blog": "github.blog",
            "location": "San Francisco",
            "followers": 9000,
            "created_at": "2011-01-25T18:44:36Z"
        }))
        .expect("profile");
        let repos: Vec<RepoSummary> = serde_json::from_value(serde_json::json!([
            { "id": 1, "name": "Hello-World", "language": "Ruby", "stargazers_count": 3 }
        ]))
        .expect("repos");

        let view = profile_view(&profile, &repos);
        assert!(view.starts_with("The Octocat (@octocat)"));
        assert!(view.contains("Blog: https://github.blog"));
        assert!(view.contains("Joined: 2011-01-25"));
        assert!(view.contains("Followers: 9000"));
        assert!(view.contains("Hello-World  * 3  Ruby"));
        assert!(!view.contains("Company"));
    }

    #[test]
    fn empty_review_page() {
        let reviews: Vec<Review> = Vec::new();
        assert_eq!(reviews_view(&paginate(&reviews, 1, 6)), "No reviews yet.");
    }
}
