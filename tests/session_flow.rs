//! End-to-end session flow: state machine events driving a real search
//! through an in-memory backend.

use std::time::Duration;

use gh_search::orchestrator::query::BackendQuery;
use gh_search::types::{Owner, RepoResult, UserResult};
use gh_search::{
    EntityKind, FilterKey, ResultItem, SearchBackend, SearchConfig, SearchError,
};
use ghfinder::render;
use ghfinder::session::{execute, update, DisplayState, FinderEvent, FinderState};

/// Answers users for every user query and fails repository queries when
/// `repos_fail` is set.
struct StubGitHub {
    users: usize,
    repos_fail: bool,
    delay: Duration,
}

impl SearchBackend for StubGitHub {
    async fn search(&self, query: &BackendQuery) -> Result<Vec<ResultItem>, SearchError> {
        tokio::time::sleep(self.delay).await;
        match query.kind {
            EntityKind::User => Ok((1..=self.users as u64)
                .map(|id| {
                    ResultItem::User(UserResult {
                        id,
                        login: format!("dev{id}"),
                        avatar_url: String::new(),
                        html_url: format!("https://github.com/dev{id}"),
                        matched_by: vec![],
                        raw: serde_json::Value::Null,
                    })
                })
                .collect()),
            EntityKind::Repository if self.repos_fail => {
                Err(SearchError::Status {
                    status: 403,
                    message: "repository search".into(),
                })
            }
            EntityKind::Repository => Ok(vec![ResultItem::Repo(RepoResult {
                id: 99,
                full_name: "dev1/tool".into(),
                name: "tool".into(),
                owner: Owner {
                    login: "dev1".into(),
                    avatar_url: String::new(),
                },
                html_url: "https://github.com/dev1/tool".into(),
                description: None,
                language: Some("Rust".into()),
                stargazers_count: 12,
                matched_by: vec![],
                raw: serde_json::Value::Null,
            })]),
        }
    }
}

fn stub(users: usize) -> StubGitHub {
    StubGitHub {
        users,
        repos_fail: false,
        delay: Duration::ZERO,
    }
}

#[tokio::test]
async fn default_session_search_pages_users() {
    let backend = stub(12);
    let config = SearchConfig::default();

    let state = FinderState::default();
    let (state, _) = update(state, FinderEvent::SetQuery("dev".into()));
    let (state, request) = update(state, FinderEvent::SubmitSearch);
    let request = request.expect("request");

    let finished = execute(&backend, &request, &config).await;
    let (state, _) = update(state, finished);
    assert_eq!(state.display, DisplayState::Results);
    assert_eq!(state.items.len(), 12);
    assert_eq!(state.total_pages(), 2);
    // username and name both target users: both labels, full score
    assert_eq!(state.match_score(&state.items[0]), 100);

    let (state, _) = update(state, FinderEvent::NextPage);
    assert_eq!(state.current_page().items.len(), 4);
    assert!(render::results_view(&state, 2).ends_with("Page 2 of 2  [prev]"));
}

#[tokio::test]
async fn mixed_facets_put_users_first() {
    let backend = stub(2);
    let config = SearchConfig::default();

    let (state, _) = update(FinderState::default(), FinderEvent::ToggleFilter(FilterKey::Name));
    let (state, _) = update(state, FinderEvent::ToggleFilter(FilterKey::Language));
    let (state, _) = update(state, FinderEvent::SetQuery("rust".into()));
    let (state, request) = update(state, FinderEvent::SubmitSearch);

    let finished = execute(&backend, &request.expect("request"), &config).await;
    let (state, _) = update(state, finished);
    let kinds: Vec<EntityKind> = state.items.iter().map(ResultItem::kind).collect();
    assert_eq!(
        kinds,
        vec![EntityKind::User, EntityKind::User, EntityKind::Repository]
    );
    assert_eq!(state.match_score(&state.items[2]), 50);
}

#[tokio::test]
async fn partial_failure_still_shows_results() {
    let backend = StubGitHub {
        users: 1,
        repos_fail: true,
        delay: Duration::ZERO,
    };
    let config = SearchConfig::default();

    let (state, _) = update(FinderState::default(), FinderEvent::ToggleFilter(FilterKey::Repo));
    let (state, _) = update(state, FinderEvent::SetQuery("tool".into()));
    let (state, request) = update(state, FinderEvent::SubmitSearch);
    let finished = execute(&backend, &request.expect("request"), &config).await;
    let (state, _) = update(state, finished);

    assert_eq!(state.display, DisplayState::Results);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.failures.len(), 1);
    assert!(render::results_view(&state, 2).contains("partial results"));
}

#[tokio::test]
async fn newer_search_wins_over_slow_older_one() {
    let slow = StubGitHub {
        users: 5,
        repos_fail: false,
        delay: Duration::from_millis(200),
    };
    let fast = stub(1);
    let config = SearchConfig::default();

    let (state, _) = update(FinderState::default(), FinderEvent::SetQuery("first".into()));
    let (state, first) = update(state, FinderEvent::SubmitSearch);
    let (state, _) = update(state, FinderEvent::SetQuery("second".into()));
    let (state, second) = update(state, FinderEvent::SubmitSearch);
    let first = first.expect("first");
    let second = second.expect("second");

    let (slow_done, fast_done) = tokio::join!(
        execute(&slow, &first, &config),
        execute(&fast, &second, &config)
    );
    // apply in arrival order: fast first, then the stale slow one
    let (state, _) = update(state, fast_done);
    let (state, _) = update(state, slow_done);

    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].title(), "dev1");
}
