//! CLI binary for ghfinder.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gh_search::pagination::paginate;
use gh_search::{FilterKey, GitHubClient, SelectedFilterSet};
use ghfinder::render;
use ghfinder::session::{self, FinderEvent, FinderState};
use ghfinder::{FinderConfig, NewReview, ReviewStore};
use tracing_subscriber::EnvFilter;

/// ghfinder: find GitHub users and repositories.
#[derive(Parser)]
#[command(name = "ghfinder", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, env = "GHFINDER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search users and repositories.
    Search {
        /// Free-text query (at least two characters).
        query: String,
        /// Facet to search by; repeat for several. Defaults to username and name.
        #[arg(short, long = "filter", value_name = "KEY")]
        filters: Vec<FilterKey>,
        /// Search all fields of both users and repositories.
        #[arg(long, conflicts_with = "filters")]
        all: bool,
        /// Result page to show.
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Print the page as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show a user's profile and recent repositories.
    Profile {
        username: String,
        /// How many repositories to list.
        #[arg(long)]
        repos: Option<u32>,
    },

    /// Read or write community reviews.
    Reviews {
        #[command(subcommand)]
        command: ReviewsCommand,
    },

    /// List the search facets.
    Filters,
}

#[derive(Subcommand)]
enum ReviewsCommand {
    /// List reviews, highest-rated first.
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Submit a review.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        text: String,
        /// Star rating, 1 to 5.
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        #[arg(long, default_value = "User")]
        position: String,
        /// Image URL; a placeholder avatar is used when omitted.
        #[arg(long)]
        image: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `--json` output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ghfinder=info,gh_search=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = FinderConfig::load(cli.config.as_deref()).context("failed to load config")?;

    match cli.command {
        Command::Search {
            query,
            filters,
            all,
            page,
            json,
        } => {
            let filters = if all {
                SelectedFilterSet::new()
            } else if filters.is_empty() {
                session::default_filters()
            } else {
                filters.into_iter().collect()
            };
            run_search(&config, query, filters, page, json).await
        }
        Command::Profile { username, repos } => run_profile(&config, &username, repos).await,
        Command::Reviews { command } => match command {
            ReviewsCommand::List { page } => list_reviews(&config, page).await,
            ReviewsCommand::Add {
                name,
                text,
                rating,
                position,
                image,
            } => {
                let review = NewReview {
                    name,
                    position,
                    text,
                    stars: rating,
                    image,
                };
                add_review(&config, &review).await
            }
        },
        Command::Filters => {
            print!(
                "{}",
                render::catalog_view(&gh_search::catalog(), &session::default_filters())
            );
            Ok(())
        }
    }
}

async fn run_search(
    config: &FinderConfig,
    query: String,
    filters: SelectedFilterSet,
    page: usize,
    json: bool,
) -> anyhow::Result<()> {
    let client = GitHubClient::new(&config.search)?;

    let mut state = FinderState::new(config.ui.page_size, config.search.min_query_len);
    state.filters = filters;
    let (state, _) = session::update(state, FinderEvent::SetQuery(query));
    let (mut state, request) = session::update(state, FinderEvent::SubmitSearch);

    if let Some(request) = request {
        eprintln!("{}", render::LOADING_MESSAGE);
        let finished = session::execute(&client, &request, &config.search).await;
        (state, _) = session::update(state, finished);
        (state, _) = session::update(state, FinderEvent::GoToPage(page));
    }

    if json {
        let page = state.current_page();
        let items: Vec<serde_json::Value> = page
            .items
            .iter()
            .map(|item| {
                serde_json::json!({
                    "type": item.kind().tag(),
                    "id": item.id(),
                    "title": item.title(),
                    "html_url": item.html_url(),
                    "avatar_url": item.avatar_url(),
                    "matched_by": item.matched_by(),
                    "match_score": state.match_score(item),
                })
            })
            .collect();
        let body = serde_json::json!({
            "page": page.number,
            "total_pages": page.total_pages,
            "total": state.items.len(),
            "items": items,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", render::results_view(&state, config.ui.max_labels));
    }
    Ok(())
}

async fn run_profile(
    config: &FinderConfig,
    username: &str,
    repos: Option<u32>,
) -> anyhow::Result<()> {
    let client = GitHubClient::new(&config.search)?;
    let limit = repos.unwrap_or(config.search.profile_repo_limit);
    let (profile, repos) = gh_search::fetch_profile(&client, username, limit)
        .await
        .with_context(|| format!("failed to load profile {username}"))?;
    print!("{}", render::profile_view(&profile, &repos));
    Ok(())
}

async fn list_reviews(config: &FinderConfig, page: usize) -> anyhow::Result<()> {
    let store = ReviewStore::new(&config.reviews)?;
    let reviews = store.list().await?;
    let page = paginate(&reviews, page, config.ui.review_page_size);
    println!("{}", render::reviews_view(&page));
    Ok(())
}

async fn add_review(config: &FinderConfig, review: &NewReview) -> anyhow::Result<()> {
    let store = ReviewStore::new(&config.reviews)?;
    let saved = store.create(review).await?;
    println!("Thanks! Your review was saved.");
    print!("{}", render::review_card(&saved));
    Ok(())
}
