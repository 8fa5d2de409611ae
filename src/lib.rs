//! ghfinder: find GitHub users and repositories.
//!
//! This crate is the application layer over [`gh_search`]:
//! Query → facet selection → concurrent user/repo search → merged, paged cards
//!
//! # Architecture
//!
//! - **Config**: TOML file with `[search]`, `[reviews]` and `[ui]` sections
//! - **Session**: a pure state machine owning query, facets, page and results
//! - **Reviews**: client for the community testimonial store
//! - **Render**: plain-text views for the terminal front end

pub mod config;
pub mod error;
pub mod render;
pub mod reviews;
pub mod session;

pub use config::FinderConfig;
pub use error::{FinderError, Result};
pub use reviews::{NewReview, Review, ReviewStore};
pub use session::{DisplayState, FinderEvent, FinderState, SearchRequest};
