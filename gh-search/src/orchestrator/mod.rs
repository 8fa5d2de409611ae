//! Search orchestrator: query planning, concurrent branches, merge, scoring.
//!
//! This module turns a query plus selected facets into one or two GitHub
//! search requests, runs them concurrently, tags and merges the hits by
//! `(kind, id)`, and exposes the match-score formula used when rendering.

pub mod merge;
pub mod query;
pub mod scoring;
pub mod search;
