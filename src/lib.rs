//! A terminal browser for a TV show catalog written in Rust.
//!
//! show-browser fetches the show list from a TVMaze-style catalog API, lets you
//! filter it with a search box, and opens a show's episode list on demand.
//! Every catalog response is cached for the rest of the session.
//!
//! # Features
//!
//! - Alphabetical show list with case-insensitive search over name, summary
//!   and genres
//! - Show selector and direct card activation to open a show
//! - Episode list with search and an `S01E01`-style episode selector
//! - At most one request per show per session
//!
//! # Usage
//!
//! ```bash
//! # Browse the full catalog
//! cargo run
//!
//! # Open a show right away
//! cargo run -- --show 82
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod navigation;
pub mod render;
pub mod tui;
pub mod types;
