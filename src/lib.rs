//! Civic issue tracker client.
//!
//! A typed REST client with Basic-auth session handling, plus the client-side
//! filter/sort pipeline and dashboard statistics for issue lists.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod search;
pub mod stats;

pub use api::ApiClient;
pub use auth::{LoginOutcome, SessionState};
pub use config::Config;
pub use db::{MemorySessionStore, SessionStore, SqliteSessionStore};
pub use errors::{ClientError, OperationKind};
pub use search::{Filter, IssueQuery, SortKey};
pub use stats::IssueStats;
