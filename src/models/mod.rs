//! Data models for the civic issue tracker.
//!
//! These models mirror the backend's JSON resources (camelCase on the wire).

mod comment;
mod department;
mod issue;
mod page;
mod user;

pub use comment::*;
pub use department::*;
pub use issue::*;
pub use page::*;
pub use user::*;
