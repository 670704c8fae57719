//! Core types for the policy assistant

pub mod document;
pub mod query;
pub mod response;
pub mod session;

pub use document::{FileType, PolicyDocument};
pub use query::ChatRequest;
pub use response::{ChatResponse, ErrorResponse};
pub use session::{Role, Turn};
