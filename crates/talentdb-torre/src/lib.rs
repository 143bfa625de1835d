//! HTTP client for the Torre people-search and profile APIs.

pub mod client;
pub mod error;
pub mod stream;
pub mod types;

pub use client::TorreClient;
pub use error::TorreError;
pub use stream::parse_search_stream;
pub use types::{CandidateRecord, SearchPeopleRequest};
