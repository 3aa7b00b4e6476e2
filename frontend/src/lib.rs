//! Funding search client: API calls, listing session state and the
//! plain-text views used by the `funding` binary.

pub mod api;
pub mod data_definitions;
pub mod pages;
