//! Common library exports shared between the search API and its clients.

pub mod funding_amount;
pub mod request_generation;
pub mod search_const;
pub mod search_query;
pub mod search_result;
