//! Opportunity listing route and its query handling.

mod list_opportunities;
pub use list_opportunities::list_opportunities;

pub mod opportunity_filter;
