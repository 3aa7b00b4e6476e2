//! Constants shared by the search API and its clients.

/// Page size the listing asks for when the session never set one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page the API serves; bigger requests are capped to it.
pub const MAX_PAGE_SIZE: u32 = 100;

pub const OPPORTUNITIES_PATH: &str = "/opportunities";
pub const FILTERS_PATH: &str = "/filters";
pub const STATISTICS_PATH: &str = "/statistics";
pub const POPULATE_SAMPLE_DATA_PATH: &str = "/_populate_sample_data";

pub const PARAM_PAGE: &str = "page";
pub const PARAM_PER_PAGE: &str = "per_page";
pub const PARAM_KEYWORD: &str = "keyword";
pub const PARAM_COUNTRY: &str = "country";
pub const PARAM_ORGANIZATION: &str = "organization";
pub const PARAM_RESEARCH_AREA: &str = "research_area";
pub const PARAM_TAGS: &str = "tags";
pub const PARAM_MIN_AMOUNT: &str = "min_amount";
pub const PARAM_MAX_AMOUNT: &str = "max_amount";
