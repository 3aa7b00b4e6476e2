pub mod find_funding_page;
pub mod home_page;
