pub mod opportunity_store;
pub mod sample_data;
