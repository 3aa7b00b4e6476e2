use std::sync::Arc;

use chrono::Local;
use tracing::info;

use crate::{
    config::Config,
    db_utils::{
        opportunity_store::OpportunityStore,
        sample_data::{SAMPLE_OPPORTUNITY_COUNT, generate_sample_records},
    },
};

pub struct AppState {
    pub config: Config,
    pub store: OpportunityStore,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let state = Arc::new(Self { config, store: OpportunityStore::new() });

        if state.config.seed_sample_data {
            let added = state.populate_sample_data()?;
            info!("Seeded store with {added} sample opportunities");
        }

        Ok(state)
    }

    pub fn populate_sample_data(&self) -> anyhow::Result<usize> {
        let records = generate_sample_records(SAMPLE_OPPORTUNITY_COUNT, Local::now().naive_local());
        Ok(self.store.insert_missing_titles(records)?)
    }
}
