//! In-memory opportunity storage backing the search API.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDateTime;
use common::search_result::Opportunity;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityStatus {
    Active,
    Closed,
    Upcoming,
}

/// A stored opportunity together with its bookkeeping columns. Serializes as
/// the flat JSON object the listing endpoint returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRecord {
    #[serde(flatten)]
    pub opportunity: Opportunity,
    pub status: OpportunityStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl FundingRecord {
    pub fn is_active(&self) -> bool {
        self.status == OpportunityStatus::Active
    }
}

/// Record as submitted for insertion; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewFundingRecord {
    pub opportunity: Opportunity,
    pub status: OpportunityStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Default)]
pub struct OpportunityStore {
    inner: RwLock<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    records: Vec<FundingRecord>,
    next_id: u64,
}

impl OpportunityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreInner>, AppError> {
        self.inner.read().map_err(|_| AppError::StoreUnavailable)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreInner>, AppError> {
        self.inner.write().map_err(|_| AppError::StoreUnavailable)
    }

    pub fn insert(&self, record: NewFundingRecord) -> Result<u64, AppError> {
        let mut inner = self.write()?;
        inner.next_id += 1;
        let id = inner.next_id;
        let NewFundingRecord { mut opportunity, status, created_at } = record;
        opportunity.id = id;
        inner.records.push(FundingRecord { opportunity, status, created_at, updated_at: created_at });
        Ok(id)
    }

    /// Inserts every record whose title is not stored yet. Returns how many
    /// were added.
    pub fn insert_missing_titles(&self, records: Vec<NewFundingRecord>) -> Result<usize, AppError> {
        let mut added = 0;
        for record in records {
            if self.contains_title(&record.opportunity.title)? {
                continue;
            }
            self.insert(record)?;
            added += 1;
        }
        Ok(added)
    }

    pub fn contains_title(&self, title: &str) -> Result<bool, AppError> {
        Ok(self.read()?.records.iter().any(|r| r.opportunity.title == title))
    }

    pub fn snapshot(&self) -> Result<Vec<FundingRecord>, AppError> {
        Ok(self.read()?.records.clone())
    }

    pub fn snapshot_active(&self) -> Result<Vec<FundingRecord>, AppError> {
        Ok(self.read()?.records.iter().filter(|r| r.is_active()).cloned().collect())
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.read()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }
}
