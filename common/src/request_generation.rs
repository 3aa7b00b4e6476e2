//! Latest-request-wins bookkeeping for listing queries.
//!
//! Every query issued by a session takes a new generation number. When its
//! response comes back it is only applied if no newer query was issued in the
//! meantime; otherwise it is dropped. In-flight requests are never cancelled.

use crate::search_query::{FilterState, ParamMap, build_request_params};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestGeneration {
    current: u64,
}

impl RequestGeneration {
    /// Issues a new generation, superseding everything issued before.
    pub fn begin(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.current
    }
}

/// A query that has been sent and is waiting for its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub generation: u64,
    pub params: ParamMap,
}

impl PendingQuery {
    pub fn issue(generations: &mut RequestGeneration, state: &FilterState) -> Self {
        Self { generation: generations.begin(), params: build_request_params(state) }
    }
}
