//! Caller-imposed limits on a search.
//!
//! Both strategies can take exponential time on unlucky boards. The solver itself never gives
//! up, so callers that need to stay responsive hand it a budget: a node count, a wall-clock
//! limit, a cancellation flag, or any mix of them. Running out is reported as an error, never as
//! "no solution".

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use super::error::{Error, Result};

/// The wall clock is only consulted once per this many nodes.
const TIME_CHECK_INTERVAL: u64 = 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SearchLimits {
    /// Maximum number of cells entered, across all start attempts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<u64>,
    /// Maximum search time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit_ms: Option<u64>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_nodes.is_none() && self.time_limit_ms.is_none()
    }
}

/// Tracks node usage of one solve call against its [`SearchLimits`].
#[derive(Debug, Clone)]
pub struct SearchBudget {
    limits: SearchLimits,
    started: Instant,
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
    nodes: u64,
}

impl SearchBudget {
    pub fn new(limits: SearchLimits, cancel: Option<Arc<AtomicBool>>) -> Self {
        let started = Instant::now();
        Self {
            limits,
            started,
            deadline: limits.time_limit_ms.map(|ms| started + Duration::from_millis(ms)),
            cancel,
            nodes: 0,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(SearchLimits::unlimited(), None)
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Account for one entered cell.
    #[inline]
    pub fn charge(&mut self) -> Result<()> {
        self.nodes = self.nodes.saturating_add(1);

        if let Some(limit) = self.limits.max_nodes
            && self.nodes > limit
        {
            return Err(Error::LimitExceeded {
                metric: "nodes",
                limit,
                observed: self.nodes,
            });
        }

        if let Some(flag) = &self.cancel
            && flag.load(Ordering::Relaxed)
        {
            return Err(Error::Cancelled { nodes: self.nodes });
        }

        if self.nodes % TIME_CHECK_INTERVAL == 0
            && let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return Err(Error::LimitExceeded {
                metric: "time_ms",
                limit: self.limits.time_limit_ms.unwrap_or_default(),
                observed: self.elapsed().as_millis().try_into().unwrap_or(u64::MAX),
            });
        }

        Ok(())
    }
}
