use crate::search::SearchLimits;
use memory_stats::memory_stats;
use serde::Serialize;
use std::fmt::Display;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Memory is sampled every this many expansions, not on each one.
const MEMORY_SAMPLE_INTERVAL: u64 = 1024;

/// Why a search stopped before reaching a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminationReason {
    TimeLimitExceeded,
    MemoryLimitExceeded,
    ExpansionLimitExceeded,
    Cancelled,
}

impl Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::TimeLimitExceeded => write!(f, "time limit exceeded"),
            TerminationReason::MemoryLimitExceeded => write!(f, "memory limit exceeded"),
            TerminationReason::ExpansionLimitExceeded => write!(f, "expansion limit exceeded"),
            TerminationReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A flag shared between a running search and whoever may want to stop it.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Tracks the budget of one search invocation. Engines call
/// [`TerminationCondition::tick`] once per expansion and stop as soon as it
/// reports a reason.
#[derive(Debug)]
pub struct TerminationCondition {
    time_limit: Option<Duration>,
    memory_limit_mb: Option<usize>,
    max_expansions: Option<u64>,
    cancellation: Option<CancellationFlag>,
    expansions: u64,
    start_time: Instant,
    peak_memory_usage_mb: Option<usize>,
    last_log_time: Instant,
}

impl TerminationCondition {
    pub fn new(limits: &SearchLimits) -> Self {
        info!(
            time_limit = limits.time_limit.map(|d| d.as_secs_f64()),
            memory_limit_mb = limits.memory_limit_mb,
            max_expansions = limits.max_expansions,
        );
        if limits.memory_limit_mb.is_some() && memory_stats().is_none() {
            warn!("memory usage cannot be measured on this platform, ignoring the memory limit");
        }
        Self {
            time_limit: limits.time_limit,
            memory_limit_mb: limits.memory_limit_mb,
            max_expansions: limits.max_expansions,
            cancellation: limits.cancellation.clone(),
            expansions: 0,
            start_time: Instant::now(),
            peak_memory_usage_mb: None,
            last_log_time: Instant::now(),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(&SearchLimits::unlimited())
    }

    /// Registers one expansion and checks every limit.
    pub fn tick(&mut self) -> Option<TerminationReason> {
        self.expansions += 1;
        if self.memory_limit_mb.is_some() && self.expansions % MEMORY_SAMPLE_INTERVAL == 0 {
            self.sample_memory();
        }
        self.log_if_needed();
        self.should_terminate()
    }

    pub fn should_terminate(&self) -> Option<TerminationReason> {
        if let Some(cancellation) = &self.cancellation {
            if cancellation.is_cancelled() {
                return Some(TerminationReason::Cancelled);
            }
        }
        if let Some(max_expansions) = self.max_expansions {
            if self.expansions > max_expansions {
                return Some(TerminationReason::ExpansionLimitExceeded);
            }
        }
        if let Some(time_limit) = self.time_limit {
            if self.start_time.elapsed() > time_limit {
                return Some(TerminationReason::TimeLimitExceeded);
            }
        }
        if let Some(memory_limit_mb) = self.memory_limit_mb {
            if let Some(peak_usage) = self.peak_memory_usage_mb {
                if peak_usage > memory_limit_mb {
                    return Some(TerminationReason::MemoryLimitExceeded);
                }
            }
        }
        None
    }

    pub fn expansions(&self) -> u64 {
        self.expansions
    }

    fn sample_memory(&mut self) -> Option<usize> {
        let memory_usage = memory_stats().map(|usage| usage.physical_mem / 1024 / 1024);
        self.peak_memory_usage_mb = self.peak_memory_usage_mb.max(memory_usage);
        memory_usage
    }

    fn log_if_needed(&mut self) {
        if self.last_log_time.elapsed() > Duration::from_secs(10) {
            self.last_log_time = Instant::now();
            self.log();
        }
    }

    fn log(&mut self) {
        let memory_usage = self.sample_memory();
        info!(
            memory_usage_mb = memory_usage,
            time_elapsed = self.start_time.elapsed().as_secs_f64(),
        );
    }

    pub fn finalise(&mut self) {
        self.sample_memory();
        info!(
            peak_recorded_memory_usage_mb = self.peak_memory_usage_mb,
            total_time_used = self.start_time.elapsed().as_secs_f64(),
        );
    }
}
