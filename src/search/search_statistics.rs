use crate::search::HeuristicValue;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct SearchStatistics {
    /// Number of nodes popped from the frontier and expanded
    expanded_nodes: u64,
    /// Number of child nodes generated
    generated_nodes: u64,
    /// Number of popped nodes skipped because their state was already
    /// expanded
    pruned_nodes: u64,
    /// Number of frontier entries replaced by a better-scored node for the
    /// same state
    replaced_nodes: u64,
    /// Number of depth-limited iterations run by iterative deepening
    iterations: u64,
    /// Deepest node seen
    max_depth: usize,
    /// Lowest evaluation of a node popped so far, only tracked by informed
    /// search
    #[serde(skip)]
    best_evaluation: HeuristicValue,
    /// Time when the search started
    #[serde(skip)]
    search_start_time: Instant,
    /// Time when the last log was printed, used for periodic logging
    #[serde(skip)]
    last_log_time: Instant,
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStatistics {
    pub fn new() -> Self {
        info!("starting search");
        Self {
            expanded_nodes: 0,
            generated_nodes: 0,
            pruned_nodes: 0,
            replaced_nodes: 0,
            iterations: 0,
            max_depth: 0,
            best_evaluation: OrderedFloat(f64::INFINITY),
            search_start_time: Instant::now(),
            last_log_time: Instant::now(),
        }
    }

    pub fn register_evaluation(&mut self, evaluation: HeuristicValue) {
        if evaluation < self.best_evaluation {
            self.best_evaluation = evaluation;
            info!(best_evaluation = self.best_evaluation.into_inner());
            self.last_log_time = Instant::now();
            self.log();
        }
    }

    pub fn increment_expanded_nodes(&mut self, depth: usize) {
        self.expanded_nodes += 1;
        self.max_depth = self.max_depth.max(depth);
        self.log_if_needed();
    }

    pub fn increment_generated_nodes(&mut self, num_nodes: usize) {
        self.generated_nodes += num_nodes as u64;
        self.log_if_needed();
    }

    pub fn increment_pruned_nodes(&mut self) {
        self.pruned_nodes += 1;
        self.log_if_needed();
    }

    pub fn increment_replaced_nodes(&mut self) {
        self.replaced_nodes += 1;
        self.log_if_needed();
    }

    pub fn increment_iterations(&mut self) {
        self.iterations += 1;
    }

    pub fn expanded_nodes(&self) -> u64 {
        self.expanded_nodes
    }

    pub fn generated_nodes(&self) -> u64 {
        self.generated_nodes
    }

    pub fn pruned_nodes(&self) -> u64 {
        self.pruned_nodes
    }

    pub fn replaced_nodes(&self) -> u64 {
        self.replaced_nodes
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    fn log_if_needed(&mut self) {
        if self.last_log_time.elapsed().as_secs() > 10 {
            self.last_log_time = Instant::now();
            self.log();
        }
    }

    fn log(&self) {
        info!(
            expanded_nodes = self.expanded_nodes,
            generated_nodes = self.generated_nodes,
            pruned_nodes = self.pruned_nodes,
            replaced_nodes = self.replaced_nodes,
            max_depth = self.max_depth,
        );
    }

    pub fn finalise_search(&self) {
        info!("finalising search");
        self.log();
        if self.iterations > 0 {
            info!(iterations = self.iterations);
        }
        info!(search_duration = self.search_start_time.elapsed().as_secs_f64());
    }
}
