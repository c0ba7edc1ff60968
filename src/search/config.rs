//! Search configuration, loadable from a TOML file such as
//!
//! ```toml
//! engine = "astar"
//! depth-limit = 20
//! time-limit = "30s"
//! memory-limit-mb = 2048
//! max-expansions = 1000000
//! ```

use crate::search::{search_engines::CancellationFlag, SearchEngineName};
use crate::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_DEPTH_LIMIT: usize = 50;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawSearchConfig {
    engine: Option<SearchEngineName>,
    depth_limit: Option<usize>,
    time_limit: Option<String>,
    memory_limit_mb: Option<usize>,
    max_expansions: Option<u64>,
}

/// Which engine to run and under what budget.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// `None` leaves the choice to the caller, see [`SearchConfig::engine_or`].
    pub engine: Option<SearchEngineName>,
    /// Bound used by depth-limited search.
    pub depth_limit: usize,
    pub limits: SearchLimits,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engine: None,
            depth_limit: DEFAULT_DEPTH_LIMIT,
            limits: SearchLimits::default(),
        }
    }
}

impl SearchConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(&text)
    }

    pub fn from_text(text: &str) -> Result<Self, ConfigError> {
        let raw: RawSearchConfig = toml::from_str(text)?;
        let defaults = Self::default();
        let time_limit = raw.time_limit.as_deref().map(parse_duration).transpose()?;
        Ok(Self {
            engine: raw.engine,
            depth_limit: raw.depth_limit.unwrap_or(defaults.depth_limit),
            limits: SearchLimits {
                time_limit,
                memory_limit_mb: raw.memory_limit_mb,
                max_expansions: raw.max_expansions,
                cancellation: None,
            },
        })
    }

    /// The configured engine, or `default` if none was configured.
    pub fn engine_or(&self, default: SearchEngineName) -> SearchEngineName {
        self.engine.unwrap_or(default)
    }
}

/// Resource budget of a single search invocation. Unbounded by default, in
/// which case iterative deepening or tree search over a cyclic space may
/// never return.
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    pub time_limit: Option<Duration>,
    pub memory_limit_mb: Option<usize>,
    /// Maximum number of nodes popped from the frontier.
    pub max_expansions: Option<u64>,
    /// Checked once per expansion; set it to stop the search cooperatively.
    pub cancellation: Option<CancellationFlag>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(max_expansions: u64) -> Self {
        Self {
            max_expansions: Some(max_expansions),
            ..Self::default()
        }
    }
}

/// Parses a human readable duration such as `"1m 30s"` or `"250ms"`.
pub fn parse_duration(value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value).map_err(|source| ConfigError::Duration {
        value: value.to_string(),
        source,
    })
}
