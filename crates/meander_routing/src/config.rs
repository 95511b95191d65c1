use std::{str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        DEFAULT_LANDMARK_RADIUS_METERS, DEFAULT_MAX_EXPANSIONS, DEFAULT_MAX_SNAP_DISTANCE_METERS,
        DEFAULT_SEARCH_TIMEOUT_MS, WEIGHT_LANDMARKS,
    },
    distance::{Distance, Meters},
    error::ConfigError,
    meters,
    routing::{routing_request::RoutingRequestOptions, shortest_path_algorithm::SearchBudget},
};

pub const ENV_MAX_SNAP_DISTANCE: &str = "MEANDER_MAX_SNAP_DISTANCE";
pub const ENV_LANDMARK_WEIGHT: &str = "MEANDER_LANDMARK_WEIGHT";
pub const ENV_LANDMARK_RADIUS: &str = "MEANDER_LANDMARK_RADIUS";
pub const ENV_MAX_EXPANSIONS: &str = "MEANDER_MAX_EXPANSIONS";
pub const ENV_SEARCH_TIMEOUT_MS: &str = "MEANDER_SEARCH_TIMEOUT_MS";

/// Engine wide settings, fixed for the lifetime of a loaded network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Meters beyond which a coordinate is not snapped to the network
    pub max_snap_distance: f64,
    /// Landmark affinity weight blended into every request
    pub landmark_weight: f64,
    /// Meters within which a landmark is considered near an edge
    pub landmark_radius: f64,
    /// No limit when `None`
    pub max_expansions: Option<usize>,
    /// No limit when `None`
    pub search_timeout_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_snap_distance: DEFAULT_MAX_SNAP_DISTANCE_METERS,
            landmark_weight: WEIGHT_LANDMARKS,
            landmark_radius: DEFAULT_LANDMARK_RADIUS_METERS,
            max_expansions: Some(DEFAULT_MAX_EXPANSIONS),
            search_timeout_ms: Some(DEFAULT_SEARCH_TIMEOUT_MS),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by the `MEANDER_*` process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        EngineConfig::default().with_env(|key| std::env::var(key).ok())
    }

    /// Overrides every setting `lookup` has a value for. A zero budget or timeout disables it.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(ENV_MAX_SNAP_DISTANCE) {
            self.max_snap_distance = parse(ENV_MAX_SNAP_DISTANCE, &value)?;
        }
        if let Some(value) = lookup(ENV_LANDMARK_WEIGHT) {
            self.landmark_weight = parse(ENV_LANDMARK_WEIGHT, &value)?;
        }
        if let Some(value) = lookup(ENV_LANDMARK_RADIUS) {
            self.landmark_radius = parse(ENV_LANDMARK_RADIUS, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_EXPANSIONS) {
            self.max_expansions = Some(parse::<usize>(ENV_MAX_EXPANSIONS, &value)?).filter(|&n| n > 0);
        }
        if let Some(value) = lookup(ENV_SEARCH_TIMEOUT_MS) {
            self.search_timeout_ms =
                Some(parse::<u64>(ENV_SEARCH_TIMEOUT_MS, &value)?).filter(|&ms| ms > 0);
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            (ENV_MAX_SNAP_DISTANCE, self.max_snap_distance),
            (ENV_LANDMARK_WEIGHT, self.landmark_weight),
            (ENV_LANDMARK_RADIUS, self.landmark_radius),
        ];

        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn max_snap_distance(&self) -> Distance<Meters> {
        meters!(self.max_snap_distance)
    }

    pub fn landmark_radius(&self) -> Distance<Meters> {
        meters!(self.landmark_radius)
    }

    pub fn search_timeout(&self) -> Option<Duration> {
        self.search_timeout_ms.map(Duration::from_millis)
    }

    /// Budget of a search starting now, request options taking precedence.
    /// A zero expansion limit in the options lifts the configured one.
    pub fn search_budget(&self, options: Option<&RoutingRequestOptions>) -> SearchBudget {
        let mut budget = SearchBudget::unlimited();

        if let Some(max_expansions) = options
            .and_then(|options| options.max_expansions)
            .or(self.max_expansions)
        {
            budget = budget.with_max_expansions(max_expansions);
        }

        match (options.and_then(|options| options.deadline), self.search_timeout()) {
            (Some(deadline), _) => budget.with_deadline(deadline),
            (None, Some(timeout)) => budget.with_timeout(timeout),
            (None, None) => budget,
        }
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
}
