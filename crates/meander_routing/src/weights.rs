use std::{collections::HashMap, hash::BuildHasher};

use serde::{Deserialize, Serialize};

use crate::{error::RouteError, properties::criterion::Criterion};

pub const WEIGHT_LENGTH_KEY: &str = "weight_length";

/// Preference weights as produced by the upstream preference interpreter.
///
/// Values may be negative or zero; they are only made usable by [`WeightVector::normalize`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWeights {
    pub weight_length: f64,
    pub weight_green_index: f64,
    pub weight_water_index: f64,
    pub weight_shade_index: f64,
    pub weight_slope_index: f64,
    pub weight_road_safety: f64,
    pub weight_isolation: f64,
}

impl RawWeights {
    /// Reads every weight from a `weight_*` keyed map, failing on the first missing key.
    pub fn from_map<S: BuildHasher>(map: &HashMap<String, f64, S>) -> Result<Self, RouteError> {
        let get = |key: &str| {
            map.get(key)
                .copied()
                .ok_or_else(|| RouteError::InvalidWeights(format!("missing key `{}`", key)))
        };

        let mut weights = RawWeights {
            weight_length: get(WEIGHT_LENGTH_KEY)?,
            ..RawWeights::default()
        };
        for criterion in Criterion::ALL {
            weights.set_criterion(criterion, get(criterion.weight_key())?);
        }

        Ok(weights)
    }

    pub fn criterion(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::GreenIndex => self.weight_green_index,
            Criterion::WaterIndex => self.weight_water_index,
            Criterion::ShadeIndex => self.weight_shade_index,
            Criterion::SlopeIndex => self.weight_slope_index,
            Criterion::RoadSafety => self.weight_road_safety,
            Criterion::Isolation => self.weight_isolation,
        }
    }

    pub fn set_criterion(&mut self, criterion: Criterion, value: f64) {
        let slot = match criterion {
            Criterion::GreenIndex => &mut self.weight_green_index,
            Criterion::WaterIndex => &mut self.weight_water_index,
            Criterion::ShadeIndex => &mut self.weight_shade_index,
            Criterion::SlopeIndex => &mut self.weight_slope_index,
            Criterion::RoadSafety => &mut self.weight_road_safety,
            Criterion::Isolation => &mut self.weight_isolation,
        };
        *slot = value;
    }

    pub fn with_length(mut self, value: f64) -> Self {
        self.weight_length = value;
        self
    }

    pub fn with_criterion(mut self, criterion: Criterion, value: f64) -> Self {
        self.set_criterion(criterion, value);
        self
    }

    fn supplied(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        std::iter::once((WEIGHT_LENGTH_KEY, self.weight_length)).chain(
            Criterion::ALL
                .into_iter()
                .map(move |criterion| (criterion.weight_key(), self.criterion(criterion))),
        )
    }
}

/// Non-negative cost blend whose components sum to one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WeightVector {
    length: f64,
    criteria: [f64; Criterion::COUNT],
    landmark: f64,
}

impl WeightVector {
    /// Clamps every weight to zero or more and divides by the sum.
    ///
    /// Fails when a weight is not finite or when no supplied weight is positive,
    /// since then no path is preferable to another.
    pub fn normalize(raw: &RawWeights, landmark_weight: f64) -> Result<Self, RouteError> {
        if let Some((key, value)) = raw.supplied().find(|(_, value)| !value.is_finite()) {
            return Err(RouteError::InvalidWeights(format!(
                "`{}` is not a finite number ({})",
                key, value
            )));
        }

        if !landmark_weight.is_finite() {
            return Err(RouteError::InvalidWeights(format!(
                "landmark weight is not a finite number ({})",
                landmark_weight
            )));
        }

        if raw.supplied().all(|(_, value)| value <= 0.0) {
            return Err(RouteError::InvalidWeights(String::from(
                "every weight is zero or negative",
            )));
        }

        let mut criteria = [0.0; Criterion::COUNT];
        for criterion in Criterion::ALL {
            criteria[criterion.index()] = raw.criterion(criterion).max(0.0);
        }

        Ok(WeightVector::from_components(
            raw.weight_length.max(0.0),
            criteria,
            landmark_weight.max(0.0),
        ))
    }

    fn from_components(length: f64, criteria: [f64; Criterion::COUNT], landmark: f64) -> Self {
        let sum = length + criteria.iter().sum::<f64>() + landmark;

        WeightVector {
            length: length / sum,
            criteria: criteria.map(|weight| weight / sum),
            landmark: landmark / sum,
        }
    }

    /// Normalizes an existing vector again. A normalized vector is returned unchanged.
    pub fn renormalize(&self) -> Self {
        WeightVector::from_components(self.length, self.criteria, self.landmark)
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline(always)]
    pub fn criterion(&self, criterion: Criterion) -> f64 {
        self.criteria[criterion.index()]
    }

    pub fn landmark(&self) -> f64 {
        self.landmark
    }

    pub fn sum(&self) -> f64 {
        self.length + self.criteria.iter().sum::<f64>() + self.landmark
    }
}
