use serde::Serialize;

use super::{criterion::Criterion, edge_attributes::EdgeAttributes};

const MIN_SPAN: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AttributeRange {
    pub min: f64,
    pub max: f64,
}

impl AttributeRange {
    fn empty() -> Self {
        AttributeRange {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn include(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Maps `value` into [0, 1]. A constant attribute carries no signal and maps to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if !span.is_finite() || span < MIN_SPAN {
            return 0.0;
        }

        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Graph-wide min/max of every criterion.
///
/// Computed once when the network is loaded and never updated afterwards, so the
/// same raw value normalizes identically for every request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttributeStats {
    ranges: [AttributeRange; Criterion::COUNT],
}

impl AttributeStats {
    pub fn from_attributes<'a>(attributes: impl IntoIterator<Item = &'a EdgeAttributes>) -> Self {
        let mut ranges = [AttributeRange::empty(); Criterion::COUNT];

        for edge_attributes in attributes {
            for (criterion, value) in edge_attributes.iter() {
                ranges[criterion.index()].include(value);
            }
        }

        for range in ranges.iter_mut() {
            if range.min > range.max {
                *range = AttributeRange { min: 0.0, max: 0.0 };
            }
        }

        AttributeStats { ranges }
    }

    pub fn range(&self, criterion: Criterion) -> &AttributeRange {
        &self.ranges[criterion.index()]
    }

    #[inline(always)]
    pub fn normalize(&self, criterion: Criterion, value: f64) -> f64 {
        self.ranges[criterion.index()].normalize(value)
    }
}
