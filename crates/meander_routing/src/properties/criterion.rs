use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Polarity {
    /// Desirable attributes, inverted before weighting so that more of them costs less
    HigherIsBetter,
    HigherIsWorse,
}

/// Environmental attributes carried by every edge of the walking network.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    GreenIndex,
    WaterIndex,
    ShadeIndex,
    SlopeIndex,
    RoadSafety,
    Isolation,
}

impl Criterion {
    pub const COUNT: usize = 6;

    pub const ALL: [Criterion; Criterion::COUNT] = [
        Criterion::GreenIndex,
        Criterion::WaterIndex,
        Criterion::ShadeIndex,
        Criterion::SlopeIndex,
        Criterion::RoadSafety,
        Criterion::Isolation,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn polarity(self) -> Polarity {
        match self {
            Criterion::GreenIndex
            | Criterion::WaterIndex
            | Criterion::ShadeIndex
            | Criterion::RoadSafety => Polarity::HigherIsBetter,
            Criterion::SlopeIndex | Criterion::Isolation => Polarity::HigherIsWorse,
        }
    }

    /// Property name of the raw attribute in the network export.
    pub fn property_name(self) -> &'static str {
        match self {
            Criterion::GreenIndex => "green_index",
            Criterion::WaterIndex => "water_index",
            Criterion::ShadeIndex => "shade_index",
            Criterion::SlopeIndex => "slope_index",
            Criterion::RoadSafety => "road_safety",
            Criterion::Isolation => "isolation",
        }
    }

    /// Key of the matching preference weight.
    pub fn weight_key(self) -> &'static str {
        match self {
            Criterion::GreenIndex => "weight_green_index",
            Criterion::WaterIndex => "weight_water_index",
            Criterion::ShadeIndex => "weight_shade_index",
            Criterion::SlopeIndex => "weight_slope_index",
            Criterion::RoadSafety => "weight_road_safety",
            Criterion::Isolation => "weight_isolation",
        }
    }
}
