use std::{
    fmt,
    iter::Sum,
    marker::PhantomData,
    ops::{Add, Sub},
};

use serde::{Serialize, Serializer};

pub trait DistanceUnit: Copy + Eq + Ord {
    const SYMBOL: &'static str;
    const NANOMETERS_IN_UNIT: i64;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Meters;

impl DistanceUnit for Meters {
    const SYMBOL: &'static str = "m";
    const NANOMETERS_IN_UNIT: i64 = 1_000_000_000;
}

/// A physical distance stored as integer nanometers.
///
/// Integer storage keeps sums exact and independent of summation order, so two
/// identical paths always report identical distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Distance<T: DistanceUnit> {
    nm: i64,
    unit: PhantomData<T>,
}

impl<T: DistanceUnit> Distance<T> {
    fn from_nanometers(nm: i64) -> Self {
        Distance {
            nm,
            unit: PhantomData,
        }
    }

    pub fn zero() -> Self {
        Distance::from_nanometers(0)
    }

    #[inline(always)]
    pub fn value(&self) -> f64 {
        (self.nm as f64) / (T::NANOMETERS_IN_UNIT as f64)
    }
}

impl<T: DistanceUnit> Default for Distance<T> {
    fn default() -> Self {
        Distance::zero()
    }
}

impl<T: DistanceUnit> fmt::Display for Distance<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.1} {}", self.value(), T::SYMBOL)
    }
}

impl<T: DistanceUnit> Serialize for Distance<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl<T: DistanceUnit> From<f64> for Distance<T> {
    fn from(value: f64) -> Self {
        Distance::from_nanometers((value * (T::NANOMETERS_IN_UNIT as f64)).round() as i64)
    }
}

impl<T: DistanceUnit> From<i64> for Distance<T> {
    fn from(value: i64) -> Self {
        Distance::from_nanometers(value * T::NANOMETERS_IN_UNIT)
    }
}

impl<T: DistanceUnit> Add for Distance<T> {
    type Output = Distance<T>;

    fn add(self, other: Distance<T>) -> Distance<T> {
        Distance::from_nanometers(self.nm + other.nm)
    }
}

impl<T: DistanceUnit> Sub for Distance<T> {
    type Output = Distance<T>;

    fn sub(self, other: Distance<T>) -> Distance<T> {
        Distance::from_nanometers(self.nm - other.nm)
    }
}

impl<T: DistanceUnit> Sum for Distance<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Distance::zero(), |acc, distance| acc + distance)
    }
}

#[macro_export]
macro_rules! meters {
    ($num:expr) => {
        $crate::distance::Distance::<$crate::distance::Meters>::from($num)
    };
}
