use super::criterion::Criterion;

/// Raw, unnormalized attribute values of one edge, indexed by [`Criterion`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeAttributes([f64; Criterion::COUNT]);

impl EdgeAttributes {
    pub fn new(values: [f64; Criterion::COUNT]) -> Self {
        EdgeAttributes(values)
    }

    /// Every criterion set to the same value.
    pub fn uniform(value: f64) -> Self {
        EdgeAttributes([value; Criterion::COUNT])
    }

    #[inline(always)]
    pub fn get(&self, criterion: Criterion) -> f64 {
        self.0[criterion.index()]
    }

    pub fn set(&mut self, criterion: Criterion, value: f64) {
        self.0[criterion.index()] = value;
    }

    pub fn with(mut self, criterion: Criterion, value: f64) -> Self {
        self.set(criterion, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        Criterion::ALL
            .iter()
            .map(|&criterion| (criterion, self.get(criterion)))
    }
}
