use std::time::{Duration, Instant};

use crate::{
    error::RouteError,
    graph::{EdgeDirection, Graph},
    types::{EdgeId, NodeId},
    weighting::{Weight, Weighting},
};

/// Limits on the effort a single search may spend.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchBudget {
    pub max_expansions: Option<usize>,
    pub deadline: Option<Instant>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        SearchBudget::default()
    }

    /// Caps the number of settled nodes. Zero lifts the cap.
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions).filter(|&max_expansions| max_expansions > 0);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Checked before settling a node, `expanded` nodes having been settled so far.
    pub fn check(&self, expanded: usize) -> Result<(), RouteError> {
        if self
            .max_expansions
            .is_some_and(|max_expansions| expanded >= max_expansions)
        {
            return Err(RouteError::SearchBudgetExceeded { expanded });
        }

        if self
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
        {
            return Err(RouteError::DeadlineExceeded { expanded });
        }

        Ok(())
    }
}

pub struct CalcPathResult {
    /// Traversed edges from start to end, with the direction each one is walked in
    pub edges: Vec<(EdgeId, EdgeDirection)>,
    pub weight: Weight,
    pub nodes_expanded: usize,
    pub duration: Duration,
}

pub trait CalcPath<G: Graph> {
    fn calc_path(
        &mut self,
        graph: &G,
        weighting: &impl Weighting,
        start: NodeId,
        end: NodeId,
        budget: &SearchBudget,
    ) -> Result<CalcPathResult, RouteError>;
}
