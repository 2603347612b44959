//! Penalty terms and the objective accumulator.

use crate::model::{BoolVar, Model};

/// A penalty: a boolean variable whose truth costs `coeff` in the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenaltyTerm {
    /// The penalty variable.
    pub var: BoolVar,
    /// Non-negative cost incurred when the variable is true.
    pub coeff: i64,
}

/// Collects penalty terms emitted by the encoders.
///
/// A single accumulator is threaded through all encoder invocations and
/// owns every `(variable, coefficient)` pair until
/// [`apply`](Self::apply) installs them as the model's minimize
/// objective. Without `apply`, the terms stay inert: the penalty
/// variables exist in the model but nothing references them.
///
/// # Examples
///
/// ```
/// use u_roster::encoding::ObjectiveAccumulator;
/// use u_roster::model::Model;
///
/// let mut model = Model::new("demo");
/// let p = model.new_bool_var("penalty");
/// let mut acc = ObjectiveAccumulator::new();
/// acc.push(p, 4);
/// acc.apply(&mut model);
/// assert_eq!(model.objective().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectiveAccumulator {
    terms: Vec<PenaltyTerm>,
}

impl ObjectiveAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a penalty term.
    pub fn push(&mut self, var: BoolVar, coeff: i64) {
        self.terms.push(PenaltyTerm { var, coeff });
    }

    /// Absorbs all terms of another accumulator.
    pub fn extend(&mut self, other: ObjectiveAccumulator) {
        self.terms.extend(other.terms);
    }

    /// The collected terms.
    pub fn terms(&self) -> &[PenaltyTerm] {
        &self.terms
    }

    /// Number of collected terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether no penalty has been recorded.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Installs the collected terms as the model's minimize objective.
    ///
    /// An empty accumulator leaves the model without an objective, so the
    /// solver runs in pure feasibility mode.
    pub fn apply(&self, model: &mut Model) {
        if !self.terms.is_empty() {
            model.set_objective(self.terms.iter().map(|t| (t.var, t.coeff)).collect());
        }
    }
}
