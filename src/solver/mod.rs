//! Solver interface and built-in search engine.
//!
//! The encoding layer only produces a declarative constraint set; search
//! lives behind the [`Solve`] trait so external engines can be plugged
//! in. [`SearchSolver`] is the built-in implementation: depth-first
//! search with unit propagation over clauses, bound propagation over
//! linear rows, and branch-and-bound on the objective. Solutions can be
//! enumerated lazily through [`SearchSolver::solutions`].

mod search;

pub use search::{SearchSolver, Solutions};

use crate::model::{BoolVar, Lit, Model};

/// Terminal status of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverStatus {
    /// Proven optimal solution found (search completed with an objective).
    Optimal,
    /// Feasible solution found, optimality not proven.
    Feasible,
    /// No feasible solution exists.
    Infeasible,
    /// The model failed validation.
    ModelInvalid,
    /// Search incomplete: the time budget expired before any conclusion.
    Unknown,
}

/// A complete boolean assignment satisfying the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    values: Vec<bool>,
    objective: Option<i64>,
}

impl Solution {
    pub(crate) fn new(values: Vec<bool>, objective: Option<i64>) -> Self {
        Self { values, objective }
    }

    /// Value of a variable in this solution.
    pub fn value(&self, var: BoolVar) -> bool {
        self.values[var.index()]
    }

    /// Value of a literal in this solution.
    pub fn literal_value(&self, lit: Lit) -> bool {
        lit.eval(self.values[lit.var().index()])
    }

    /// The full assignment, indexed by variable index.
    pub fn values(&self) -> &[bool] {
        &self.values
    }

    /// Objective value, when the model carries an objective.
    pub fn objective(&self) -> Option<i64> {
        self.objective
    }
}

/// Outcome of [`Solve::solve`].
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Terminal status.
    pub status: SolverStatus,
    /// Best solution found, if any.
    pub solution: Option<Solution>,
    /// Wall-clock solve time in milliseconds.
    pub solve_time_ms: u64,
}

impl SolveResult {
    /// Whether a feasible solution was found.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolverStatus::Optimal | SolverStatus::Feasible)
    }
}

/// Solver configuration.
///
/// # Examples
///
/// ```
/// use u_roster::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_time_limit_ms(5_000)
///     .with_solution_limit(10)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Wall-clock time budget in milliseconds.
    pub time_limit_ms: u64,
    /// Maximum number of solutions to enumerate.
    pub solution_limit: usize,
    /// Random seed shuffling the branching order.
    ///
    /// `None` keeps the deterministic variable order. A seed diversifies
    /// which solutions enumeration discovers first.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 10_000,
            solution_limit: usize::MAX,
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Sets the time budget in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets the enumeration limit.
    pub fn with_solution_limit(mut self, limit: usize) -> Self {
        self.solution_limit = limit;
        self
    }

    /// Sets the branching-order seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.time_limit_ms == 0 {
            return Err("time_limit_ms must be positive".into());
        }
        if self.solution_limit == 0 {
            return Err("solution_limit must be positive".into());
        }
        Ok(())
    }
}

/// Trait for solver implementations.
///
/// Implementors accept a frozen model and a time budget and report a
/// terminal [`SolverStatus`]. The model is read-only input: a solver
/// never adds variables or constraints.
pub trait Solve {
    /// Solves the model within the configured time budget.
    fn solve(&self, model: &Model, config: &SolverConfig) -> SolveResult;
}
