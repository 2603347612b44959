//! Boolean constraint encoding for resident rotation scheduling.
//!
//! Translates high-level rostering rules ("a hard-service block lasts
//! exactly 2 or exactly 4 weeks", "each resident works between 10 and 12
//! weeks, ideally 11") into primitive boolean clauses and linear
//! inequalities, producing a declarative model that any boolean/integer
//! constraint engine can consume.
//!
//! # Key Components
//!
//! - **Model**: [`model::Model`] — named boolean variables, clauses,
//!   linear rows, optional minimize objective.
//! - **Encoders**: [`encoding`] — run-length (sequence) and count (sum)
//!   encoders with hard and soft bounds, plus the fixed-length and
//!   two-or-four-week (bimodal) run variants.
//! - **Rules**: [`roster`] — resident cohorts, rotation tiers, and the
//!   [`roster::RosterBuilder`] that composes the encoders into a full
//!   scheduling model.
//! - **Solver**: [`solver`] — the [`solver::Solve`] trait for pluggable
//!   engines and a built-in depth-first [`solver::SearchSolver`] with
//!   lazy solution enumeration.
//!
//! # Design
//!
//! Model construction is single-threaded and deterministic; the model is
//! frozen once handed to a solver. The encoding layer performs no search
//! itself — infeasibility and optimality are discovered only at solve
//! time and surfaced as a [`solver::SolverStatus`].
//!
//! # Example
//!
//! ```
//! use u_roster::roster::{RosterBuilder, RosterConfig};
//! use u_roster::solver::{SearchSolver, Solve, SolverConfig};
//!
//! let builder = RosterBuilder::new(RosterConfig::small()).unwrap();
//! let roster = builder.build().with_objective();
//! let result = SearchSolver::new().solve(&roster.model, &SolverConfig::default());
//! assert!(result.is_solution_found());
//! ```

pub mod encoding;
pub mod model;
pub mod roster;
pub mod solver;
