//! Constraint encoders.
//!
//! The algorithms that translate scheduling rules into primitive
//! clauses and linear rows:
//!
//! - [`add_soft_sequence`] — run-length bounds with penalty literals for
//!   undesired-but-allowed lengths (O(n²) bounded-span clauses over
//!   window positions).
//! - [`add_fixed_run`] / [`add_bimodal_run`] — hard run-length variants
//!   ("exactly L", "exactly A or exactly B").
//! - [`add_soft_sum`] — count bounds with unit slack penalties.
//! - [`ObjectiveAccumulator`] — owns every penalty term until it is
//!   installed as the model's minimize objective.

mod bounds;
mod objective;
mod sequence;
mod sum;

pub use bounds::BoundSpec;
pub use objective::{ObjectiveAccumulator, PenaltyTerm};
pub use sequence::{add_bimodal_run, add_fixed_run, add_soft_sequence, negated_bounded_span};
pub use sum::add_soft_sum;
