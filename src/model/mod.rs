//! Boolean model layer.
//!
//! The substrate the encoders write into: named boolean variables,
//! disjunctive clauses, and linear rows over 0/1 variables, with an
//! optional weighted minimize objective.
//!
//! This module defines the modeling layer only; search lives behind the
//! [`Solve`](crate::solver::Solve) trait in [`crate::solver`].

mod model;
mod variables;

pub use model::{CmpOp, LinearConstraint, Model};
pub use variables::{BoolVar, Lit};
