//! Rule composition layer.
//!
//! Turns a [`RosterConfig`] — grid dimensions, resident cohorts,
//! rotation tiers, caps, and workload bounds — into a full constraint
//! model by querying the [`ShiftGrid`] for decision variables and
//! invoking the encoders with cohort/tier-specific parameters.
//!
//! # Key Components
//!
//! - **Types**: [`ResidentCategory`], [`RunRule`], [`StaffingRule`],
//!   [`CohortSpec`], [`ServiceTier`]
//! - **Config**: [`RosterConfig`] — validated numeric configuration
//! - **Grid**: [`ShiftGrid`] — the (resident, rotation, week) decision
//!   grid with its structural constraints
//! - **Builder**: [`RosterBuilder`] — composes everything into a
//!   [`RosterModel`]
//! - **Report**: [`ScheduleTable`] — decoded solution for display

mod config;
mod grid;
mod report;
mod rules;
mod types;

pub use config::RosterConfig;
pub use grid::ShiftGrid;
pub use report::ScheduleTable;
pub use rules::{RosterBuilder, RosterModel};
pub use types::{CohortSpec, ResidentCategory, RunRule, ServiceTier, StaffingRule};
