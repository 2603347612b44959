//! Rule composition.
//!
//! Applies cohort-, tier-, and resident-level rules to the decision
//! grid by invoking the encoders with group-specific parameters, then
//! hands back the assembled model together with the collected
//! penalties.

use crate::encoding::{
    add_bimodal_run, add_fixed_run, add_soft_sum, ObjectiveAccumulator,
};
use crate::model::Model;

use super::config::RosterConfig;
use super::grid::ShiftGrid;
use super::types::{RunRule, StaffingRule};

/// The assembled scheduling model.
///
/// `model` holds every variable and constraint; `penalties` holds the
/// terms the encoders emitted. The penalties stay inert until
/// [`with_objective`](Self::with_objective) installs them as a minimize
/// objective — without it the model solves in pure feasibility mode.
#[derive(Debug, Clone)]
pub struct RosterModel {
    /// The constraint model.
    pub model: Model,
    /// The decision grid the model was built over.
    pub grid: ShiftGrid,
    /// Penalty terms collected from all encoder invocations.
    pub penalties: ObjectiveAccumulator,
}

impl RosterModel {
    /// Installs the collected penalties as the minimize objective.
    pub fn with_objective(mut self) -> Self {
        self.penalties.apply(&mut self.model);
        self
    }
}

/// Builds a scheduling model from a validated [`RosterConfig`].
///
/// # Example
///
/// ```
/// use u_roster::roster::{RosterBuilder, RosterConfig};
///
/// let builder = RosterBuilder::new(RosterConfig::small()).unwrap();
/// let roster = builder.build();
/// assert!(roster.model.validate().is_ok());
/// ```
pub struct RosterBuilder {
    config: RosterConfig,
}

impl RosterBuilder {
    /// Validates the configuration and creates a builder.
    pub fn new(config: RosterConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Builds the full model: grid, cohort rules, elective rules,
    /// hard-service tier rules, and the workload soft sum.
    pub fn build(&self) -> RosterModel {
        let mut model = Model::new("roster");
        let grid = ShiftGrid::new(&mut model, &self.config);
        let mut penalties = ObjectiveAccumulator::new();

        self.apply_cohort_rules(&mut model, &grid);
        self.apply_elective_rules(&mut model, &grid);
        self.apply_service_rules(&mut model, &grid);
        self.apply_workload_rule(&mut model, &grid, &mut penalties);

        RosterModel {
            model,
            grid,
            penalties,
        }
    }

    /// Category-specific minimums, driven by the per-resident category
    /// lookup rather than index ranges.
    fn apply_cohort_rules(&self, model: &mut Model, grid: &ShiftGrid) {
        let config = &self.config;
        for (r, category) in config.resident_categories().into_iter().enumerate() {
            if category.is_primary_care() && config.min_primary_care_weeks > 0 {
                let works = grid.rotation_weeks(r, config.primary_care_rotation);
                model.add_at_least(&works, config.min_primary_care_weeks as i64);
            }
            if category.is_chief() && config.min_chief_weeks > 0 {
                let works: Vec<_> = config
                    .chief_window
                    .clone()
                    .map(|w| grid.shift(r, config.chief_rotation, w))
                    .collect();
                model.add_at_least(&works, config.min_chief_weeks as i64);
            }
        }
    }

    /// Electives: blocks of exactly `elective_block_weeks` consecutive
    /// weeks, and a total-weeks cap per (resident, elective).
    fn apply_elective_rules(&self, model: &mut Model, grid: &ShiftGrid) {
        let config = &self.config;
        for r in 0..config.residents {
            for e in config.elective_range() {
                let works = grid.rotation_weeks(r, e);
                add_fixed_run(model, &works, config.elective_block_weeks);
                model.add_at_most(&works, config.elective_weeks_cap as i64);
            }
        }
    }

    /// Hard services: per-tier run-length rules per (resident, rotation),
    /// weekly staffing minimums, and the total-weeks cap.
    fn apply_service_rules(&self, model: &mut Model, grid: &ShiftGrid) {
        let config = &self.config;
        let mut next = config.electives;
        for tier in &config.tiers {
            let services = next..next + tier.count;
            next = services.end;

            for s in services {
                for r in 0..config.residents {
                    let works = grid.rotation_weeks(r, s);
                    match tier.run {
                        RunRule::Fixed(len) => add_fixed_run(model, &works, len),
                        RunRule::Bimodal(short, long) => {
                            add_bimodal_run(model, &works, short, long)
                        }
                    }
                    model.add_at_most(&works, config.hard_service_weeks_cap as i64);
                }

                match tier.staffing {
                    StaffingRule::Uniform(n) => {
                        for w in 0..config.weeks {
                            model.add_at_least(&grid.rotation_staff(s, w), n as i64);
                        }
                    }
                    StaffingRule::AlternatingWeeks(n) => {
                        for w in (0..config.weeks).step_by(2) {
                            model.add_at_least(&grid.rotation_staff(s, w), n as i64);
                        }
                    }
                }
            }
        }
    }

    /// Per-resident total workload: the vacation rule as a soft sum over
    /// every (rotation, week) variable of the resident.
    fn apply_workload_rule(
        &self,
        model: &mut Model,
        grid: &ShiftGrid,
        penalties: &mut ObjectiveAccumulator,
    ) {
        for r in 0..self.config.residents {
            let works = grid.resident_assignments(r);
            add_soft_sum(
                model,
                &works,
                &self.config.workload,
                &format!("workload(resident {r})"),
                penalties,
            );
        }
    }
}
