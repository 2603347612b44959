//! Roster configuration.
//!
//! [`RosterConfig`] holds every numeric parameter of the scheduling
//! problem: grid dimensions, cohort and tier partitions, block and cap
//! rules, and the per-resident workload bounds.

use std::ops::Range;

use crate::encoding::BoundSpec;

use super::types::{CohortSpec, ResidentCategory, RunRule, ServiceTier, StaffingRule};

/// Configuration for a rotation scheduling model.
///
/// Rotations are indexed `0..rotations`; the first `electives` indices
/// are electives, the rest are hard services partitioned into
/// [`ServiceTier`]s in order. Residents are partitioned into
/// [`CohortSpec`]s in order.
///
/// # Defaults
///
/// The default is a full-size residency program: 77 residents in five
/// cohorts, 20 rotations (6 electives + 14 hard services in five tiers),
/// 12 weeks.
///
/// ```
/// use u_roster::roster::RosterConfig;
///
/// let config = RosterConfig::default();
/// assert_eq!(config.residents, 77);
/// assert_eq!(config.rotations, 20);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_roster::roster::RosterConfig;
/// use u_roster::encoding::BoundSpec;
///
/// let config = RosterConfig::small()
///     .with_weeks(6)
///     .with_workload(BoundSpec::new(0, 2, 1, 6, 6, 0));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterConfig {
    /// Number of residents.
    pub residents: usize,
    /// Number of rotations (electives + hard services).
    pub rotations: usize,
    /// Number of weeks in the scheduling horizon.
    pub weeks: usize,
    /// Number of elective rotations (indices `0..electives`).
    pub electives: usize,

    /// Resident cohorts, in index order. Counts must sum to `residents`.
    pub cohorts: Vec<CohortSpec>,
    /// Hard-service tiers, in index order starting at `electives`.
    /// Counts must sum to `rotations - electives`.
    pub tiers: Vec<ServiceTier>,

    /// Elective blocks last exactly this many consecutive weeks.
    pub elective_block_weeks: usize,
    /// Maximum total weeks a resident spends on any one elective.
    pub elective_weeks_cap: usize,
    /// Maximum total weeks a resident spends on any one hard service.
    pub hard_service_weeks_cap: usize,

    /// Rotation index counted toward the primary-care minimum.
    pub primary_care_rotation: usize,
    /// Minimum primary-care weeks for primary-care cohorts.
    pub min_primary_care_weeks: usize,

    /// Rotation index counted toward the chief minimum.
    pub chief_rotation: usize,
    /// Week window in which the chief minimum applies.
    pub chief_window: Range<usize>,
    /// Minimum chief-service weeks inside the window for chief cohorts.
    pub min_chief_weeks: usize,

    /// Per-resident bounds on total weeks worked (the vacation rule).
    pub workload: BoundSpec,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            residents: 77,
            rotations: 20,
            weeks: 12,
            electives: 6,
            cohorts: vec![
                CohortSpec::new(ResidentCategory::PrimaryCareYear2, 4),
                CohortSpec::new(ResidentCategory::PrimaryCareYear3, 2),
                CohortSpec::new(ResidentCategory::Chief, 4),
                CohortSpec::new(ResidentCategory::NormalYear2, 34),
                CohortSpec::new(ResidentCategory::NormalYear3, 33),
            ],
            tiers: vec![
                ServiceTier::new(1, RunRule::Fixed(2), StaffingRule::Uniform(4)),
                ServiceTier::new(1, RunRule::Fixed(2), StaffingRule::AlternatingWeeks(4)),
                ServiceTier::new(2, RunRule::Bimodal(2, 4), StaffingRule::Uniform(4)),
                ServiceTier::new(2, RunRule::Fixed(4), StaffingRule::Uniform(2)),
                ServiceTier::new(8, RunRule::Fixed(4), StaffingRule::Uniform(1)),
            ],
            elective_block_weeks: 2,
            elective_weeks_cap: 2,
            hard_service_weeks_cap: 4,
            primary_care_rotation: 1,
            min_primary_care_weeks: 2,
            chief_rotation: 0,
            chief_window: 8..10,
            min_chief_weeks: 2,
            workload: BoundSpec::new(10, 11, 10, 11, 12, 10),
        }
    }
}

impl RosterConfig {
    /// A small instance for tests and examples: 3 residents, one
    /// elective plus one two-or-four-week hard service, 4 weeks.
    pub fn small() -> Self {
        Self {
            residents: 3,
            rotations: 2,
            weeks: 4,
            electives: 1,
            cohorts: vec![CohortSpec::new(ResidentCategory::NormalYear2, 3)],
            tiers: vec![ServiceTier::new(
                1,
                RunRule::Bimodal(2, 4),
                StaffingRule::Uniform(1),
            )],
            elective_block_weeks: 2,
            elective_weeks_cap: 2,
            hard_service_weeks_cap: 4,
            primary_care_rotation: 0,
            min_primary_care_weeks: 0,
            chief_rotation: 0,
            chief_window: 0..0,
            min_chief_weeks: 0,
            workload: BoundSpec::new(0, 1, 1, 4, 4, 0),
        }
    }

    /// Sets the resident count.
    pub fn with_residents(mut self, n: usize) -> Self {
        self.residents = n;
        self
    }

    /// Sets the week count.
    pub fn with_weeks(mut self, n: usize) -> Self {
        self.weeks = n;
        self
    }

    /// Sets the cohort partition.
    pub fn with_cohorts(mut self, cohorts: Vec<CohortSpec>) -> Self {
        self.cohorts = cohorts;
        self
    }

    /// Sets the hard-service tier partition.
    pub fn with_tiers(mut self, tiers: Vec<ServiceTier>) -> Self {
        self.tiers = tiers;
        self
    }

    /// Sets the per-resident workload bounds.
    pub fn with_workload(mut self, workload: BoundSpec) -> Self {
        self.workload = workload;
        self
    }

    /// Sets the chief-service window and minimum.
    pub fn with_chief_window(mut self, window: Range<usize>, min_weeks: usize) -> Self {
        self.chief_window = window;
        self.min_chief_weeks = min_weeks;
        self
    }

    /// Number of hard-service rotations.
    pub fn hard_services(&self) -> usize {
        self.rotations - self.electives
    }

    /// Elective rotation indices.
    pub fn elective_range(&self) -> Range<usize> {
        0..self.electives
    }

    /// Hard-service rotation indices.
    pub fn hard_service_range(&self) -> Range<usize> {
        self.electives..self.rotations
    }

    /// Expands the cohort partition into one category per resident.
    ///
    /// The explicit lookup replaces index-range arithmetic at the rule
    /// sites; [`validate`](Self::validate) guarantees full coverage.
    pub fn resident_categories(&self) -> Vec<ResidentCategory> {
        let mut categories = Vec::with_capacity(self.residents);
        for cohort in &self.cohorts {
            categories.extend(std::iter::repeat(cohort.category).take(cohort.count));
        }
        categories
    }

    /// Validates the configuration.
    ///
    /// Partition mismatches are rejected here: a cohort or tier list
    /// that does not exactly cover the resident or rotation range would
    /// otherwise leave some residents or rotations silently unruled.
    pub fn validate(&self) -> Result<(), String> {
        if self.residents == 0 || self.rotations == 0 || self.weeks == 0 {
            return Err("residents, rotations, and weeks must all be positive".into());
        }
        if self.electives > self.rotations {
            return Err(format!(
                "elective count {} exceeds rotation count {}",
                self.electives, self.rotations
            ));
        }

        let cohort_total: usize = self.cohorts.iter().map(|c| c.count).sum();
        if cohort_total != self.residents {
            return Err(format!(
                "cohort counts sum to {cohort_total}, expected {} residents",
                self.residents
            ));
        }
        let tier_total: usize = self.tiers.iter().map(|t| t.count).sum();
        if tier_total != self.hard_services() {
            return Err(format!(
                "tier counts sum to {tier_total}, expected {} hard services",
                self.hard_services()
            ));
        }

        for tier in &self.tiers {
            tier.run.validate(self.weeks)?;
            let headcount = tier.staffing.headcount();
            if headcount > self.residents {
                return Err(format!(
                    "tier staffing minimum {headcount} exceeds {} residents",
                    self.residents
                ));
            }
        }

        if self.elective_block_weeks == 0 || self.elective_block_weeks > self.weeks {
            return Err(format!(
                "elective block length {} outside 1..={}",
                self.elective_block_weeks, self.weeks
            ));
        }

        let categories = self.resident_categories();
        if categories.iter().any(|c| c.is_primary_care()) {
            if self.primary_care_rotation >= self.rotations {
                return Err(format!(
                    "primary-care rotation index {} out of range",
                    self.primary_care_rotation
                ));
            }
            if self.min_primary_care_weeks > self.weeks {
                return Err(format!(
                    "primary-care minimum {} exceeds horizon {}",
                    self.min_primary_care_weeks, self.weeks
                ));
            }
        }
        if categories.iter().any(|c| c.is_chief()) {
            if self.chief_rotation >= self.rotations {
                return Err(format!(
                    "chief rotation index {} out of range",
                    self.chief_rotation
                ));
            }
            if self.chief_window.end > self.weeks || self.chief_window.start > self.chief_window.end
            {
                return Err(format!(
                    "chief window {:?} outside horizon {}",
                    self.chief_window, self.weeks
                ));
            }
            if self.min_chief_weeks > self.chief_window.len() {
                return Err(format!(
                    "chief minimum {} exceeds window length {}",
                    self.min_chief_weeks,
                    self.chief_window.len()
                ));
            }
        }

        self.workload.validate()?;
        Ok(())
    }
}
