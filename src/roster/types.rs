//! Resident and rotation classification types.

/// Training category of a resident.
///
/// Determines which cohort rule set applies. Assigned once when the
/// cohort partition is expanded and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResidentCategory {
    /// Chief residents: minimum chief-service weeks inside a fixed window.
    Chief,
    /// Second-year primary-care residents.
    PrimaryCareYear2,
    /// Third-year primary-care residents.
    PrimaryCareYear3,
    /// Second-year residents without a special track.
    NormalYear2,
    /// Third-year residents without a special track.
    NormalYear3,
}

impl ResidentCategory {
    /// Whether the primary-care minimum applies to this category.
    pub fn is_primary_care(self) -> bool {
        matches!(
            self,
            ResidentCategory::PrimaryCareYear2 | ResidentCategory::PrimaryCareYear3
        )
    }

    /// Whether the chief-window minimum applies to this category.
    pub fn is_chief(self) -> bool {
        self == ResidentCategory::Chief
    }
}

/// Run-length rule of a hard-service tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunRule {
    /// Every block lasts exactly this many consecutive weeks.
    Fixed(usize),
    /// Every block lasts exactly the first or exactly the second length.
    Bimodal(usize, usize),
}

impl RunRule {
    /// Longest block length this rule admits.
    pub fn max_len(self) -> usize {
        match self {
            RunRule::Fixed(len) => len,
            RunRule::Bimodal(_, long) => long,
        }
    }

    /// Validates lengths against the scheduling horizon.
    pub fn validate(self, weeks: usize) -> Result<(), String> {
        match self {
            RunRule::Fixed(len) => {
                if len == 0 || len > weeks {
                    return Err(format!("fixed run length {len} outside 1..={weeks}"));
                }
            }
            RunRule::Bimodal(short, long) => {
                if short == 0 || short >= long {
                    return Err(format!("bimodal run lengths {short}/{long} must satisfy 0 < short < long"));
                }
                if long > weeks {
                    return Err(format!("bimodal run length {long} exceeds horizon {weeks}"));
                }
            }
        }
        Ok(())
    }
}

/// Weekly staffing rule of a hard-service tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaffingRule {
    /// At least this many residents, every week.
    Uniform(usize),
    /// At least this many residents, on every other week (even weeks).
    AlternatingWeeks(usize),
}

impl StaffingRule {
    /// The minimum headcount this rule demands on staffed weeks.
    pub fn headcount(self) -> usize {
        match self {
            StaffingRule::Uniform(n) | StaffingRule::AlternatingWeeks(n) => n,
        }
    }
}

/// A contiguous group of residents sharing a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CohortSpec {
    /// Category applied to every resident of the cohort.
    pub category: ResidentCategory,
    /// Number of residents in the cohort.
    pub count: usize,
}

impl CohortSpec {
    /// Creates a cohort spec.
    pub fn new(category: ResidentCategory, count: usize) -> Self {
        Self { category, count }
    }
}

/// A contiguous group of hard-service rotations sharing run-length and
/// staffing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceTier {
    /// Number of rotations in the tier.
    pub count: usize,
    /// Block length rule per (resident, rotation) pair.
    pub run: RunRule,
    /// Weekly minimum headcount rule.
    pub staffing: StaffingRule,
}

impl ServiceTier {
    /// Creates a service tier.
    pub fn new(count: usize, run: RunRule, staffing: StaffingRule) -> Self {
        Self {
            count,
            run,
            staffing,
        }
    }
}
