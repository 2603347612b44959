//! Hard/soft bound specifications.

/// Bounds on a run length or a count, with optional soft tiers.
///
/// The hard bounds `[hard_min, hard_max]` must hold in every valid
/// assignment. The soft bounds `[soft_min, soft_max]` are preferred:
/// values below `soft_min` cost `min_cost` per unit of shortfall, values
/// above `soft_max` cost `max_cost` per unit of excess. A zero cost
/// disables the corresponding soft tier.
///
/// Invariant: `hard_min <= soft_min <= soft_max <= hard_max`. The
/// encoders assume a valid spec; call [`validate`](Self::validate) first
/// when the spec comes from configuration.
///
/// # Examples
///
/// ```
/// use u_roster::encoding::BoundSpec;
///
/// // between 10 and 12, ideally exactly 11, 10 cost units per week off
/// let spec = BoundSpec::new(10, 11, 10, 11, 12, 10);
/// assert!(spec.validate().is_ok());
///
/// let hard = BoundSpec::hard(2, 4);
/// assert!(!hard.has_soft_min());
/// assert!(!hard.has_soft_max());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundSpec {
    /// Minimum value in every valid assignment.
    pub hard_min: usize,
    /// Preferred minimum; shortfalls below it are penalized.
    pub soft_min: usize,
    /// Cost per unit below `soft_min` (0 disables the tier).
    pub min_cost: i64,
    /// Preferred maximum; excesses above it are penalized.
    pub soft_max: usize,
    /// Maximum value in every valid assignment.
    pub hard_max: usize,
    /// Cost per unit above `soft_max` (0 disables the tier).
    pub max_cost: i64,
}

impl BoundSpec {
    /// Creates a bound spec. Argument order follows the tuple
    /// `(hard_min, soft_min, min_cost, soft_max, hard_max, max_cost)`.
    pub fn new(
        hard_min: usize,
        soft_min: usize,
        min_cost: i64,
        soft_max: usize,
        hard_max: usize,
        max_cost: i64,
    ) -> Self {
        Self {
            hard_min,
            soft_min,
            min_cost,
            soft_max,
            hard_max,
            max_cost,
        }
    }

    /// A purely hard spec: no soft tiers, no costs.
    pub fn hard(min: usize, max: usize) -> Self {
        Self::new(min, min, 0, max, max, 0)
    }

    /// Whether the under-shoot soft tier is active.
    pub fn has_soft_min(&self) -> bool {
        self.min_cost > 0 && self.soft_min > self.hard_min
    }

    /// Whether the over-shoot soft tier is active.
    pub fn has_soft_max(&self) -> bool {
        self.max_cost > 0 && self.hard_max > self.soft_max
    }

    /// Validates the bound ordering and cost signs.
    pub fn validate(&self) -> Result<(), String> {
        if self.hard_min > self.soft_min {
            return Err(format!(
                "bound spec: hard_min {} exceeds soft_min {}",
                self.hard_min, self.soft_min
            ));
        }
        if self.soft_min > self.soft_max {
            return Err(format!(
                "bound spec: soft_min {} exceeds soft_max {}",
                self.soft_min, self.soft_max
            ));
        }
        if self.soft_max > self.hard_max {
            return Err(format!(
                "bound spec: soft_max {} exceeds hard_max {}",
                self.soft_max, self.hard_max
            ));
        }
        if self.min_cost < 0 || self.max_cost < 0 {
            return Err("bound spec: costs must be non-negative".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_spec() {
        assert!(BoundSpec::new(10, 11, 10, 11, 12, 10).validate().is_ok());
        assert!(BoundSpec::hard(0, 5).validate().is_ok());
    }

    #[test]
    fn test_invalid_ordering() {
        assert!(BoundSpec::new(3, 2, 1, 4, 5, 1).validate().is_err());
        assert!(BoundSpec::new(1, 4, 1, 3, 5, 1).validate().is_err());
        assert!(BoundSpec::new(1, 2, 1, 6, 5, 1).validate().is_err());
    }

    #[test]
    fn test_negative_cost() {
        assert!(BoundSpec::new(1, 2, -1, 3, 4, 0).validate().is_err());
    }

    #[test]
    fn test_soft_tier_flags() {
        let spec = BoundSpec::new(1, 2, 5, 3, 4, 0);
        assert!(spec.has_soft_min());
        assert!(!spec.has_soft_max());

        // zero cost disables the tier even when the bounds leave room
        let spec = BoundSpec::new(1, 2, 0, 3, 4, 7);
        assert!(!spec.has_soft_min());
        assert!(spec.has_soft_max());
    }
}
