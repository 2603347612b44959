//! Aggregate-count (sum) encoder.
//!
//! Constrains the number of true values in a boolean sequence — the
//! total weeks a resident works, regardless of position. Hard bounds
//! become linear rows; soft bounds become unit slack literals folded
//! into the rows, so the penalty terms have the same shape as the
//! sequence encoder's.

use crate::model::{BoolVar, CmpOp, Model};

use super::bounds::BoundSpec;
use super::objective::ObjectiveAccumulator;

/// Encodes count bounds with soft tiers.
///
/// Adds the hard rows `Σ works >= hard_min` and `Σ works <= hard_max`.
/// When a soft tier is active, one slack literal per unit of allowed
/// shortfall (or excess) joins a third row:
///
/// - `Σ works + Σ under_k >= soft_min`, each `under_k` costing `min_cost`
/// - `Σ works - Σ over_k  <= soft_max`, each `over_k` costing `max_cost`
///
/// Under minimization exactly `max(0, soft_min - count)` under-slacks
/// (resp. `max(0, count - soft_max)` over-slacks) are forced true, so
/// the penalty is proportional to the violation. An empty `works` adds
/// nothing and constrains nothing.
pub fn add_soft_sum(
    model: &mut Model,
    works: &[BoolVar],
    spec: &BoundSpec,
    prefix: &str,
    penalties: &mut ObjectiveAccumulator,
) {
    if works.is_empty() {
        return;
    }
    let ones = vec![1i64; works.len()];

    model.add_linear(works.to_vec(), ones.clone(), CmpOp::Ge, spec.hard_min as i64);
    model.add_linear(works.to_vec(), ones.clone(), CmpOp::Le, spec.hard_max as i64);

    if spec.has_soft_min() {
        let mut vars = works.to_vec();
        let mut coeffs = ones.clone();
        for k in 0..spec.soft_min - spec.hard_min {
            let slack = model.new_bool_var(format!("{prefix}: under_sum({k})"));
            vars.push(slack);
            coeffs.push(1);
            penalties.push(slack, spec.min_cost);
        }
        model.add_linear(vars, coeffs, CmpOp::Ge, spec.soft_min as i64);
    }

    if spec.has_soft_max() {
        let mut vars = works.to_vec();
        let mut coeffs = ones;
        for k in 0..spec.hard_max - spec.soft_max {
            let slack = model.new_bool_var(format!("{prefix}: over_sum({k})"));
            vars.push(slack);
            coeffs.push(-1);
            penalties.push(slack, spec.max_cost);
        }
        model.add_linear(vars, coeffs, CmpOp::Le, spec.soft_max as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_model(n: usize) -> (Model, Vec<BoolVar>) {
        let mut model = Model::new("test");
        let works = (0..n).map(|w| model.new_bool_var(format!("w{w}"))).collect();
        (model, works)
    }

    /// Minimum achievable penalty for a fixed pattern: slack variables set
    /// to the smallest configuration that satisfies every row.
    fn best_penalty(model: &Model, acc: &ObjectiveAccumulator, pattern: &[bool]) -> Option<i64> {
        let extra = model.num_vars() - pattern.len();
        let mut best: Option<i64> = None;
        for bits in 0..1u32 << extra {
            let mut assignment = pattern.to_vec();
            for i in 0..extra {
                assignment.push(bits >> i & 1 == 1);
            }
            if model.evaluate(&assignment) {
                let cost: i64 = acc
                    .terms()
                    .iter()
                    .filter(|t| assignment[t.var.index()])
                    .map(|t| t.coeff)
                    .sum();
                best = Some(best.map_or(cost, |b: i64| b.min(cost)));
            }
        }
        best
    }

    #[test]
    fn test_hard_count_bounds() {
        let (mut model, works) = count_model(5);
        let mut acc = ObjectiveAccumulator::new();
        add_soft_sum(&mut model, &works, &BoundSpec::hard(2, 4), "sum", &mut acc);
        assert!(acc.is_empty());
        assert_eq!(model.linear_count(), 2);

        for bits in 0..1u32 << 5 {
            let pattern: Vec<bool> = (0..5).map(|i| bits >> i & 1 == 1).collect();
            let count = pattern.iter().filter(|&&v| v).count();
            assert_eq!(model.evaluate(&pattern), (2..=4).contains(&count));
        }
    }

    #[test]
    fn test_penalty_proportional_to_shortfall() {
        let (mut model, works) = count_model(6);
        let mut acc = ObjectiveAccumulator::new();
        add_soft_sum(
            &mut model,
            &works,
            &BoundSpec::new(0, 3, 5, 4, 6, 7),
            "sum",
            &mut acc,
        );

        for count in 0..=6usize {
            let pattern: Vec<bool> = (0..6).map(|i| i < count).collect();
            let expected = 5 * (3 - count as i64).max(0) + 7 * (count as i64 - 4).max(0);
            assert_eq!(
                best_penalty(&model, &acc, &pattern),
                Some(expected),
                "count {count}"
            );
        }
    }

    #[test]
    fn test_slack_counts_match_tier_widths() {
        let (mut model, works) = count_model(8);
        let base = model.num_vars();
        let mut acc = ObjectiveAccumulator::new();
        add_soft_sum(
            &mut model,
            &works,
            &BoundSpec::new(1, 3, 2, 5, 8, 4),
            "sum",
            &mut acc,
        );
        // two under-slacks (soft_min - hard_min), three over-slacks
        assert_eq!(model.num_vars() - base, 5);
        assert_eq!(acc.len(), 5);
        assert_eq!(acc.terms().iter().filter(|t| t.coeff == 2).count(), 2);
        assert_eq!(acc.terms().iter().filter(|t| t.coeff == 4).count(), 3);
    }

    #[test]
    fn test_inactive_tiers_add_nothing() {
        let (mut model, works) = count_model(4);
        let base = model.num_vars();
        let mut acc = ObjectiveAccumulator::new();
        // costs present but soft bounds collapse onto hard bounds
        add_soft_sum(
            &mut model,
            &works,
            &BoundSpec::new(1, 1, 9, 3, 3, 9),
            "sum",
            &mut acc,
        );
        assert_eq!(model.num_vars(), base);
        assert_eq!(model.linear_count(), 2);
        assert!(acc.is_empty());
    }

    #[test]
    fn test_empty_sequence_is_a_no_op() {
        let mut model = Model::new("test");
        let mut acc = ObjectiveAccumulator::new();
        add_soft_sum(
            &mut model,
            &[],
            &BoundSpec::new(1, 2, 3, 3, 4, 5),
            "sum",
            &mut acc,
        );
        assert_eq!(model.linear_count(), 0);
        assert_eq!(model.num_vars(), 0);
        assert!(acc.is_empty());
    }

    #[test]
    fn test_unique_names_across_invocations() {
        let (mut model, works) = count_model(4);
        let spec = BoundSpec::new(0, 2, 1, 2, 4, 1);
        let mut acc = ObjectiveAccumulator::new();
        add_soft_sum(&mut model, &works, &spec, "resident 0", &mut acc);
        add_soft_sum(&mut model, &works, &spec, "resident 1", &mut acc);
        assert!(model.validate().is_ok());
    }
}
