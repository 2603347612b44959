//! Run-length (sequence) encoder.
//!
//! Constrains the lengths of maximal true-runs in a boolean sequence —
//! one variable per week for a fixed (resident, rotation) pair. Hard
//! bounds become clauses; soft bounds become penalty literals whose
//! coefficients grow with the distance from the preferred length.

use crate::model::{BoolVar, Lit, Model};

use super::bounds::BoundSpec;
use super::objective::ObjectiveAccumulator;

/// Literals that together rule out an isolated true-run of exactly
/// `length` starting at `start`.
///
/// The returned clause is satisfied unless `works[start..start+length]`
/// are all true with a false (or sequence boundary) on both sides: it
/// contains the value before the window, the negation of every value in
/// the window, and the value after the window. Borders at the sequence
/// boundary are omitted.
pub fn negated_bounded_span(works: &[BoolVar], start: usize, length: usize) -> Vec<Lit> {
    let mut span = Vec::with_capacity(length + 2);
    if start > 0 {
        span.push(works[start - 1].lit());
    }
    for i in start..start + length {
        span.push(!works[i]);
    }
    if start + length < works.len() {
        span.push(works[start + length].lit());
    }
    span
}

/// Encodes run-length bounds with soft tiers.
///
/// - Runs shorter than `spec.hard_min` are forbidden.
/// - Runs of length `l` in `[hard_min, soft_min)` are allowed but charge
///   `min_cost * (soft_min - l)` through a fresh penalty literal.
/// - Runs of length `l` in `(soft_max, hard_max]` charge
///   `max_cost * (l - soft_max)` symmetrically.
/// - Any `hard_max + 1` consecutive true values are forbidden outright.
///
/// Penalty literal names embed `prefix` and the window position, so a
/// distinct `prefix` per invocation keeps names unique across the model.
/// An empty `works` adds nothing.
pub fn add_soft_sequence(
    model: &mut Model,
    works: &[BoolVar],
    spec: &BoundSpec,
    prefix: &str,
    penalties: &mut ObjectiveAccumulator,
) {
    if works.is_empty() {
        return;
    }
    let n = works.len();

    // Forbid runs shorter than hard_min.
    for length in 1..spec.hard_min {
        for start in 0..(n + 1).saturating_sub(length) {
            model.add_clause(negated_bounded_span(works, start, length));
        }
    }

    // Penalize runs below soft_min.
    if spec.min_cost > 0 {
        for length in spec.hard_min..spec.soft_min {
            for start in 0..(n + 1).saturating_sub(length) {
                let mut span = negated_bounded_span(works, start, length);
                let lit = model.new_bool_var(format!(
                    "{prefix}: under_span(start={start}, length={length})"
                ));
                span.push(lit.lit());
                model.add_clause(span);
                penalties.push(lit, spec.min_cost * (spec.soft_min - length) as i64);
            }
        }
    }

    // Penalize runs above soft_max.
    if spec.max_cost > 0 {
        for length in spec.soft_max + 1..=spec.hard_max {
            for start in 0..(n + 1).saturating_sub(length) {
                let mut span = negated_bounded_span(works, start, length);
                let lit = model.new_bool_var(format!(
                    "{prefix}: over_span(start={start}, length={length})"
                ));
                span.push(lit.lit());
                model.add_clause(span);
                penalties.push(lit, spec.max_cost * (length - spec.soft_max) as i64);
            }
        }
    }

    // Forbid any run of hard_max + 1 consecutive true values. No span
    // borders needed: exceeding hard_max is unacceptable at any width.
    for start in 0..n.saturating_sub(spec.hard_max) {
        let clause = (start..=start + spec.hard_max).map(|i| !works[i]).collect();
        model.add_clause(clause);
    }
}

/// Hard variant: every maximal true-run must have length exactly `length`.
///
/// Combines "forbid shorter than `length`" with "forbid `length + 1`
/// consecutive trues"; no penalty machinery. An all-false sequence stays
/// valid (the rule constrains runs, not presence).
pub fn add_fixed_run(model: &mut Model, works: &[BoolVar], length: usize) {
    if works.is_empty() {
        return;
    }
    let n = works.len();
    for l in 1..length {
        for start in 0..(n + 1).saturating_sub(l) {
            model.add_clause(negated_bounded_span(works, start, l));
        }
    }
    for start in 0..n.saturating_sub(length) {
        let clause = (start..=start + length).map(|i| !works[i]).collect();
        model.add_clause(clause);
    }
}

/// Bimodal variant: every maximal true-run must have length exactly
/// `short` or exactly `long`.
///
/// Used for hard-service blocks that must last 2 or 4 weeks. Every run
/// length in `{1, .., long}` other than the two admitted ones is ruled
/// out with a bounded-span clause, and `long + 1` consecutive trues are
/// forbidden outright. Purely hard; no soft tier.
///
/// Precondition: `0 < short < long`.
pub fn add_bimodal_run(model: &mut Model, works: &[BoolVar], short: usize, long: usize) {
    if works.is_empty() {
        return;
    }
    let n = works.len();
    for l in 1..long {
        if l == short {
            continue;
        }
        for start in 0..(n + 1).saturating_sub(l) {
            model.add_clause(negated_bounded_span(works, start, l));
        }
    }
    for start in 0..n.saturating_sub(long) {
        let clause = (start..=start + long).map(|i| !works[i]).collect();
        model.add_clause(clause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence_model(n: usize) -> (Model, Vec<BoolVar>) {
        let mut model = Model::new("test");
        let works = (0..n).map(|w| model.new_bool_var(format!("w{w}"))).collect();
        (model, works)
    }

    /// Runs of true values in a pattern, as lengths.
    fn run_lengths(pattern: &[bool]) -> Vec<usize> {
        let mut runs = Vec::new();
        let mut current = 0;
        for &v in pattern {
            if v {
                current += 1;
            } else if current > 0 {
                runs.push(current);
                current = 0;
            }
        }
        if current > 0 {
            runs.push(current);
        }
        runs
    }

    /// Whether the encoded constraints admit the given pattern, with the
    /// penalty variables free to take any value.
    fn admits(model: &Model, pattern: &[bool]) -> bool {
        let extra = model.num_vars() - pattern.len();
        // penalty literals only ever relax clauses, so setting them all
        // true maximizes admissibility
        let mut assignment = pattern.to_vec();
        assignment.extend(std::iter::repeat(true).take(extra));
        model.evaluate(&assignment)
    }

    fn all_patterns(n: usize) -> impl Iterator<Item = Vec<bool>> {
        (0..1u32 << n).map(move |bits| (0..n).map(|i| bits >> i & 1 == 1).collect())
    }

    #[test]
    fn test_negated_bounded_span_interior() {
        let (_, works) = sequence_model(5);
        let span = negated_bounded_span(&works, 1, 2);
        assert_eq!(
            span,
            vec![works[0].lit(), !works[1], !works[2], works[3].lit()]
        );
    }

    #[test]
    fn test_negated_bounded_span_at_boundaries() {
        let (_, works) = sequence_model(3);
        assert_eq!(
            negated_bounded_span(&works, 0, 2),
            vec![!works[0], !works[1], works[2].lit()]
        );
        assert_eq!(
            negated_bounded_span(&works, 1, 2),
            vec![works[0].lit(), !works[1], !works[2]]
        );
    }

    #[test]
    fn test_hard_bounds_filter_runs() {
        let (mut model, works) = sequence_model(6);
        let mut acc = ObjectiveAccumulator::new();
        add_soft_sequence(
            &mut model,
            &works,
            &BoundSpec::hard(2, 4),
            "seq",
            &mut acc,
        );
        assert!(acc.is_empty());

        for pattern in all_patterns(6) {
            let runs = run_lengths(&pattern);
            let ok = runs.iter().all(|&l| (2..=4).contains(&l));
            assert_eq!(
                admits(&model, &pattern),
                ok,
                "pattern {pattern:?} with runs {runs:?}"
            );
        }
    }

    #[test]
    fn test_soft_tiers_emit_penalties() {
        let (mut model, works) = sequence_model(6);
        let mut acc = ObjectiveAccumulator::new();
        add_soft_sequence(
            &mut model,
            &works,
            &BoundSpec::new(1, 2, 3, 3, 5, 4),
            "seq",
            &mut acc,
        );
        assert!(!acc.is_empty());
        // under-spans of length 1 cost 3 * (2 - 1)
        assert!(acc.terms().iter().any(|t| t.coeff == 3));
        // over-spans of length 5 cost 4 * (5 - 3)
        assert!(acc.terms().iter().any(|t| t.coeff == 8));
    }

    #[test]
    fn test_soft_tiers_keep_hard_feasibility() {
        let (mut model, works) = sequence_model(6);
        let mut acc = ObjectiveAccumulator::new();
        add_soft_sequence(
            &mut model,
            &works,
            &BoundSpec::new(1, 2, 3, 3, 5, 4),
            "seq",
            &mut acc,
        );

        for pattern in all_patterns(6) {
            let runs = run_lengths(&pattern);
            let ok = runs.iter().all(|&l| (1..=5).contains(&l));
            assert_eq!(admits(&model, &pattern), ok, "pattern {pattern:?}");
        }
    }

    #[test]
    fn test_zero_hard_min_skips_short_run_clauses() {
        let (mut model, works) = sequence_model(4);
        let mut acc = ObjectiveAccumulator::new();
        add_soft_sequence(
            &mut model,
            &works,
            &BoundSpec::hard(0, 4),
            "seq",
            &mut acc,
        );
        assert_eq!(model.clause_count(), 0);
    }

    #[test]
    fn test_empty_sequence_is_a_no_op() {
        let mut model = Model::new("test");
        let mut acc = ObjectiveAccumulator::new();
        add_soft_sequence(
            &mut model,
            &[],
            &BoundSpec::new(1, 2, 3, 3, 5, 4),
            "seq",
            &mut acc,
        );
        add_fixed_run(&mut model, &[], 2);
        add_bimodal_run(&mut model, &[], 2, 4);
        assert_eq!(model.clause_count(), 0);
        assert_eq!(model.num_vars(), 0);
        assert!(acc.is_empty());
    }

    #[test]
    fn test_fixed_run_exact_length() {
        let (mut model, works) = sequence_model(5);
        add_fixed_run(&mut model, &works, 2);

        for pattern in all_patterns(5) {
            let runs = run_lengths(&pattern);
            let ok = runs.iter().all(|&l| l == 2);
            assert_eq!(
                model.evaluate(&pattern),
                ok,
                "pattern {pattern:?} with runs {runs:?}"
            );
        }
    }

    #[test]
    fn test_bimodal_run_two_or_four() {
        let (mut model, works) = sequence_model(7);
        add_bimodal_run(&mut model, &works, 2, 4);

        for pattern in all_patterns(7) {
            let runs = run_lengths(&pattern);
            let ok = runs.iter().all(|&l| l == 2 || l == 4);
            assert_eq!(
                model.evaluate(&pattern),
                ok,
                "pattern {pattern:?} with runs {runs:?}"
            );
        }
    }

    #[test]
    fn test_penalty_names_are_unique() {
        let (mut model, works) = sequence_model(6);
        let mut acc = ObjectiveAccumulator::new();
        let spec = BoundSpec::new(1, 3, 2, 3, 6, 2);
        add_soft_sequence(&mut model, &works, &spec, "first", &mut acc);
        add_soft_sequence(&mut model, &works, &spec, "second", &mut acc);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_sum_vs_run_independence() {
        // two separate 2-runs are admitted even though their total
        // exceeds hard_max: the encoder bounds runs, not counts
        let (mut model, works) = sequence_model(5);
        let mut acc = ObjectiveAccumulator::new();
        add_soft_sequence(&mut model, &works, &BoundSpec::hard(2, 3), "seq", &mut acc);
        assert!(admits(&model, &[true, true, false, true, true]));
    }

    #[test]
    fn test_linear_rows_untouched() {
        let (mut model, works) = sequence_model(4);
        let before = model.linear_count();
        let mut acc = ObjectiveAccumulator::new();
        add_soft_sequence(
            &mut model,
            &works,
            &BoundSpec::new(2, 2, 0, 3, 3, 0),
            "seq",
            &mut acc,
        );
        assert_eq!(model.linear_count(), before);
    }
}
