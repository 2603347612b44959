//! Depth-first search engine.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::model::{CmpOp, Model};

use super::{Solution, Solve, SolveResult, SolverConfig, SolverStatus};

/// The built-in search engine.
///
/// Depth-first search over the boolean variables with unit propagation
/// on clauses, bound and forcing propagation on linear rows, and
/// branch-and-bound pruning when the model carries an objective.
/// Intended for tests and small-to-medium instances; larger models are
/// the domain of an external engine behind [`Solve`].
///
/// # Examples
///
/// ```
/// use u_roster::model::Model;
/// use u_roster::solver::{SearchSolver, Solve, SolverConfig, SolverStatus};
///
/// let mut model = Model::new("demo");
/// let a = model.new_bool_var("a");
/// let b = model.new_bool_var("b");
/// model.add_clause(vec![a.lit(), b.lit()]);
///
/// let result = SearchSolver::new().solve(&model, &SolverConfig::default());
/// assert_eq!(result.status, SolverStatus::Feasible);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchSolver;

impl SearchSolver {
    pub fn new() -> Self {
        Self
    }

    /// Lazily enumerates solutions in discovery order.
    ///
    /// The returned sequence is finite and non-restartable; it honors
    /// the configured `solution_limit` and time budget. After it is
    /// drained, [`Solutions::status`] reports the terminal status.
    pub fn solutions<'a>(&self, model: &'a Model, config: &SolverConfig) -> Solutions<'a> {
        if model.validate().is_err() {
            return Solutions {
                search: None,
                model,
                remaining: 0,
                yielded: 0,
            };
        }
        Solutions {
            search: Some(Search::new(model, config)),
            model,
            remaining: config.solution_limit,
            yielded: 0,
        }
    }
}

impl Solve for SearchSolver {
    fn solve(&self, model: &Model, config: &SolverConfig) -> SolveResult {
        let start = Instant::now();
        if model.validate().is_err() {
            return SolveResult {
                status: SolverStatus::ModelInvalid,
                solution: None,
                solve_time_ms: start.elapsed().as_millis() as u64,
            };
        }

        let mut search = Search::new(model, config);
        let (status, solution) = if model.objective().is_none() {
            match search.next_solution() {
                Some(values) => (SolverStatus::Feasible, Some(Solution::new(values, None))),
                None if search.timed_out => (SolverStatus::Unknown, None),
                None => (SolverStatus::Infeasible, None),
            }
        } else {
            // branch and bound: every accepted solution tightens the
            // objective bound, so the last one standing is optimal
            let mut best: Option<Vec<bool>> = None;
            while let Some(values) = search.next_solution() {
                search.bound = Some(model.objective_value(&values));
                best = Some(values);
            }
            match best {
                Some(values) => {
                    let objective = model.objective_value(&values);
                    let status = if search.timed_out {
                        SolverStatus::Feasible
                    } else {
                        SolverStatus::Optimal
                    };
                    (status, Some(Solution::new(values, Some(objective))))
                }
                None if search.timed_out => (SolverStatus::Unknown, None),
                None => (SolverStatus::Infeasible, None),
            }
        };

        SolveResult {
            status,
            solution,
            solve_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Lazy, non-restartable sequence of solutions.
///
/// Produced by [`SearchSolver::solutions`]. Each call to `next` resumes
/// the search where the previous solution left off.
pub struct Solutions<'a> {
    search: Option<Search<'a>>,
    model: &'a Model,
    remaining: usize,
    yielded: usize,
}

impl Solutions<'_> {
    /// Terminal status of the enumeration so far.
    ///
    /// `ModelInvalid` when the model failed validation, `Feasible` once
    /// any solution was yielded, `Infeasible` when the search space was
    /// exhausted without one, and `Unknown` while the search is
    /// incomplete (not yet drained, or the time budget expired first).
    pub fn status(&self) -> SolverStatus {
        let Some(search) = &self.search else {
            return SolverStatus::ModelInvalid;
        };
        if self.yielded > 0 {
            SolverStatus::Feasible
        } else if search.exhausted {
            SolverStatus::Infeasible
        } else {
            SolverStatus::Unknown
        }
    }

    /// Number of solutions yielded so far.
    pub fn count_so_far(&self) -> usize {
        self.yielded
    }
}

impl Iterator for Solutions<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        if self.remaining == 0 {
            return None;
        }
        let search = self.search.as_mut()?;
        let values = search.next_solution()?;
        self.remaining -= 1;
        self.yielded += 1;
        let objective = self
            .model
            .objective()
            .map(|_| self.model.objective_value(&values));
        Some(Solution::new(values, objective))
    }
}

struct Decision {
    var: usize,
    flipped: bool,
    trail_mark: usize,
}

/// Search state: a partial assignment, the implication trail, and the
/// decision stack.
struct Search<'a> {
    model: &'a Model,
    assign: Vec<Option<bool>>,
    trail: Vec<usize>,
    decisions: Vec<Decision>,
    order: Vec<usize>,
    deadline: Instant,
    timed_out: bool,
    exhausted: bool,
    /// Strict upper bound on the objective (branch and bound).
    bound: Option<i64>,
}

impl<'a> Search<'a> {
    fn new(model: &'a Model, config: &SolverConfig) -> Self {
        let mut order: Vec<usize> = (0..model.num_vars()).collect();
        if let Some(seed) = config.seed {
            let mut rng = StdRng::seed_from_u64(seed);
            order.shuffle(&mut rng);
        }
        Self {
            model,
            assign: vec![None; model.num_vars()],
            trail: Vec::new(),
            decisions: Vec::new(),
            order,
            deadline: Instant::now() + Duration::from_millis(config.time_limit_ms),
            timed_out: false,
            exhausted: false,
            bound: None,
        }
    }

    fn assign_var(&mut self, var: usize, value: bool) {
        self.assign[var] = Some(value);
        self.trail.push(var);
    }

    /// Propagates to fixpoint. Returns false on conflict.
    fn propagate(&mut self) -> bool {
        let model = self.model;
        loop {
            let mut changed = false;

            'clauses: for clause in model.clauses() {
                let mut unit = None;
                let mut open = 0;
                for &lit in clause {
                    match self.assign[lit.var().index()] {
                        Some(value) => {
                            if lit.eval(value) {
                                continue 'clauses;
                            }
                        }
                        None => {
                            open += 1;
                            unit = Some(lit);
                        }
                    }
                }
                match (open, unit) {
                    (0, _) => return false,
                    (1, Some(lit)) => {
                        self.assign_var(lit.var().index(), !lit.is_negated());
                        changed = true;
                    }
                    _ => {}
                }
            }

            for row in model.linears() {
                // achievable sum range under the current partial assignment
                let mut min = 0i64;
                let mut max = 0i64;
                for (var, &c) in row.vars.iter().zip(&row.coeffs) {
                    match self.assign[var.index()] {
                        Some(true) => {
                            min += c;
                            max += c;
                        }
                        Some(false) => {}
                        None => {
                            if c > 0 {
                                max += c;
                            } else {
                                min += c;
                            }
                        }
                    }
                }
                let need_le = matches!(row.op, CmpOp::Le | CmpOp::Eq);
                let need_ge = matches!(row.op, CmpOp::Ge | CmpOp::Eq);
                if (need_le && min > row.bound) || (need_ge && max < row.bound) {
                    return false;
                }

                // force any variable whose remaining value would make the
                // row unsatisfiable
                for (var, &c) in row.vars.iter().zip(&row.coeffs) {
                    if self.assign[var.index()].is_some() {
                        continue;
                    }
                    let min_true = min - c.min(0) + c;
                    let min_false = min - c.min(0);
                    let max_true = max - c.max(0) + c;
                    let max_false = max - c.max(0);
                    let true_ok = (!need_le || min_true <= row.bound)
                        && (!need_ge || max_true >= row.bound);
                    let false_ok = (!need_le || min_false <= row.bound)
                        && (!need_ge || max_false >= row.bound);
                    match (true_ok, false_ok) {
                        (false, false) => return false,
                        (false, true) => {
                            self.assign_var(var.index(), false);
                            changed = true;
                            break;
                        }
                        (true, false) => {
                            self.assign_var(var.index(), true);
                            changed = true;
                            break;
                        }
                        (true, true) => {}
                    }
                }
            }

            if let (Some(bound), Some(terms)) = (self.bound, model.objective()) {
                let mut lower = 0i64;
                for (var, coeff) in terms {
                    if self.assign[var.index()] == Some(true) {
                        lower += coeff;
                    }
                }
                if lower >= bound {
                    return false;
                }
                for &(var, coeff) in terms {
                    if self.assign[var.index()].is_none() && coeff > 0 && lower + coeff >= bound {
                        self.assign_var(var.index(), false);
                        changed = true;
                    }
                }
            }

            if !changed {
                return true;
            }
        }
    }

    /// Undoes to the most recent unflipped decision and takes its other
    /// branch. Returns false when the search space is exhausted.
    fn backtrack(&mut self) -> bool {
        loop {
            let Some(decision) = self.decisions.last() else {
                return false;
            };
            let (mark, flipped, var) = (decision.trail_mark, decision.flipped, decision.var);
            while self.trail.len() > mark {
                if let Some(v) = self.trail.pop() {
                    self.assign[v] = None;
                }
            }
            if flipped {
                self.decisions.pop();
            } else {
                if let Some(decision) = self.decisions.last_mut() {
                    decision.flipped = true;
                }
                self.assign_var(var, true);
                return true;
            }
        }
    }

    /// Resumes the search and returns the next satisfying assignment.
    fn next_solution(&mut self) -> Option<Vec<bool>> {
        if self.exhausted || self.timed_out {
            return None;
        }
        loop {
            if Instant::now() >= self.deadline {
                self.timed_out = true;
                return None;
            }
            if !self.propagate() {
                if !self.backtrack() {
                    self.exhausted = true;
                    return None;
                }
                continue;
            }
            match self.order.iter().copied().find(|&v| self.assign[v].is_none()) {
                Some(var) => {
                    self.decisions.push(Decision {
                        var,
                        flipped: false,
                        trail_mark: self.trail.len(),
                    });
                    self.assign_var(var, false);
                }
                None => {
                    let values = self.assign.iter().map(|v| v.unwrap_or(false)).collect();
                    // keep the state positioned for the next call
                    if !self.backtrack() {
                        self.exhausted = true;
                    }
                    return Some(values);
                }
            }
        }
    }
}
