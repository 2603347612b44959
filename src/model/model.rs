//! Boolean constraint model.

use std::collections::HashSet;

use super::variables::{BoolVar, Lit};

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CmpOp {
    /// Less than or equal to the bound.
    Le,
    /// Greater than or equal to the bound.
    Ge,
    /// Equal to the bound.
    Eq,
}

impl CmpOp {
    /// Whether `sum op bound` holds.
    pub fn holds(self, sum: i64, bound: i64) -> bool {
        match self {
            CmpOp::Le => sum <= bound,
            CmpOp::Ge => sum >= bound,
            CmpOp::Eq => sum == bound,
        }
    }
}

/// A linear constraint `Σ coeffs[i] * vars[i] op bound` over 0/1 variables.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    /// Variables of the row.
    pub vars: Vec<BoolVar>,
    /// Coefficients, parallel to `vars`.
    pub coeffs: Vec<i64>,
    /// Comparison operator.
    pub op: CmpOp,
    /// Right-hand side.
    pub bound: i64,
}

/// A boolean constraint model.
///
/// Holds named boolean variables, disjunctive clauses, linear rows over
/// 0/1 variables, and an optional weighted-sum minimize objective. The
/// model is built once by a single writer and then treated as read-only
/// input to a solver.
///
/// # Examples
///
/// ```
/// use u_roster::model::{CmpOp, Model};
///
/// let mut model = Model::new("demo");
/// let a = model.new_bool_var("a");
/// let b = model.new_bool_var("b");
/// model.add_clause(vec![a.lit(), b.lit()]);
/// model.add_linear(vec![a, b], vec![1, 1], CmpOp::Le, 1);
/// assert!(model.validate().is_ok());
/// assert!(model.evaluate(&[true, false]));
/// assert!(!model.evaluate(&[true, true]));
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// Model name.
    pub name: String,
    var_names: Vec<String>,
    clauses: Vec<Vec<Lit>>,
    linears: Vec<LinearConstraint>,
    objective: Option<Vec<(BoolVar, i64)>>,
}

impl Model {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            var_names: Vec::new(),
            clauses: Vec::new(),
            linears: Vec::new(),
            objective: None,
        }
    }

    /// Creates a new boolean variable with the given name.
    ///
    /// Variables are allocated eagerly and live for the lifetime of the
    /// model. Names must be unique; duplicates are reported by
    /// [`validate`](Self::validate).
    pub fn new_bool_var(&mut self, name: impl Into<String>) -> BoolVar {
        let var = BoolVar(self.var_names.len() as u32);
        self.var_names.push(name.into());
        var
    }

    /// Number of variables in the model.
    pub fn num_vars(&self) -> usize {
        self.var_names.len()
    }

    /// Name of a variable.
    pub fn var_name(&self, var: BoolVar) -> &str {
        &self.var_names[var.index()]
    }

    /// Adds a disjunctive clause: at least one literal must hold.
    pub fn add_clause(&mut self, literals: Vec<Lit>) {
        self.clauses.push(literals);
    }

    /// Adds a linear constraint `Σ coeffs[i] * vars[i] op bound`.
    pub fn add_linear(&mut self, vars: Vec<BoolVar>, coeffs: Vec<i64>, op: CmpOp, bound: i64) {
        self.linears.push(LinearConstraint {
            vars,
            coeffs,
            op,
            bound,
        });
    }

    /// Convenience: at most one of `vars` may be true.
    pub fn add_at_most_one(&mut self, vars: &[BoolVar]) {
        self.add_linear(vars.to_vec(), vec![1; vars.len()], CmpOp::Le, 1);
    }

    /// Convenience: the count of true `vars` must be at least `min`.
    pub fn add_at_least(&mut self, vars: &[BoolVar], min: i64) {
        self.add_linear(vars.to_vec(), vec![1; vars.len()], CmpOp::Ge, min);
    }

    /// Convenience: the count of true `vars` must be at most `max`.
    pub fn add_at_most(&mut self, vars: &[BoolVar], max: i64) {
        self.add_linear(vars.to_vec(), vec![1; vars.len()], CmpOp::Le, max);
    }

    /// Sets the minimize objective as a weighted sum of variables.
    ///
    /// Coefficients must be non-negative; violations are reported by
    /// [`validate`](Self::validate).
    pub fn set_objective(&mut self, terms: Vec<(BoolVar, i64)>) {
        self.objective = Some(terms);
    }

    /// The minimize objective, if one was set.
    pub fn objective(&self) -> Option<&[(BoolVar, i64)]> {
        self.objective.as_deref()
    }

    /// The clauses of the model.
    pub fn clauses(&self) -> &[Vec<Lit>] {
        &self.clauses
    }

    /// The linear constraints of the model.
    pub fn linears(&self) -> &[LinearConstraint] {
        &self.linears
    }

    /// Number of clauses.
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Number of linear constraints.
    pub fn linear_count(&self) -> usize {
        self.linears.len()
    }

    /// Validates the model for consistency.
    ///
    /// Checks for duplicate variable names, out-of-range variable indices,
    /// mismatched coefficient rows, and negative objective coefficients.
    /// A solver reports a failing model as `ModelInvalid`.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for name in &self.var_names {
            if !seen.insert(name.as_str()) {
                return Err(format!("duplicate variable name: {name}"));
            }
        }
        let n = self.num_vars();
        for clause in &self.clauses {
            for lit in clause {
                if lit.var().index() >= n {
                    return Err(format!("clause references undefined variable {}", lit.var()));
                }
            }
        }
        for row in &self.linears {
            if row.vars.len() != row.coeffs.len() {
                return Err("linear constraint: vars and coeffs length mismatch".into());
            }
            for var in &row.vars {
                if var.index() >= n {
                    return Err(format!("linear constraint references undefined variable {var}"));
                }
            }
        }
        if let Some(terms) = &self.objective {
            for (var, coeff) in terms {
                if var.index() >= n {
                    return Err(format!("objective references undefined variable {var}"));
                }
                if *coeff < 0 {
                    return Err(format!("objective coefficient for {var} is negative"));
                }
            }
        }
        Ok(())
    }

    /// Whether a complete assignment satisfies every constraint.
    ///
    /// `assignment[i]` is the value of the variable with index `i` and
    /// must cover all variables of the model.
    pub fn evaluate(&self, assignment: &[bool]) -> bool {
        debug_assert_eq!(assignment.len(), self.num_vars());
        for clause in &self.clauses {
            if !clause.iter().any(|lit| lit.eval(assignment[lit.var().index()])) {
                return false;
            }
        }
        for row in &self.linears {
            let sum: i64 = row
                .vars
                .iter()
                .zip(&row.coeffs)
                .filter(|(var, _)| assignment[var.index()])
                .map(|(_, coeff)| coeff)
                .sum();
            if !row.op.holds(sum, row.bound) {
                return false;
            }
        }
        true
    }

    /// Objective value of a complete assignment (0 when no objective is set).
    pub fn objective_value(&self, assignment: &[bool]) -> i64 {
        self.objective
            .iter()
            .flatten()
            .filter(|(var, _)| assignment[var.index()])
            .map(|(_, coeff)| coeff)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_allocation() {
        let mut model = Model::new("test");
        let a = model.new_bool_var("a");
        let b = model.new_bool_var("b");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(model.num_vars(), 2);
        assert_eq!(model.var_name(b), "b");
    }

    #[test]
    fn test_validate_duplicate_name() {
        let mut model = Model::new("test");
        model.new_bool_var("x");
        model.new_bool_var("x");
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_undefined_variable() {
        let mut model = Model::new("test");
        let a = model.new_bool_var("a");
        let mut other = Model::new("other");
        other.add_clause(vec![a.lit()]);
        assert!(other.validate().is_err());

        let mut third = Model::new("third");
        third.add_linear(vec![a], vec![1], CmpOp::Ge, 1);
        assert!(third.validate().is_err());
    }

    #[test]
    fn test_validate_coeff_mismatch() {
        let mut model = Model::new("test");
        let a = model.new_bool_var("a");
        model.add_linear(vec![a], vec![1, 2], CmpOp::Le, 1);
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_negative_objective_coeff() {
        let mut model = Model::new("test");
        let a = model.new_bool_var("a");
        model.set_objective(vec![(a, -1)]);
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_evaluate_clause() {
        let mut model = Model::new("test");
        let a = model.new_bool_var("a");
        let b = model.new_bool_var("b");
        model.add_clause(vec![a.lit(), !b]);
        assert!(model.evaluate(&[true, true]));
        assert!(model.evaluate(&[false, false]));
        assert!(!model.evaluate(&[false, true]));
    }

    #[test]
    fn test_evaluate_linear() {
        let mut model = Model::new("test");
        let a = model.new_bool_var("a");
        let b = model.new_bool_var("b");
        let c = model.new_bool_var("c");
        model.add_linear(vec![a, b, c], vec![1, 1, 1], CmpOp::Eq, 2);
        assert!(model.evaluate(&[true, true, false]));
        assert!(!model.evaluate(&[true, false, false]));
        assert!(!model.evaluate(&[true, true, true]));
    }

    #[test]
    fn test_evaluate_negative_coeff() {
        let mut model = Model::new("test");
        let a = model.new_bool_var("a");
        let b = model.new_bool_var("b");
        // a - b >= 0, i.e. b implies a
        model.add_linear(vec![a, b], vec![1, -1], CmpOp::Ge, 0);
        assert!(model.evaluate(&[true, true]));
        assert!(model.evaluate(&[false, false]));
        assert!(!model.evaluate(&[false, true]));
    }

    #[test]
    fn test_at_most_one() {
        let mut model = Model::new("test");
        let vars: Vec<_> = (0..3).map(|i| model.new_bool_var(format!("v{i}"))).collect();
        model.add_at_most_one(&vars);
        assert!(model.evaluate(&[false, true, false]));
        assert!(model.evaluate(&[false, false, false]));
        assert!(!model.evaluate(&[true, true, false]));
    }

    #[test]
    fn test_objective_value() {
        let mut model = Model::new("test");
        let a = model.new_bool_var("a");
        let b = model.new_bool_var("b");
        model.set_objective(vec![(a, 3), (b, 5)]);
        assert_eq!(model.objective_value(&[true, false]), 3);
        assert_eq!(model.objective_value(&[true, true]), 8);
        assert_eq!(model.objective_value(&[false, false]), 0);
    }

    #[test]
    fn test_objective_value_without_objective() {
        let mut model = Model::new("test");
        model.new_bool_var("a");
        assert_eq!(model.objective_value(&[true]), 0);
    }
}
