//! Boolean decision variables and literals.

use std::fmt;
use std::ops::Not;

/// A boolean decision variable, identified by its index in a [`Model`].
///
/// Variables are created through [`Model::new_bool_var`] and are valid
/// only for the model that created them.
///
/// [`Model`]: super::Model
/// [`Model::new_bool_var`]: super::Model::new_bool_var
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoolVar(pub(crate) u32);

impl BoolVar {
    /// Index of this variable within its model.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The positive literal of this variable.
    pub fn lit(self) -> Lit {
        Lit {
            var: self,
            negated: false,
        }
    }
}

impl fmt::Display for BoolVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A literal: a boolean variable or its negation.
///
/// # Examples
///
/// ```
/// use u_roster::model::Model;
///
/// let mut model = Model::new("demo");
/// let x = model.new_bool_var("x");
/// let lit = !x; // negative literal
/// assert!(lit.is_negated());
/// assert_eq!(!lit, x.lit());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lit {
    pub(crate) var: BoolVar,
    pub(crate) negated: bool,
}

impl Lit {
    /// The variable this literal refers to.
    pub fn var(self) -> BoolVar {
        self.var
    }

    /// Whether this is a negative literal.
    pub fn is_negated(self) -> bool {
        self.negated
    }

    /// Evaluates this literal under a variable value.
    pub fn eval(self, value: bool) -> bool {
        value != self.negated
    }
}

impl From<BoolVar> for Lit {
    fn from(var: BoolVar) -> Self {
        var.lit()
    }
}

impl Not for BoolVar {
    type Output = Lit;

    fn not(self) -> Lit {
        Lit {
            var: self,
            negated: true,
        }
    }
}

impl Not for Lit {
    type Output = Lit;

    fn not(self) -> Lit {
        Lit {
            var: self.var,
            negated: !self.negated,
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!{}", self.var)
        } else {
            write!(f, "{}", self.var)
        }
    }
}
