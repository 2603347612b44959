//! The decision variable grid.

use crate::model::{BoolVar, CmpOp, Model};

use super::config::RosterConfig;

/// The boolean decision grid over (resident, rotation, week).
///
/// Eagerly allocates `shift[r, s, w]` ("resident r works rotation s in
/// week w") for every valid index, plus a derived `on_rotation[r, w]`
/// occupancy indicator per (resident, week). The constructor installs,
/// for every (resident, week):
///
/// 1. at most one rotation: `Σ_s shift[r, s, w] <= 1`
/// 2. the occupancy equality: `on_rotation[r, w] == Σ_s shift[r, s, w]`
///
/// The equality is only a correct indicator because of the at-most-one
/// row; installing both here, in this order, keeps the coupling local
/// instead of depending on a constraint declared elsewhere.
///
/// # Examples
///
/// ```
/// use u_roster::model::Model;
/// use u_roster::roster::{RosterConfig, ShiftGrid};
///
/// let mut model = Model::new("demo");
/// let grid = ShiftGrid::new(&mut model, &RosterConfig::small());
/// let var = grid.shift(0, 1, 2);
/// assert_eq!(model.var_name(var), "shift_0_1_2");
/// ```
#[derive(Debug, Clone)]
pub struct ShiftGrid {
    residents: usize,
    rotations: usize,
    weeks: usize,
    shift: Vec<BoolVar>,
    occupancy: Vec<BoolVar>,
}

impl ShiftGrid {
    /// Allocates the full grid in `model` and installs the structural
    /// constraints described above.
    pub fn new(model: &mut Model, config: &RosterConfig) -> Self {
        let (residents, rotations, weeks) = (config.residents, config.rotations, config.weeks);

        let mut shift = Vec::with_capacity(residents * rotations * weeks);
        for r in 0..residents {
            for s in 0..rotations {
                for w in 0..weeks {
                    shift.push(model.new_bool_var(format!("shift_{r}_{s}_{w}")));
                }
            }
        }

        let mut grid = Self {
            residents,
            rotations,
            weeks,
            shift,
            occupancy: Vec::with_capacity(residents * weeks),
        };

        for r in 0..residents {
            for w in 0..weeks {
                let week_vars = grid.week_rotations(r, w);
                model.add_at_most_one(&week_vars);

                let occ = model.new_bool_var(format!("on_rotation_{r}_{w}"));
                let mut vars = week_vars;
                let mut coeffs = vec![1i64; grid.rotations];
                vars.push(occ);
                coeffs.push(-1);
                model.add_linear(vars, coeffs, CmpOp::Eq, 0);
                grid.occupancy.push(occ);
            }
        }
        grid
    }

    /// The decision variable for (resident, rotation, week).
    pub fn shift(&self, resident: usize, rotation: usize, week: usize) -> BoolVar {
        self.shift[(resident * self.rotations + rotation) * self.weeks + week]
    }

    /// The occupancy indicator for (resident, week): true iff the
    /// resident is on some rotation that week.
    pub fn occupancy(&self, resident: usize, week: usize) -> BoolVar {
        self.occupancy[resident * self.weeks + week]
    }

    /// The week-by-week sequence of one resident on one rotation.
    pub fn rotation_weeks(&self, resident: usize, rotation: usize) -> Vec<BoolVar> {
        (0..self.weeks).map(|w| self.shift(resident, rotation, w)).collect()
    }

    /// All rotation variables of one resident in one week.
    pub fn week_rotations(&self, resident: usize, week: usize) -> Vec<BoolVar> {
        (0..self.rotations).map(|s| self.shift(resident, s, week)).collect()
    }

    /// Every (rotation, week) variable of one resident.
    pub fn resident_assignments(&self, resident: usize) -> Vec<BoolVar> {
        (0..self.rotations)
            .flat_map(|s| (0..self.weeks).map(move |w| (s, w)))
            .map(|(s, w)| self.shift(resident, s, w))
            .collect()
    }

    /// All residents on one rotation in one week.
    pub fn rotation_staff(&self, rotation: usize, week: usize) -> Vec<BoolVar> {
        (0..self.residents).map(|r| self.shift(r, rotation, week)).collect()
    }

    /// Number of residents.
    pub fn residents(&self) -> usize {
        self.residents
    }

    /// Number of rotations.
    pub fn rotations(&self) -> usize {
        self.rotations
    }

    /// Number of weeks.
    pub fn weeks(&self) -> usize {
        self.weeks
    }
}
