//! Solution decoding for display.

use std::fmt;

use crate::solver::Solution;

use super::grid::ShiftGrid;

/// A solved schedule decoded from the boolean assignment grid.
///
/// Holds the rotation each resident works per week and the resulting
/// per-rotation weekly headcounts. The `Display` rendering is a plain
/// two-table text dump; no serialization format is defined here.
///
/// # Examples
///
/// ```
/// use u_roster::roster::{RosterBuilder, RosterConfig, ScheduleTable};
/// use u_roster::solver::{SearchSolver, Solve, SolverConfig};
///
/// let roster = RosterBuilder::new(RosterConfig::small()).unwrap().build();
/// let result = SearchSolver::new().solve(&roster.model, &SolverConfig::default());
/// let table = ScheduleTable::from_solution(&roster.grid, result.solution.as_ref().unwrap());
/// println!("{table}");
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleTable {
    residents: usize,
    rotations: usize,
    weeks: usize,
    /// Rotation per (resident, week), row-major.
    assignments: Vec<Option<usize>>,
    /// Headcount per (rotation, week), row-major.
    headcounts: Vec<usize>,
}

impl ScheduleTable {
    /// Decodes a solution over the given grid.
    pub fn from_solution(grid: &ShiftGrid, solution: &Solution) -> Self {
        let (residents, rotations, weeks) = (grid.residents(), grid.rotations(), grid.weeks());
        let mut assignments = vec![None; residents * weeks];
        let mut headcounts = vec![0; rotations * weeks];
        for r in 0..residents {
            for s in 0..rotations {
                for w in 0..weeks {
                    if solution.value(grid.shift(r, s, w)) {
                        assignments[r * weeks + w] = Some(s);
                        headcounts[s * weeks + w] += 1;
                    }
                }
            }
        }
        Self {
            residents,
            rotations,
            weeks,
            assignments,
            headcounts,
        }
    }

    /// The rotation a resident works in a week, if any.
    pub fn rotation(&self, resident: usize, week: usize) -> Option<usize> {
        self.assignments[resident * self.weeks + week]
    }

    /// Number of residents on a rotation in a week.
    pub fn headcount(&self, rotation: usize, week: usize) -> usize {
        self.headcounts[rotation * self.weeks + week]
    }

    /// Total weeks a resident works across the horizon.
    pub fn weeks_worked(&self, resident: usize) -> usize {
        (0..self.weeks)
            .filter(|&w| self.rotation(resident, w).is_some())
            .count()
    }
}

impl fmt::Display for ScheduleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "resident x week (rotation id, '-' off):")?;
        for r in 0..self.residents {
            write!(f, "  r{r:<3}")?;
            for w in 0..self.weeks {
                match self.rotation(r, w) {
                    Some(s) => write!(f, " {s:>3}")?,
                    None => write!(f, "   -")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "rotation x week (headcount):")?;
        for s in 0..self.rotations {
            write!(f, "  s{s:<3}")?;
            for w in 0..self.weeks {
                write!(f, " {:>3}", self.headcount(s, w))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
