//! Solvers for Linear Programs

use good_lp::ResolutionError;
use smallvec::SmallVec;
use thiserror::Error;

pub mod backend;
pub mod lp;

pub use backend::GoodLpBackend;
pub use lp::{ConstraintRelation, LinearConstraint, LinearProgram, VariableBounds};

/// Absolute tolerance used when checking solver output against bounds and constraints.
///
/// Scaled by the magnitude of the quantities involved where that matters (see
/// [`scaled_tolerance`]).
pub const SOLVER_TOLERANCE: f64 = 1e-6;

/// Tolerance scaled to a reference magnitude, never smaller than [`SOLVER_TOLERANCE`].
pub fn scaled_tolerance(magnitude: f64) -> f64 {
    SOLVER_TOLERANCE * magnitude.abs().max(1.0)
}

/// Solver Errors
#[derive(Debug, Error)]
pub enum SolverError {
    /// No assignment satisfies every constraint.
    #[error("the linear program is infeasible")]
    Infeasible,

    /// The objective can decrease without limit.
    #[error("the linear program is unbounded")]
    Unbounded,

    /// A constraint row has a different number of coefficients than there are variables.
    #[error("constraint {constraint:?} has {found} coefficients, expected {expected}")]
    DimensionMismatch {
        /// Constraint name
        constraint: &'static str,

        /// Number of variables in the program
        expected: usize,

        /// Number of coefficients in the row
        found: usize,
    },

    /// A coefficient, bound or right-hand side is NaN or infinite.
    #[error("non-finite value in {location}: {value}")]
    NonFiniteCoefficient {
        /// Where the value appeared
        location: &'static str,

        /// Offending value
        value: f64,
    },

    /// Wrapped solver resolution error
    #[error(transparent)]
    Resolution(ResolutionError),
}

impl From<ResolutionError> for SolverError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::Infeasible => SolverError::Infeasible,
            ResolutionError::Unbounded => SolverError::Unbounded,
            other => SolverError::Resolution(other),
        }
    }
}

/// Optimal solution of a [`LinearProgram`].
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    /// Variable values, by column
    pub values: SmallVec<[f64; 10]>,

    /// Objective value at `values`
    pub objective: f64,
}

/// A linear programming engine.
///
/// Implementations return an optimal basic feasible solution, or report infeasibility
/// or unboundedness through [`SolverError`].
pub trait LpBackend {
    /// Solve the program, minimising its objective.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Infeasible`] when no point satisfies the constraints, or
    /// another [`SolverError`] if the program is malformed or the engine fails.
    fn solve(&self, program: &LinearProgram) -> Result<LpSolution, SolverError>;
}

impl<B: LpBackend + ?Sized> LpBackend for &B {
    fn solve(&self, program: &LinearProgram) -> Result<LpSolution, SolverError> {
        (**self).solve(program)
    }
}
