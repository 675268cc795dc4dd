//! `good_lp` backend

use good_lp::{Expression, ProblemVariables, Solution, SolverModel, Variable, variable};
use smallvec::SmallVec;
use tracing::debug;

#[cfg(feature = "solver-highs")]
use good_lp::solvers::highs::highs as default_solver;
#[cfg(all(not(feature = "solver-highs"), feature = "solver-microlp"))]
use good_lp::solvers::microlp::microlp as default_solver;

use crate::solvers::{
    LpBackend, LpSolution, SolverError,
    lp::{ConstraintRelation, LinearProgram},
};

/// Backend solving through `good_lp` with the solver selected by crate features
/// (`microlp` by default, HiGHS with `solver-highs`).
#[derive(Debug, Default, Clone, Copy)]
pub struct GoodLpBackend;

impl LpBackend for GoodLpBackend {
    fn solve(&self, program: &LinearProgram) -> Result<LpSolution, SolverError> {
        check_program(program)?;

        let mut pb = ProblemVariables::new();

        let vars: SmallVec<[Variable; 10]> = program
            .variables()
            .iter()
            .map(|bounds| pb.add(variable().min(bounds.lower).max(bounds.upper)))
            .collect();

        let objective = linear_expression(&vars, program.objective());

        let mut model = pb.minimise(objective.clone()).using(default_solver);

        for constraint in program.constraints() {
            let lhs = linear_expression(&vars, &constraint.coefficients);

            model = match constraint.relation {
                ConstraintRelation::Eq => model.with(lhs.eq(constraint.rhs)),
                ConstraintRelation::Leq => model.with(lhs.leq(constraint.rhs)),
                ConstraintRelation::Geq => model.with(lhs.geq(constraint.rhs)),
            };
        }

        debug!(
            variables = vars.len(),
            constraints = program.constraints().len(),
            "solving linear program"
        );

        let solution = model.solve()?;

        let values = vars.iter().map(|var| solution.value(*var)).collect();

        Ok(LpSolution {
            values,
            objective: solution.eval(&objective),
        })
    }
}

fn linear_expression(vars: &[Variable], coefficients: &[f64]) -> Expression {
    let mut expr = Expression::default();

    for (var, coeff) in vars.iter().copied().zip(coefficients.iter().copied()) {
        expr += var * coeff;
    }

    expr
}

/// Reject rows that do not line up with the variables, and any non-finite number.
///
/// `good_lp` would otherwise silently drop surplus coefficients or hand NaN to the engine.
fn check_program(program: &LinearProgram) -> Result<(), SolverError> {
    let expected = program.num_variables();

    for bounds in program.variables() {
        require_finite("variable bound", bounds.lower)?;
        require_finite("variable bound", bounds.upper)?;
    }

    for coeff in program.objective() {
        require_finite("objective", *coeff)?;
    }

    for constraint in program.constraints() {
        if constraint.coefficients.len() != expected {
            return Err(SolverError::DimensionMismatch {
                constraint: constraint.name,
                expected,
                found: constraint.coefficients.len(),
            });
        }

        for coeff in &constraint.coefficients {
            require_finite(constraint.name, *coeff)?;
        }

        require_finite(constraint.name, constraint.rhs)?;
    }

    Ok(())
}

fn require_finite(location: &'static str, value: f64) -> Result<(), SolverError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SolverError::NonFiniteCoefficient { location, value })
    }
}
