//! Linear Program formulation

use std::fmt;

use smallvec::SmallVec;

/// Relation operator for a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintRelation {
    /// Equality (`lhs == rhs`)
    Eq,

    /// Less than or equal (`lhs <= rhs`)
    Leq,

    /// Greater than or equal (`lhs >= rhs`)
    Geq,
}

impl ConstraintRelation {
    /// Operator symbol
    pub fn symbol(self) -> &'static str {
        match self {
            ConstraintRelation::Eq => "=",
            ConstraintRelation::Leq => "<=",
            ConstraintRelation::Geq => ">=",
        }
    }
}

/// A continuous decision variable with finite bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableBounds {
    /// Label used when printing the formulation
    pub label: String,

    /// Lower bound
    pub lower: f64,

    /// Upper bound
    pub upper: f64,
}

/// A dense linear constraint row: `sum(coefficients[i] * x_i) <relation> rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    /// Constraint name
    pub name: &'static str,

    /// One coefficient per variable
    pub coefficients: SmallVec<[f64; 10]>,

    /// Relation operator
    pub relation: ConstraintRelation,

    /// Right-hand side scalar
    pub rhs: f64,
}

impl LinearConstraint {
    /// Left-hand side value for the given variable values.
    pub fn lhs_value(&self, values: &[f64]) -> f64 {
        dot(&self.coefficients, values)
    }

    /// Whether `values` satisfy the constraint within `tolerance`.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.lhs_value(values);

        match self.relation {
            ConstraintRelation::Eq => (lhs - self.rhs).abs() <= tolerance,
            ConstraintRelation::Leq => lhs <= self.rhs + tolerance,
            ConstraintRelation::Geq => lhs >= self.rhs - tolerance,
        }
    }
}

/// Minimisation problem over bounded continuous variables.
///
/// This is the narrow interface handed to an [`LpBackend`](crate::solvers::LpBackend):
/// objective coefficients, variable bounds and constraint rows. It knows nothing about
/// suppliers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearProgram {
    variables: SmallVec<[VariableBounds; 10]>,
    objective: SmallVec<[f64; 10]>,
    constraints: SmallVec<[LinearConstraint; 4]>,
}

impl LinearProgram {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable bounded by `[lower, upper]` with objective coefficient `cost`.
    ///
    /// Returns the variable's column index.
    pub fn add_variable(
        &mut self,
        label: impl Into<String>,
        lower: f64,
        upper: f64,
        cost: f64,
    ) -> usize {
        self.variables.push(VariableBounds {
            label: label.into(),
            lower,
            upper,
        });
        self.objective.push(cost);

        self.variables.len() - 1
    }

    /// Record a constraint.
    pub fn add_constraint(
        &mut self,
        name: &'static str,
        coefficients: impl IntoIterator<Item = f64>,
        relation: ConstraintRelation,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            name,
            coefficients: coefficients.into_iter().collect(),
            relation,
            rhs,
        });
    }

    /// Record an equality constraint.
    pub fn add_eq_constraint(
        &mut self,
        name: &'static str,
        coefficients: impl IntoIterator<Item = f64>,
        rhs: f64,
    ) {
        self.add_constraint(name, coefficients, ConstraintRelation::Eq, rhs);
    }

    /// Record a less-than-or-equal constraint.
    pub fn add_leq_constraint(
        &mut self,
        name: &'static str,
        coefficients: impl IntoIterator<Item = f64>,
        rhs: f64,
    ) {
        self.add_constraint(name, coefficients, ConstraintRelation::Leq, rhs);
    }

    /// Record a greater-than-or-equal constraint.
    pub fn add_geq_constraint(
        &mut self,
        name: &'static str,
        coefficients: impl IntoIterator<Item = f64>,
        rhs: f64,
    ) {
        self.add_constraint(name, coefficients, ConstraintRelation::Geq, rhs);
    }

    /// Variables, by column
    pub fn variables(&self) -> &[VariableBounds] {
        &self.variables
    }

    /// Objective coefficients, by column
    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    /// Constraint rows
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Number of variables
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Objective value for the given variable values.
    pub fn evaluate_objective(&self, values: &[f64]) -> f64 {
        dot(&self.objective, values)
    }
}

impl fmt::Display for LinearProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "minimise")?;
        writeln!(f, "  {}", Terms(&self.objective))?;

        writeln!(f, "subject to")?;

        for constraint in &self.constraints {
            writeln!(
                f,
                "  {}: {} {} {}",
                constraint.name,
                Terms(&constraint.coefficients),
                constraint.relation.symbol(),
                constraint.rhs
            )?;
        }

        writeln!(f, "bounds")?;

        for (idx, var) in self.variables.iter().enumerate() {
            writeln!(f, "  {} <= x{idx} <= {}  ({})", var.lower, var.upper, var.label)?;
        }

        Ok(())
    }
}

/// Formats a coefficient row as `c0 x0 + c1 x1 - ...`, skipping zero terms.
struct Terms<'a>(&'a [f64]);

impl fmt::Display for Terms<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for (idx, coeff) in self.0.iter().copied().enumerate() {
            if coeff == 0.0 {
                continue;
            }

            let magnitude = coeff.abs();

            match (first, coeff < 0.0) {
                (true, false) => {}
                (true, true) => write!(f, "-")?,
                (false, false) => write!(f, " + ")?,
                (false, true) => write!(f, " - ")?,
            }

            write!(f, "{magnitude} x{idx}")?;
            first = false;
        }

        if first {
            write!(f, "0")?;
        }

        Ok(())
    }
}

fn dot(coefficients: &[f64], values: &[f64]) -> f64 {
    coefficients
        .iter()
        .zip(values)
        .map(|(coeff, value)| coeff * value)
        .sum()
}
