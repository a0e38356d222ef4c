use anyhow::{ensure, Result};
use std::io::Write;

/// Terms per emitted line before wrapping. LP readers accept arbitrary
/// line breaks inside an expression but some cap the line length.
const TERMS_PER_LINE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Ge,
    Le,
}

impl Sense {
    fn symbol(self) -> &'static str {
        match self {
            Sense::Ge => ">=",
            Sense::Le => "<=",
        }
    }
}

/// One linear row `Σ coeff · var  sense  rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub name: String,
    pub terms: Vec<(i64, String)>,
    pub sense: Sense,
    pub rhs: i64,
}

/// A minimization MIP over non-negative integer variables, serialized as
/// LP text with sections `Minimize`, `Subject To`, `Bounds`, `General`,
/// `End`. The objective is a plain variable list: every coefficient is
/// exactly 1, which is all the engine ever emits and all the reference
/// backend tolerates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LpModel {
    pub objective: Vec<String>,
    pub constraints: Vec<Constraint>,
    /// Every variable of the model, in declaration order; each is bounded
    /// below by 0, unbounded above, and declared integer.
    pub variables: Vec<String>,
}

impl LpModel {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.variables.is_empty(), "model declares no variables");
        ensure!(!self.objective.is_empty(), "objective has no terms");
        for constraint in &self.constraints {
            ensure!(
                !constraint.terms.is_empty(),
                "constraint {} has no terms",
                constraint.name
            );
        }
        Ok(())
    }

    /// Serialize the model as LP text.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.validate()?;

        writeln!(writer, "Minimize")?;
        let objective: Vec<String> = self
            .objective
            .iter()
            .enumerate()
            .map(|(i, var)| format_term(1, var, i == 0))
            .collect();
        write_expression(writer, " obj:", &objective, None)?;

        writeln!(writer, "Subject To")?;
        for constraint in &self.constraints {
            let terms: Vec<String> = constraint
                .terms
                .iter()
                .enumerate()
                .map(|(i, (coeff, var))| format_term(*coeff, var, i == 0))
                .collect();
            let tail = format!("{} {}", constraint.sense.symbol(), constraint.rhs);
            write_expression(writer, &format!(" {}:", constraint.name), &terms, Some(&tail))?;
        }

        writeln!(writer, "Bounds")?;
        for var in &self.variables {
            writeln!(writer, " {var} >= 0")?;
        }

        writeln!(writer, "General")?;
        for var in &self.variables {
            writeln!(writer, " {var}")?;
        }

        writeln!(writer, "End")?;
        Ok(())
    }

    pub fn to_lp_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

fn format_term(coeff: i64, var: &str, first: bool) -> String {
    match (coeff, first) {
        (1, true) => var.to_string(),
        (1, false) => format!("+ {var}"),
        (-1, _) => format!("- {var}"),
        (c, true) => format!("{c} {var}"),
        (c, false) if c < 0 => format!("- {} {var}", -c),
        (c, false) => format!("+ {c} {var}"),
    }
}

fn write_expression<W: Write>(
    writer: &mut W,
    head: &str,
    terms: &[String],
    tail: Option<&str>,
) -> Result<()> {
    write!(writer, "{head}")?;
    for (i, chunk) in terms.chunks(TERMS_PER_LINE).enumerate() {
        if i > 0 {
            write!(writer, "\n   ")?;
        }
        write!(writer, " {}", chunk.join(" "))?;
    }
    match tail {
        Some(tail) => writeln!(writer, " {tail}")?,
        None => writeln!(writer)?,
    }
    Ok(())
}
