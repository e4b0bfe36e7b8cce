use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A single `operator(arguments...)` step of a [`Bytecode`](super::Bytecode).
///
/// Arguments are opaque to the encoder. They are compared and serialized but
/// never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InstructionRepr")]
pub struct Instruction {
    operator: String,
    arguments: Vec<serde_json::Value>,
}

/// Wire shape of an [`Instruction`]; deserialization goes through
/// [`Instruction::new`] so an empty operator never gets in.
#[derive(Deserialize)]
struct InstructionRepr {
    operator: String,
    #[serde(default)]
    arguments: Vec<serde_json::Value>,
}

impl TryFrom<InstructionRepr> for Instruction {
    type Error = Error;

    fn try_from(repr: InstructionRepr) -> Result<Self, Self::Error> {
        Self::new(repr.operator, repr.arguments)
    }
}

impl Instruction {
    /// Builds an instruction. The operator name must not be empty.
    pub fn new<I>(operator: impl Into<String>, arguments: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<serde_json::Value>,
    {
        let operator = operator.into();
        if operator.is_empty() {
            return Err(Error::EmptyOperator);
        }
        Ok(Self {
            operator,
            arguments: arguments.into_iter().map(Into::into).collect(),
        })
    }

    /// Builds an instruction with no arguments.
    pub fn bare(operator: impl Into<String>) -> Result<Self, Error> {
        Self::new(operator, std::iter::empty::<serde_json::Value>())
    }

    /// Single-argument instruction from compile-time constants.
    pub(crate) fn canonical(operator: &'static str, argument: &'static str) -> Self {
        debug_assert!(!operator.is_empty());
        Self {
            operator: operator.to_string(),
            arguments: vec![serde_json::Value::from(argument)],
        }
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn arguments(&self) -> &[serde_json::Value] {
        &self.arguments
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operator)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}
