pub mod instruction;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::graph_op::GraphOp;

pub use instruction::Instruction;

/// An ordered, transport-agnostic description of work to run on a remote graph.
///
/// Source instructions configure how the work runs, step instructions are the
/// work itself. Both halves take part in equality: two bytecodes are equal when
/// their source lists and their step lists are equal element by element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bytecode {
    #[serde(default, rename = "source", skip_serializing_if = "Vec::is_empty")]
    source_instructions: Vec<Instruction>,
    #[serde(default, rename = "step", skip_serializing_if = "Vec::is_empty")]
    step_instructions: Vec<Instruction>,
}

impl Bytecode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytecode holding a single source instruction, the shape of every
    /// [`GraphOp`].
    pub fn with_source<I>(operator: impl Into<String>, arguments: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<serde_json::Value>,
    {
        let mut bytecode = Self::new();
        bytecode.add_source(operator, arguments)?;
        Ok(bytecode)
    }

    /// Concatenates step instructions in the order given. Zero instructions is
    /// a valid, empty bytecode.
    pub fn from_steps(instructions: impl IntoIterator<Item = Instruction>) -> Self {
        Self {
            source_instructions: Vec::new(),
            step_instructions: instructions.into_iter().collect(),
        }
    }

    pub fn from_parts(
        source_instructions: impl IntoIterator<Item = Instruction>,
        step_instructions: impl IntoIterator<Item = Instruction>,
    ) -> Self {
        Self {
            source_instructions: source_instructions.into_iter().collect(),
            step_instructions: step_instructions.into_iter().collect(),
        }
    }

    pub fn add_source<I>(&mut self, operator: impl Into<String>, arguments: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<serde_json::Value>,
    {
        self.source_instructions
            .push(Instruction::new(operator, arguments)?);
        Ok(())
    }

    pub fn add_step<I>(&mut self, operator: impl Into<String>, arguments: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<serde_json::Value>,
    {
        self.step_instructions
            .push(Instruction::new(operator, arguments)?);
        Ok(())
    }

    pub fn push_source(&mut self, instruction: Instruction) {
        self.source_instructions.push(instruction);
    }

    pub fn push_step(&mut self, instruction: Instruction) {
        self.step_instructions.push(instruction);
    }

    pub fn source_instructions(&self) -> &[Instruction] {
        &self.source_instructions
    }

    pub fn step_instructions(&self) -> &[Instruction] {
        &self.step_instructions
    }

    /// Every instruction, sources first.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.source_instructions
            .iter()
            .chain(self.step_instructions.iter())
    }

    pub fn len(&self) -> usize {
        self.source_instructions.len() + self.step_instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_instructions.is_empty() && self.step_instructions.is_empty()
    }

    /// The built-in [`GraphOp`] this bytecode denotes, if any.
    pub fn as_graph_op(&self) -> Option<GraphOp> {
        GraphOp::from_bytecode(self)
    }

    pub fn is_graph_op(&self) -> bool {
        self.as_graph_op().is_some()
    }
}

impl FromIterator<Instruction> for Bytecode {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Self {
        Self::from_steps(iter)
    }
}

impl fmt::Display for Bytecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, instructions: &[Instruction]) -> fmt::Result {
            f.write_str("[")?;
            for (i, ix) in instructions.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{ix}")?;
            }
            f.write_str("]")
        }

        f.write_str("[")?;
        list(f, &self.source_instructions)?;
        f.write_str(", ")?;
        list(f, &self.step_instructions)?;
        f.write_str("]")
    }
}
