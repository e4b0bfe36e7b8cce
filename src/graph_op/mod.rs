pub mod registry;

use std::sync::LazyLock;

use strum::IntoEnumIterator;

use crate::bytecode::{Bytecode, Instruction};

pub use registry::OpRegistry;

/// Operator shared by the transaction graph operations.
pub const TX_OPERATOR: &str = "tx";

static TX_COMMIT: LazyLock<Bytecode> = LazyLock::new(|| tx_bytecode("commit"));
static TX_ROLLBACK: LazyLock<Bytecode> = LazyLock::new(|| tx_bytecode("rollback"));

fn tx_bytecode(action: &'static str) -> Bytecode {
    Bytecode::from_parts(
        [Instruction::canonical(TX_OPERATOR, action)],
        Vec::new(),
    )
}

/// A graph operation: bytecode that does not describe a traversal but names a
/// function to perform on the remote graph instance.
///
/// Operations are recognised by value. Incoming bytecode is compared
/// structurally against each canonical form, never by reference, so bytecode
/// rebuilt by a deserializer is still recognised.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GraphOp {
    /// Commit a transaction.
    TxCommit,
    /// Roll back a transaction.
    TxRollback,
}

impl GraphOp {
    /// The canonical bytecode for this operation.
    ///
    /// It is built once per process and only ever lent out as a shared
    /// reference. Callers that want to extend it must clone it first, which
    /// leaves the canonical form and every other holder untouched.
    pub fn bytecode(self) -> &'static Bytecode {
        match self {
            Self::TxCommit => &*TX_COMMIT,
            Self::TxRollback => &*TX_ROLLBACK,
        }
    }

    pub fn matches(self, bytecode: &Bytecode) -> bool {
        self.bytecode() == bytecode
    }

    /// Finds the operation whose canonical bytecode equals `bytecode`.
    pub fn from_bytecode(bytecode: &Bytecode) -> Option<Self> {
        let found = Self::iter().find(|op| op.matches(bytecode));
        if found.is_none() {
            tracing::trace!(%bytecode, "bytecode is not a graph operation");
        }
        found
    }
}
