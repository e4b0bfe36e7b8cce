use std::fmt;

use strum::IntoEnumIterator;

use crate::bytecode::Bytecode;
use crate::error::Error;
use crate::graph_op::GraphOp;

/// An extensible set of administrative operations, each owning one canonical
/// [`Bytecode`].
///
/// Canonical forms must be pairwise distinct. A clash is reported when the
/// second form is registered, so [`OpRegistry::lookup`] never has to pick
/// between two candidates.
#[derive(Debug, Clone)]
pub struct OpRegistry<K> {
    entries: Vec<(K, Bytecode)>,
}

impl<K> Default for OpRegistry<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K> OpRegistry<K>
where
    K: Copy + Eq + fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from `(key, canonical bytecode)` pairs, failing on the
    /// first duplicate.
    pub fn from_entries(entries: impl IntoIterator<Item = (K, Bytecode)>) -> Result<Self, Error> {
        let mut registry = Self::new();
        for (key, bytecode) in entries {
            registry.register(key, bytecode)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, key: K, bytecode: Bytecode) -> Result<(), Error> {
        if self.entries.iter().any(|(existing, _)| *existing == key) {
            tracing::warn!(?key, "rejected duplicate operation key");
            return Err(Error::DuplicateKey {
                key: format!("{key:?}"),
            });
        }

        if let Some((existing, _)) = self.entries.iter().find(|(_, bc)| *bc == bytecode) {
            tracing::warn!(?key, ?existing, %bytecode, "rejected duplicate canonical bytecode");
            return Err(Error::DuplicateCanonical {
                key: format!("{key:?}"),
                existing: format!("{existing:?}"),
                bytecode: bytecode.to_string(),
            });
        }

        tracing::debug!(?key, %bytecode, "registered operation");
        self.entries.push((key, bytecode));
        Ok(())
    }

    /// The operation whose canonical bytecode is structurally equal to
    /// `bytecode`.
    pub fn lookup(&self, bytecode: &Bytecode) -> Option<K> {
        self.entries
            .iter()
            .find(|(_, canonical)| canonical == bytecode)
            .map(|(key, _)| *key)
    }

    pub fn bytecode(&self, key: K) -> Option<&Bytecode> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, bytecode)| bytecode)
    }

    pub fn contains(&self, bytecode: &Bytecode) -> bool {
        self.lookup(bytecode).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl OpRegistry<GraphOp> {
    /// Registry holding every built-in [`GraphOp`].
    pub fn with_graph_ops() -> Result<Self, Error> {
        Self::from_entries(GraphOp::iter().map(|op| (op, op.bytecode().clone())))
    }
}
