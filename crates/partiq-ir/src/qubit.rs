//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a qubit within a circuit.
///
/// Qubits of a circuit with `n` qubits are numbered `0..n`. Inside a
/// [`CircuitGate`](crate::gate::CircuitGate) the numbering is block-local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Index of this qubit as a `usize`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(0)), "q0");
        assert_eq!(QubitId::from(7).to_string(), "q7");
    }

    #[test]
    fn test_qubit_serializes_as_number() {
        let json = serde_json::to_string(&QubitId(3)).unwrap();
        assert_eq!(json, "3");
    }
}
