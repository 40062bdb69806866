//! Circuit operations combining gates with operands.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::gate::{CircuitGate, Gate, StandardGate};
use crate::qubit::QubitId;

/// A gate applied to a list of qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The gate being applied.
    pub gate: Gate,
    /// Qubits the gate acts on, in gate-argument order.
    pub qubits: Vec<QubitId>,
}

impl Operation {
    /// Create an operation.
    ///
    /// The operation is not validated here; [`Circuit::append`] checks arity,
    /// duplicate qubits and qubit range before accepting it.
    pub fn new(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate: gate.into(),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate operation.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::new(gate, [qubit])
    }

    /// Create a two-qubit gate operation.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::new(gate, [q1, q2])
    }

    /// Create a grouped sub-circuit operation placed on `location`.
    pub fn block(circuit: Circuit, location: impl IntoIterator<Item = QubitId>) -> Self {
        Self::new(CircuitGate::new(circuit), location)
    }

    /// Get the name of the gate.
    pub fn name(&self) -> &str {
        self.gate.name()
    }

    /// Check if this operation applies a grouped sub-circuit.
    pub fn is_circuit_gate(&self) -> bool {
        self.gate.is_circuit_gate()
    }

    /// Check the operation is well formed.
    ///
    /// The qubit count must equal the gate arity and no qubit may appear
    /// twice.
    #[allow(clippy::cast_possible_truncation)]
    pub fn validate(&self) -> IrResult<()> {
        let expected = self.gate.num_qubits();
        let got = self.qubits.len() as u32;
        if expected != got {
            return Err(IrError::QubitCountMismatch {
                gate_name: self.name().to_string(),
                expected,
                got,
            });
        }

        let mut seen = FxHashSet::default();
        for &qubit in &self.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(self.name().to_string()),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_operation() {
        let op = Operation::single_qubit_gate(StandardGate::H, QubitId(0));
        assert!(!op.is_circuit_gate());
        assert_eq!(op.qubits.len(), 1);
        assert_eq!(op.name(), "h");
        assert!(op.validate().is_ok());
    }

    #[test]
    fn test_arity_mismatch() {
        let op = Operation::new(StandardGate::CX, [QubitId(0)]);
        match op.validate() {
            Err(IrError::QubitCountMismatch {
                gate_name,
                expected,
                got,
            }) => {
                assert_eq!(gate_name, "cx");
                assert_eq!(expected, 2);
                assert_eq!(got, 1);
            }
            other => panic!("Expected QubitCountMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_qubit() {
        let op = Operation::two_qubit_gate(StandardGate::CZ, QubitId(1), QubitId(1));
        assert!(matches!(
            op.validate(),
            Err(IrError::DuplicateQubit { qubit: QubitId(1), .. })
        ));
    }

    #[test]
    fn test_block_operation() {
        let mut inner = Circuit::with_size("block", 2);
        inner.cx(QubitId(0), QubitId(1)).unwrap();
        let op = Operation::block(inner, [QubitId(3), QubitId(5)]);
        assert!(op.is_circuit_gate());
        assert_eq!(op.name(), "circuit");
        assert!(op.validate().is_ok());
    }
}
