//! Circuit container and builder API.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{CircuitGate, Gate, StandardGate};
use crate::operation::Operation;
use crate::qubit::QubitId;

/// A quantum circuit.
///
/// The circuit is an ordered sequence of operations over `num_qubits`
/// qubits. Operations may themselves be grouped sub-circuits, so a
/// partitioned circuit is still a `Circuit`, just one whose top level holds
/// [`CircuitGate`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Operations in program order.
    #[serde(default)]
    operations: Vec<Operation>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            operations: vec![],
        }
    }

    /// Create a circuit with a given number of qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            num_qubits,
            ..Self::new(name)
        }
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    /// Append an operation after validating it against this circuit.
    pub fn append(&mut self, operation: Operation) -> IrResult<&mut Self> {
        self.check(&operation)?;
        self.operations.push(operation);
        Ok(self)
    }

    fn check(&self, operation: &Operation) -> IrResult<()> {
        operation.validate()?;
        for &qubit in &operation.qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: Some(operation.name().to_string()),
                });
            }
        }
        if let Gate::Circuit(block) = &operation.gate {
            block.circuit().validate().map_err(|e| {
                IrError::InvalidBlock(format!("nested circuit '{}': {e}", block.circuit().name()))
            })?;
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::single_qubit_gate(StandardGate::SX, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::single_qubit_gate(StandardGate::Rx(theta), qubit))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::single_qubit_gate(StandardGate::Ry(theta), qubit))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::single_qubit_gate(StandardGate::Rz(theta), qubit))
    }

    /// Apply universal U gate.
    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::single_qubit_gate(
            StandardGate::U(theta, phi, lambda),
            qubit,
        ))
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::two_qubit_gate(StandardGate::CY, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    /// Apply RZZ (ZZ rotation) gate.
    pub fn rzz(&mut self, theta: f64, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::two_qubit_gate(StandardGate::RZZ(theta), q1, q2))
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::new(StandardGate::CCX, [c1, c2, target]))
    }

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.append(Operation::new(gate, qubits))
    }

    /// Place a grouped sub-circuit on `location`.
    ///
    /// `location[i]` is the outer qubit that block-local qubit `i` maps to.
    pub fn append_circuit_gate(
        &mut self,
        gate: CircuitGate,
        location: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.append(Operation::new(gate, location))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of top-level operations.
    ///
    /// Grouped sub-circuits count as one operation each.
    pub fn num_operations(&self) -> usize {
        self.operations.len()
    }

    /// Check if the circuit has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Top-level operations in program order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Iterate over top-level operations in program order.
    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    /// Consume the circuit and return its operations.
    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }

    /// Replace all operations.
    ///
    /// Every operation is validated first; on error the circuit is left
    /// untouched.
    pub fn replace_operations(&mut self, operations: Vec<Operation>) -> IrResult<()> {
        for op in &operations {
            self.check(op)?;
        }
        self.operations = operations;
        Ok(())
    }

    /// Validate every operation, descending into grouped sub-circuits.
    ///
    /// Circuits built through the builder API are always valid; this is for
    /// circuits that arrive through deserialization.
    pub fn validate(&self) -> IrResult<()> {
        self.operations.iter().try_for_each(|op| self.check(op))
    }

    // =========================================================================
    // Analysis
    // =========================================================================

    /// Count top-level operations whose gate equals `gate`.
    ///
    /// Operations nested inside grouped sub-circuits are not visited.
    pub fn count(&self, gate: &Gate) -> usize {
        self.operations.iter().filter(|op| &op.gate == gate).count()
    }

    /// Count operations whose gate equals `gate` at any nesting depth.
    pub fn count_recursive(&self, gate: &Gate) -> usize {
        self.operations
            .iter()
            .map(|op| match &op.gate {
                g if g == gate => 1,
                Gate::Circuit(block) => block.circuit().count_recursive(gate),
                Gate::Standard(_) => 0,
            })
            .sum()
    }

    /// Number of primitive operations after flattening every sub-circuit.
    pub fn num_primitive_operations(&self) -> usize {
        self.operations
            .iter()
            .map(|op| match &op.gate {
                Gate::Circuit(block) => block.circuit().num_primitive_operations(),
                Gate::Standard(_) => 1,
            })
            .sum()
    }

    /// Top-level operation counts keyed by gate name.
    pub fn gate_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for op in &self.operations {
            *counts.entry(op.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Circuit depth over top-level operations.
    ///
    /// A grouped sub-circuit occupies a single layer. Only qubits that some
    /// operation touches are tracked, so the cost does not depend on the
    /// declared register size.
    pub fn depth(&self) -> usize {
        let mut levels: FxHashMap<QubitId, usize> = FxHashMap::default();
        let mut depth = 0;
        for op in &self.operations {
            let level = op
                .qubits
                .iter()
                .filter_map(|q| levels.get(q))
                .max()
                .copied()
                .unwrap_or(0)
                + 1;
            for &q in &op.qubits {
                levels.insert(q, level);
            }
            depth = depth.max(level);
        }
        depth
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a GHZ state preparation circuit (no measurements).
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("ghz", n);
        if n == 0 {
            return Ok(circuit);
        }

        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }

        Ok(circuit)
    }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn cx() -> Gate {
        Gate::standard(StandardGate::CX)
    }

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert!(circuit.is_empty());
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_add_qubit() {
        let mut circuit = Circuit::with_size("test", 2);
        assert_eq!(circuit.add_qubit(), QubitId(2));
        assert_eq!(circuit.num_qubits(), 3);
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .rz(PI / 4.0, QubitId(1))
            .unwrap();

        assert_eq!(circuit.num_operations(), 3);
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_unknown_qubit_rejected() {
        let mut circuit = Circuit::with_size("test", 2);
        let err = circuit.cx(QubitId(0), QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { qubit: QubitId(2), .. }));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_count_top_level_only() {
        let mut block = Circuit::with_size("block", 2);
        block.cx(QubitId(0), QubitId(1)).unwrap();
        block.cx(QubitId(1), QubitId(0)).unwrap();

        let mut circuit = Circuit::with_size("test", 3);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit
            .append_circuit_gate(CircuitGate::new(block), [QubitId(1), QubitId(2)])
            .unwrap();

        assert_eq!(circuit.count(&cx()), 1);
        assert_eq!(circuit.count_recursive(&cx()), 3);
        assert_eq!(circuit.num_primitive_operations(), 3);
    }

    #[test]
    fn test_count_empty_circuit() {
        let circuit = Circuit::with_size("empty", 4);
        assert_eq!(circuit.count(&cx()), 0);
        assert_eq!(circuit.count_recursive(&cx()), 0);
    }

    #[test]
    fn test_gate_counts() {
        let circuit = Circuit::ghz(4).unwrap();
        let counts = circuit.gate_counts();
        assert_eq!(counts.get("h"), Some(&1));
        assert_eq!(counts.get("cx"), Some(&3));
    }

    #[test]
    fn test_block_location_must_match_width() {
        let block = Circuit::with_size("block", 2);
        let mut circuit = Circuit::with_size("test", 3);
        let err = circuit
            .append_circuit_gate(CircuitGate::new(block), [QubitId(0)])
            .unwrap_err();
        assert!(matches!(err, IrError::QubitCountMismatch { .. }));
    }

    #[test]
    fn test_replace_operations_is_atomic() {
        let mut circuit = Circuit::ghz(2).unwrap();
        let before = circuit.clone();
        let bad = vec![
            Operation::single_qubit_gate(StandardGate::X, QubitId(0)),
            Operation::single_qubit_gate(StandardGate::X, QubitId(9)),
        ];
        assert!(circuit.replace_operations(bad).is_err());
        assert_eq!(circuit, before);
    }

    #[test]
    fn test_validate_catches_malformed_json() {
        let json = r#"{
            "name": "bad",
            "num_qubits": 2,
            "operations": [
                { "gate": { "standard": "CX" }, "qubits": [0, 0] }
            ]
        }"#;
        let circuit: Circuit = serde_json::from_str(json).unwrap();
        assert!(matches!(
            circuit.validate(),
            Err(IrError::DuplicateQubit { .. })
        ));
    }

    #[test]
    fn test_nested_circuit_serde() {
        let mut block = Circuit::with_size("block", 2);
        block.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        let mut circuit = Circuit::with_size("outer", 2);
        circuit
            .append_circuit_gate(CircuitGate::new(block), [QubitId(1), QubitId(0)])
            .unwrap();

        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, circuit);
        assert!(back.validate().is_ok());
    }

    #[test]
    fn test_depth_ignores_unused_register() {
        let json = r#"{"name": "wide", "num_qubits": 4294967295}"#;
        let mut circuit: Circuit = serde_json::from_str(json).unwrap();
        assert!(circuit.validate().is_ok());
        assert_eq!(circuit.depth(), 0);

        circuit.h(QubitId(4_000_000_000)).unwrap();
        circuit.cx(QubitId(4_000_000_000), QubitId(7)).unwrap();
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_every_builder_gate() {
        let mut circuit = Circuit::with_size("all", 3);
        circuit
            .y(QubitId(0))
            .unwrap()
            .s(QubitId(1))
            .unwrap()
            .t(QubitId(2))
            .unwrap()
            .sx(QubitId(0))
            .unwrap()
            .u(PI, 0.0, PI / 2.0, QubitId(1))
            .unwrap()
            .cy(QubitId(0), QubitId(1))
            .unwrap()
            .swap(QubitId(1), QubitId(2))
            .unwrap()
            .rzz(PI / 3.0, QubitId(0), QubitId(2))
            .unwrap()
            .gate(StandardGate::Tdg, [QubitId(2)])
            .unwrap();

        let names: Vec<_> = circuit.iter().map(Operation::name).collect();
        assert_eq!(
            names,
            vec!["y", "s", "t", "sx", "u", "cy", "swap", "rzz", "tdg"]
        );
        assert_eq!(
            circuit.operations()[4].gate,
            Gate::standard(StandardGate::U(PI, 0.0, PI / 2.0))
        );

        let err = circuit.gate(StandardGate::Swap, [QubitId(0)]).unwrap_err();
        assert!(matches!(err, IrError::QubitCountMismatch { .. }));
    }

    #[test]
    fn test_ghz() {
        let circuit = Circuit::ghz(5).unwrap();
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.num_operations(), 5);
        assert_eq!(circuit.depth(), 5);
        assert!(Circuit::ghz(0).unwrap().is_empty());
    }
}
