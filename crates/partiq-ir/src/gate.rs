//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(f64, f64, f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// ZZ rotation gate.
    RZZ(f64),

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::U(_, _, _) => "u",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::RZZ(_) => "rzz",
            StandardGate::CCX => "ccx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::U(_, _, _) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::Swap
            | StandardGate::RZZ(_) => 2,

            StandardGate::CCX => 3,
        }
    }

    /// Look up a parameter-free gate by its name.
    ///
    /// Accepts the QASM name (`cx`) and a few common aliases (`cnot`,
    /// `toffoli`). Rotation gates carry an angle and cannot be named this way.
    pub fn from_name(name: &str) -> Option<Self> {
        let gate = match name.to_ascii_lowercase().as_str() {
            "id" | "i" => StandardGate::I,
            "x" => StandardGate::X,
            "y" => StandardGate::Y,
            "z" => StandardGate::Z,
            "h" => StandardGate::H,
            "s" => StandardGate::S,
            "sdg" => StandardGate::Sdg,
            "t" => StandardGate::T,
            "tdg" => StandardGate::Tdg,
            "sx" => StandardGate::SX,
            "cx" | "cnot" => StandardGate::CX,
            "cy" => StandardGate::CY,
            "cz" => StandardGate::CZ,
            "swap" => StandardGate::Swap,
            "ccx" | "toffoli" => StandardGate::CCX,
            _ => return None,
        };
        Some(gate)
    }
}

/// A grouped sub-circuit used as a single gate.
///
/// This is what a partitioning pass produces: each block of the original
/// circuit is wrapped in a `CircuitGate` and placed back on the qubits it
/// touched. The nested circuit addresses its qubits as `0..num_qubits()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitGate {
    circuit: Circuit,
}

impl CircuitGate {
    /// Wrap a circuit as a gate.
    pub fn new(circuit: Circuit) -> Self {
        Self { circuit }
    }

    /// The nested circuit.
    #[inline]
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Unwrap the nested circuit.
    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }

    /// Number of qubits the block spans.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.circuit.num_qubits()
    }

    /// Number of top-level operations inside the block.
    #[inline]
    pub fn num_operations(&self) -> usize {
        self.circuit.num_operations()
    }
}

/// A quantum gate: either a primitive gate or a grouped sub-circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A grouped sub-circuit (a partition).
    Circuit(CircuitGate),
}

impl Gate {
    /// Create a gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Gate::Standard(gate)
    }

    /// Create a gate from a nested circuit.
    pub fn circuit(circuit: Circuit) -> Self {
        Gate::Circuit(CircuitGate::new(circuit))
    }

    /// Get the name of this gate.
    ///
    /// Grouped sub-circuits are named `circuit`, matching the name used in
    /// gate-count summaries.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Gate::Standard(g) => g.name(),
            Gate::Circuit(_) => "circuit",
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::Standard(g) => g.num_qubits(),
            Gate::Circuit(g) => g.num_qubits(),
        }
    }

    /// Check if this gate is a grouped sub-circuit.
    #[inline]
    pub fn is_circuit_gate(&self) -> bool {
        matches!(self, Gate::Circuit(_))
    }

    /// Get the grouped sub-circuit, if this is one.
    #[inline]
    pub fn as_circuit(&self) -> Option<&CircuitGate> {
        match self {
            Gate::Circuit(g) => Some(g),
            Gate::Standard(_) => None,
        }
    }

    /// Get the standard gate, if this is one.
    #[inline]
    pub fn as_standard(&self) -> Option<&StandardGate> {
        match self {
            Gate::Standard(g) => Some(g),
            Gate::Circuit(_) => None,
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<CircuitGate> for Gate {
    fn from(gate: CircuitGate) -> Self {
        Gate::Circuit(gate)
    }
}
