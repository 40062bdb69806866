//! Partiq Circuit Intermediate Representation
//!
//! This crate provides the data structures the Partiq compiler passes operate
//! on. A [`Circuit`] is an ordered sequence of [`Operation`]s; each operation
//! applies a [`Gate`] to a list of qubits.
//!
//! # Gate kinds
//!
//! A gate is a tagged variant:
//!
//! - [`Gate::Standard`]: a primitive gate with known semantics ([`StandardGate`])
//! - [`Gate::Circuit`]: a grouped sub-circuit ([`CircuitGate`]), the unit a
//!   partitioning pass produces. Its nested circuit uses block-local qubits
//!   `0..k`; the enclosing [`Operation`] maps them onto the outer circuit.
//!
//! Passes test the discriminant with [`Gate::is_circuit_gate`] or
//! [`Gate::as_circuit`] rather than inspecting types at runtime.
//!
//! # Example
//!
//! ```rust
//! use partiq_ir::{Circuit, Gate, QubitId, StandardGate};
//!
//! let mut circuit = Circuit::with_size("bell", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_operations(), 2);
//! assert_eq!(circuit.count(&Gate::standard(StandardGate::CX)), 1);
//! ```
//!
//! # Example: Grouped Sub-Circuit
//!
//! ```rust
//! use partiq_ir::{Circuit, CircuitGate, QubitId};
//!
//! let mut block = Circuit::with_size("block", 2);
//! block.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let mut circuit = Circuit::with_size("outer", 3);
//! circuit
//!     .append_circuit_gate(CircuitGate::new(block), [QubitId(1), QubitId(2)])
//!     .unwrap();
//!
//! assert!(circuit.operations()[0].gate.is_circuit_gate());
//! assert_eq!(circuit.num_operations(), 1);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod operation;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{CircuitGate, Gate, StandardGate};
pub use operation::Operation;
pub use qubit::QubitId;
