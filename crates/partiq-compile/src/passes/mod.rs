//! Built-in passes.
//!
//! - [`diagnostics`]: read-only passes that report on the circuit
//! - [`partition`]: passes that group operations into blocks and back

pub mod diagnostics;
pub mod partition;

pub use diagnostics::{
    GateCount, GateCountHistory, PartitionInfo, PrintGateCountPass, PrintPartitionInfoPass,
};
pub use partition::{DEFAULT_BLOCK_SIZE, QuickPartitioner, UnfoldPass};
