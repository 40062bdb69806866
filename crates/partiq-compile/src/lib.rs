//! Partiq Pass Pipeline
//!
//! This crate provides the pass infrastructure Partiq runs circuits through,
//! together with the passes that partition a circuit into grouped
//! sub-circuits and the diagnostic passes that report on it.
//!
//! # Architecture
//!
//! ```text
//! Input Circuit
//!       |
//!       v
//! +-------------+
//! | PassManager | <-- PassData (sink, typed results, JSON values)
//! +-------------+
//!       |
//!       |-- PrintGateCountPass      "Compilation step, current CNOT count: N"
//!       |-- QuickPartitioner        groups operations into blocks
//!       |-- PrintPartitionInfoPass  "Number of partitions: P"
//!       |-- UnfoldPass              flattens blocks again
//!       |
//!       v
//! Output Circuit
//! ```
//!
//! Passes run strictly in insertion order. Each pass is awaited before the
//! next one starts, and the first error ends the run.
//!
//! # Example: Default Workflow
//!
//! ```rust
//! use std::sync::Arc;
//! use partiq_compile::{MemorySink, PassData, WorkflowConfig};
//! use partiq_ir::Circuit;
//!
//! # tokio_test();
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn tokio_test() {
//! let mut circuit = Circuit::ghz(4).unwrap();
//! let pm = WorkflowConfig::default().build().unwrap();
//!
//! let sink = Arc::new(MemorySink::new());
//! let mut data = PassData::with_sink(sink.clone());
//! pm.run(&mut circuit, &mut data).await.unwrap();
//!
//! assert_eq!(
//!     sink.messages(),
//!     vec![
//!         "Compilation step, current CNOT count: 3",
//!         "Number of partitions: 2",
//!         "Average block size: 2.0",
//!         "Compilation step, current CNOT count: 3",
//!     ]
//! );
//! # }
//! ```
//!
//! # Custom Passes
//!
//! Implement the [`Pass`] trait to add a pass to the pipeline:
//!
//! ```rust
//! use async_trait::async_trait;
//! use partiq_compile::{CompileResult, Pass, PassData, PassKind};
//! use partiq_ir::Circuit;
//!
//! struct DepthReport;
//!
//! #[async_trait]
//! impl Pass for DepthReport {
//!     fn name(&self) -> &str { "depth_report" }
//!     fn kind(&self) -> PassKind { PassKind::Analysis }
//!
//!     async fn run(&self, circuit: &mut Circuit, data: &mut PassData) -> CompileResult<()> {
//!         data.sink().info(self.name(), format!("depth: {}", circuit.depth()));
//!         Ok(())
//!     }
//! }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod manager;
pub mod pass;
pub mod sink;

// Built-in passes
pub mod passes;

pub use config::{PassConfig, WorkflowConfig};
pub use data::PassData;
pub use error::{CompileError, CompileResult};
pub use manager::{PassManager, PassManagerBuilder};
pub use pass::{Pass, PassKind};
pub use passes::{
    GateCount, GateCountHistory, PartitionInfo, PrintGateCountPass, PrintPartitionInfoPass,
    QuickPartitioner, UnfoldPass,
};
pub use sink::{
    DIAGNOSTIC_TARGET, DiagnosticLevel, DiagnosticRecord, DiagnosticSink, FanoutSink, MemorySink,
    TracingSink,
};
