//! Pass manager for orchestrating a workflow.

use std::fmt;

use tracing::{debug, info, instrument};

use partiq_ir::Circuit;

use crate::config::{PassConfig, WorkflowConfig};
use crate::data::PassData;
use crate::error::CompileResult;
use crate::pass::Pass;

/// Manages and executes a sequence of passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Add an already boxed pass.
    pub fn add_boxed(&mut self, pass: Box<dyn Pass>) {
        self.passes.push(pass);
    }

    /// Run all passes on the given circuit, in insertion order.
    ///
    /// Each pass is awaited before the next starts. The first error stops
    /// the run and is returned as is.
    #[instrument(skip(self, circuit, data), fields(circuit = %circuit.name()))]
    pub async fn run(&self, circuit: &mut Circuit, data: &mut PassData) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits",
            self.passes.len(),
            circuit.num_qubits()
        );

        for pass in &self.passes {
            if pass.should_run(circuit, data) {
                debug!("Running pass: {}", pass.name());
                pass.run(circuit, data).await?;
                debug!(
                    "Pass {} completed, ops: {}",
                    pass.name(),
                    circuit.num_operations()
                );
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, final depth: {}, ops: {}",
            circuit.depth(),
            circuit.num_operations()
        );

        Ok(())
    }

    /// Names of the passes, in order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PassManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassManager")
            .field("passes", &self.pass_names())
            .finish()
    }
}

/// Builder for assembling a workflow pass by pass.
#[derive(Debug, Clone)]
pub struct PassManagerBuilder {
    workflow: WorkflowConfig,
}

impl PassManagerBuilder {
    /// Create a builder with no passes.
    pub fn new() -> Self {
        Self {
            workflow: WorkflowConfig {
                name: "custom".to_string(),
                passes: vec![],
            },
        }
    }

    /// Start from an existing workflow.
    #[must_use]
    pub fn with_workflow(mut self, workflow: WorkflowConfig) -> Self {
        self.workflow = workflow;
        self
    }

    /// Append a gate-count report for the named two-qubit gate.
    #[must_use]
    pub fn with_gate_count(mut self, gate: impl Into<String>) -> Self {
        self.workflow
            .passes
            .push(PassConfig::PrintGateCount { gate: gate.into() });
        self
    }

    /// Append a quick partitioning pass.
    #[must_use]
    pub fn with_partitioning(mut self, block_size: usize) -> Self {
        self.workflow
            .passes
            .push(PassConfig::QuickPartition { block_size });
        self
    }

    /// Append a partition-info report.
    #[must_use]
    pub fn with_partition_info(mut self) -> Self {
        self.workflow.passes.push(PassConfig::PrintPartitionInfo);
        self
    }

    /// Append an unfold pass.
    #[must_use]
    pub fn with_unfold(mut self) -> Self {
        self.workflow.passes.push(PassConfig::Unfold);
        self
    }

    /// The workflow assembled so far.
    pub fn workflow(&self) -> &WorkflowConfig {
        &self.workflow
    }

    /// Build the pass manager.
    pub fn build(self) -> CompileResult<PassManager> {
        self.workflow.build()
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
