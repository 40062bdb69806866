//! Workflow configuration.
//!
//! A workflow is an ordered list of passes, loaded from YAML:
//!
//! ```yaml
//! name: default
//! passes:
//!   - type: print_gate_count
//!     gate: cx
//!   - type: quick_partition
//!     block_size: 3
//!   - type: print_partition_info
//!   - type: unfold
//! ```
//!
//! Omitted fields fall back to defaults (`gate: cx`, `block_size: 3`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use partiq_ir::StandardGate;

use crate::error::{CompileError, CompileResult};
use crate::manager::PassManager;
use crate::pass::Pass;
use crate::passes::{
    DEFAULT_BLOCK_SIZE, PrintGateCountPass, PrintPartitionInfoPass, QuickPartitioner, UnfoldPass,
};

/// One entry of a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PassConfig {
    /// [`PrintGateCountPass`] for the named two-qubit gate.
    PrintGateCount {
        #[serde(default = "default_gate")]
        gate: String,
    },
    /// [`QuickPartitioner`] with the given block size.
    QuickPartition {
        #[serde(default = "default_block_size")]
        block_size: usize,
    },
    /// [`PrintPartitionInfoPass`].
    PrintPartitionInfo,
    /// [`UnfoldPass`].
    Unfold,
}

fn default_gate() -> String {
    "cx".to_string()
}

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

fn default_name() -> String {
    "default".to_string()
}

impl PassConfig {
    /// Instantiate the pass this entry describes.
    pub fn build(&self) -> CompileResult<Box<dyn Pass>> {
        let pass: Box<dyn Pass> = match self {
            PassConfig::PrintGateCount { gate } => {
                let gate = StandardGate::from_name(gate)
                    .ok_or_else(|| CompileError::UnknownGate(gate.clone()))?;
                Box::new(PrintGateCountPass::new(gate)?)
            }
            PassConfig::QuickPartition { block_size } => {
                Box::new(QuickPartitioner::new(*block_size)?)
            }
            PassConfig::PrintPartitionInfo => Box::new(PrintPartitionInfoPass),
            PassConfig::Unfold => Box::new(UnfoldPass),
        };
        Ok(pass)
    }
}

/// An ordered list of passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Workflow name, used in logs.
    #[serde(default = "default_name")]
    pub name: String,

    /// Passes in execution order.
    #[serde(default)]
    pub passes: Vec<PassConfig>,
}

impl Default for WorkflowConfig {
    /// Count CNOTs, partition, report partitions, unfold, count CNOTs again.
    fn default() -> Self {
        Self {
            name: default_name(),
            passes: vec![
                PassConfig::PrintGateCount {
                    gate: default_gate(),
                },
                PassConfig::QuickPartition {
                    block_size: DEFAULT_BLOCK_SIZE,
                },
                PassConfig::PrintPartitionInfo,
                PassConfig::Unfold,
                PassConfig::PrintGateCount {
                    gate: default_gate(),
                },
            ],
        }
    }
}

impl WorkflowConfig {
    /// Only the two diagnostic passes; never modifies the circuit.
    pub fn diagnostics() -> Self {
        Self {
            name: "diagnostics".to_string(),
            passes: vec![
                PassConfig::PrintGateCount {
                    gate: default_gate(),
                },
                PassConfig::PrintPartitionInfo,
            ],
        }
    }

    /// Parse a workflow from YAML.
    pub fn from_yaml(source: &str) -> CompileResult<Self> {
        serde_yaml_ng::from_str(source).map_err(|e| CompileError::Workflow(e.to_string()))
    }

    /// Load a workflow from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> CompileResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml(&source)
    }

    /// Serialize the workflow to YAML.
    pub fn to_yaml(&self) -> CompileResult<String> {
        serde_yaml_ng::to_string(self).map_err(|e| CompileError::Workflow(e.to_string()))
    }

    /// Build a pass manager running this workflow.
    pub fn build(&self) -> CompileResult<PassManager> {
        let mut pm = PassManager::new();
        for entry in &self.passes {
            pm.add_boxed(entry.build()?);
        }
        Ok(pm)
    }
}
