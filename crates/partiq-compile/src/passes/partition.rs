//! Partitioning and unfolding passes.
//!
//! [`QuickPartitioner`] groups consecutive operations into blocks that touch
//! at most `block_size` qubits and replaces each block by a single
//! [`CircuitGate`](partiq_ir::CircuitGate). [`UnfoldPass`] does the reverse.

use std::collections::BTreeSet;

use async_trait::async_trait;
use tracing::debug;

use partiq_ir::{Circuit, Gate, Operation, QubitId};

use crate::data::PassData;
use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};

/// Default number of qubits per block.
pub const DEFAULT_BLOCK_SIZE: usize = 3;

/// Greedy in-order partitioner.
///
/// Operations are scanned in program order. An operation joins the open
/// block as long as the block's qubit set stays within `block_size`;
/// otherwise the block is closed and a new one is opened. Because blocks
/// are contiguous runs of the original sequence, unfolding the result gives
/// back the original operations in the original order.
#[derive(Debug, Clone)]
pub struct QuickPartitioner {
    block_size: usize,
}

impl QuickPartitioner {
    /// Create a partitioner producing blocks of at most `block_size` qubits.
    pub fn new(block_size: usize) -> CompileResult<Self> {
        if block_size < 2 {
            return Err(CompileError::InvalidConfiguration(format!(
                "block size must be at least 2, got {block_size}"
            )));
        }
        Ok(Self { block_size })
    }

    /// Maximum number of qubits per block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    fn partition(&self, operations: Vec<Operation>) -> CompileResult<Vec<Operation>> {
        let mut blocks = vec![];
        let mut current: Vec<Operation> = vec![];
        let mut qubits: BTreeSet<QubitId> = BTreeSet::new();

        for op in operations {
            let added = op.qubits.iter().filter(|q| !qubits.contains(q)).count();
            if !current.is_empty() && qubits.len() + added > self.block_size {
                blocks.push(close_block(blocks.len(), &qubits, std::mem::take(&mut current))?);
                qubits.clear();
            }
            qubits.extend(op.qubits.iter().copied());
            current.push(op);
        }

        if !current.is_empty() {
            blocks.push(close_block(blocks.len(), &qubits, current)?);
        }

        Ok(blocks)
    }
}

impl Default for QuickPartitioner {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

/// Wrap `operations` into one grouped sub-circuit over `qubits`.
#[allow(clippy::cast_possible_truncation)]
fn close_block(
    index: usize,
    qubits: &BTreeSet<QubitId>,
    operations: Vec<Operation>,
) -> CompileResult<Operation> {
    let location: Vec<QubitId> = qubits.iter().copied().collect();
    let mut block = Circuit::with_size(format!("block_{index}"), location.len() as u32);

    for op in operations {
        let local = op
            .qubits
            .iter()
            .map(|q| {
                location
                    .binary_search(q)
                    .map(|i| QubitId(i as u32))
                    .map_err(|_| CompileError::PassFailed {
                        name: "quick_partition".into(),
                        reason: format!("{q} missing from block location"),
                    })
            })
            .collect::<CompileResult<Vec<_>>>()?;
        block.append(Operation::new(op.gate, local))?;
    }

    Ok(Operation::block(block, location))
}

#[async_trait]
impl Pass for QuickPartitioner {
    fn name(&self) -> &'static str {
        "quick_partition"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    async fn run(&self, circuit: &mut Circuit, _data: &mut PassData) -> CompileResult<()> {
        if let Some(op) = circuit
            .iter()
            .find(|op| op.gate.num_qubits() as usize > self.block_size)
        {
            return Err(CompileError::InvalidConfiguration(format!(
                "gate '{}' acts on {} qubits, more than block size {}",
                op.name(),
                op.gate.num_qubits(),
                self.block_size
            )));
        }

        let before = circuit.num_operations();
        let blocks = self.partition(circuit.operations().to_vec())?;
        debug!(
            "Partitioned {} operations into {} blocks of at most {} qubits",
            before,
            blocks.len(),
            self.block_size
        );
        circuit.replace_operations(blocks)?;

        Ok(())
    }

    /// Circuits whose top level is already all blocks are left alone; this
    /// includes the empty circuit.
    fn should_run(&self, circuit: &Circuit, _data: &PassData) -> bool {
        !circuit.iter().all(Operation::is_circuit_gate)
    }
}

/// Replaces every grouped sub-circuit by the operations it contains.
///
/// Nested blocks are unfolded recursively and block-local qubits are mapped
/// back through each block's location, so the result contains only standard
/// gates.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnfoldPass;

fn unfold_into(op: Operation, out: &mut Vec<Operation>) -> CompileResult<()> {
    match op.gate {
        Gate::Circuit(block) => {
            let location = op.qubits;
            for inner in block.into_circuit().into_operations() {
                let qubits = inner
                    .qubits
                    .iter()
                    .map(|q| {
                        location
                            .get(q.index())
                            .copied()
                            .ok_or_else(|| CompileError::PassFailed {
                                name: "unfold".into(),
                                reason: format!("block-local {q} has no location"),
                            })
                    })
                    .collect::<CompileResult<Vec<_>>>()?;
                unfold_into(Operation::new(inner.gate, qubits), out)?;
            }
        }
        gate @ Gate::Standard(_) => out.push(Operation::new(gate, op.qubits)),
    }
    Ok(())
}

#[async_trait]
impl Pass for UnfoldPass {
    fn name(&self) -> &'static str {
        "unfold"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    async fn run(&self, circuit: &mut Circuit, _data: &mut PassData) -> CompileResult<()> {
        let mut flat = Vec::with_capacity(circuit.num_primitive_operations());
        for op in circuit.operations().to_vec() {
            unfold_into(op, &mut flat)?;
        }
        debug!(
            "Unfolded {} operations into {}",
            circuit.num_operations(),
            flat.len()
        );
        circuit.replace_operations(flat)?;
        Ok(())
    }

    fn should_run(&self, circuit: &Circuit, _data: &PassData) -> bool {
        circuit.iter().any(Operation::is_circuit_gate)
    }
}
