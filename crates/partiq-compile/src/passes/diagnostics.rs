//! Diagnostic passes.
//!
//! These passes observe the circuit at the point where they are inserted and
//! report through the [`DiagnosticSink`](crate::DiagnosticSink) in
//! [`PassData`]. They never modify the circuit, and they store a summary of
//! what they saw back into `PassData` so later passes (and callers) can read
//! it without parsing log lines.

use async_trait::async_trait;
use partiq_ir::{Circuit, Gate, StandardGate};
use serde::Serialize;
use serde_json::json;

use crate::data::PassData;
use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};

/// Result of the most recent [`PrintGateCountPass`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateCount {
    /// Name of the counted gate (e.g. `cx`).
    pub gate: String,
    /// Number of matching top-level operations.
    pub count: usize,
}

/// Every [`GateCount`] recorded during a run, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateCountHistory(pub Vec<GateCount>);

/// Reports how many top-level operations apply a given two-qubit gate.
///
/// Logs `Compilation step, current CNOT count: N` for the default `CX`
/// target. Operations nested inside grouped sub-circuits are not counted, so
/// a fully partitioned circuit reports 0.
#[derive(Debug, Clone)]
pub struct PrintGateCountPass {
    gate: StandardGate,
}

impl PrintGateCountPass {
    /// Count occurrences of `gate`.
    ///
    /// Only two-qubit gates are accepted.
    pub fn new(gate: StandardGate) -> CompileResult<Self> {
        if gate.num_qubits() != 2 {
            return Err(CompileError::InvalidConfiguration(format!(
                "gate count reporter expects a two-qubit gate, '{}' acts on {}",
                gate.name(),
                gate.num_qubits()
            )));
        }
        Ok(Self { gate })
    }

    /// Count CNOT gates.
    pub fn cnot() -> Self {
        Self {
            gate: StandardGate::CX,
        }
    }

    /// The gate being counted.
    pub fn gate(&self) -> &StandardGate {
        &self.gate
    }

    fn label(&self) -> String {
        match self.gate {
            StandardGate::CX => "CNOT".to_string(),
            ref g => g.name().to_uppercase(),
        }
    }
}

impl Default for PrintGateCountPass {
    fn default() -> Self {
        Self::cnot()
    }
}

#[async_trait]
impl Pass for PrintGateCountPass {
    fn name(&self) -> &'static str {
        "print_gate_count"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    async fn run(&self, circuit: &mut Circuit, data: &mut PassData) -> CompileResult<()> {
        let count = circuit.count(&Gate::standard(self.gate.clone()));

        data.sink().info(
            self.name(),
            format!("Compilation step, current {} count: {count}", self.label()),
        );

        let record = GateCount {
            gate: self.gate.name().to_string(),
            count,
        };
        data.set_value(format!("{}_count", record.gate), json!(count));
        data.get_or_default::<GateCountHistory>()
            .0
            .push(record.clone());
        data.insert(record);

        Ok(())
    }
}

/// Result of the most recent [`PrintPartitionInfoPass`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PartitionInfo {
    /// At least one top-level operation is a primitive gate.
    Unpartitioned,
    /// Every top-level operation is a grouped sub-circuit.
    Partitioned {
        /// Number of top-level blocks.
        partitions: usize,
        /// Sum of the operation counts of all blocks.
        total_operations: usize,
        /// `total_operations / partitions`; `None` when there are no blocks.
        average_block_size: Option<f64>,
    },
}

/// Reports partitioning statistics.
///
/// If any top-level operation is not a grouped sub-circuit the pass logs
/// `Circuit not yet partitioned` and nothing else. Otherwise it logs the
/// number of partitions and the average number of operations per partition.
///
/// An empty circuit has zero partitions; the average is then reported as
/// `undefined` instead of being computed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintPartitionInfoPass;

impl PrintPartitionInfoPass {
    /// Compute partition statistics without reporting them.
    pub fn inspect(circuit: &Circuit) -> PartitionInfo {
        let mut total_operations = 0;
        for op in circuit {
            let Some(block) = op.gate.as_circuit() else {
                return PartitionInfo::Unpartitioned;
            };
            total_operations += block.num_operations();
        }

        let partitions = circuit.num_operations();
        #[allow(clippy::cast_precision_loss)]
        let average_block_size =
            (partitions > 0).then(|| total_operations as f64 / partitions as f64);

        PartitionInfo::Partitioned {
            partitions,
            total_operations,
            average_block_size,
        }
    }
}

#[async_trait]
impl Pass for PrintPartitionInfoPass {
    fn name(&self) -> &'static str {
        "print_partition_info"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    async fn run(&self, circuit: &mut Circuit, data: &mut PassData) -> CompileResult<()> {
        let info = Self::inspect(circuit);
        let sink = data.sink();

        match &info {
            PartitionInfo::Unpartitioned => {
                sink.info(self.name(), "Circuit not yet partitioned".to_string());
            }
            PartitionInfo::Partitioned {
                partitions,
                average_block_size,
                ..
            } => {
                sink.info(self.name(), format!("Number of partitions: {partitions}"));
                let average = match average_block_size {
                    // Debug formatting always keeps a decimal point (4.0, not 4).
                    Some(avg) => format!("{avg:?}"),
                    None => "undefined".to_string(),
                };
                sink.info(self.name(), format!("Average block size: {average}"));
            }
        }

        data.set_value("partition_info", json!(info));
        data.insert(info);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::sink::MemorySink;
    use partiq_ir::{CircuitGate, QubitId};

    fn data_with_sink() -> (PassData, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (PassData::with_sink(sink.clone()), sink)
    }

    /// A block of `n` single-qubit gates on a one-qubit circuit.
    fn block(n: usize) -> CircuitGate {
        let mut inner = Circuit::with_size("block", 1);
        for _ in 0..n {
            inner.h(QubitId(0)).unwrap();
        }
        CircuitGate::new(inner)
    }

    fn partitioned(sizes: &[usize]) -> Circuit {
        let mut circuit = Circuit::with_size("partitioned", 1);
        for &n in sizes {
            circuit.append_circuit_gate(block(n), [QubitId(0)]).unwrap();
        }
        circuit
    }

    #[tokio::test]
    async fn test_gate_count_zero() {
        let (mut data, sink) = data_with_sink();
        let mut circuit = Circuit::with_size("t", 2);
        circuit.h(QubitId(0)).unwrap();

        PrintGateCountPass::cnot()
            .run(&mut circuit, &mut data)
            .await
            .unwrap();

        assert_eq!(sink.messages(), vec!["Compilation step, current CNOT count: 0"]);
        assert_eq!(data.get::<GateCount>().unwrap().count, 0);
    }

    #[tokio::test]
    async fn test_gate_count_n() {
        let (mut data, sink) = data_with_sink();
        let mut circuit = Circuit::ghz(6).unwrap();
        circuit.cz(QubitId(0), QubitId(1)).unwrap();

        PrintGateCountPass::cnot()
            .run(&mut circuit, &mut data)
            .await
            .unwrap();

        assert_eq!(sink.messages(), vec!["Compilation step, current CNOT count: 5"]);
        assert_eq!(
            data.get::<GateCount>(),
            Some(&GateCount {
                gate: "cx".into(),
                count: 5
            })
        );
    }

    #[tokio::test]
    async fn test_gate_count_other_gate() {
        let (mut data, sink) = data_with_sink();
        let mut circuit = Circuit::with_size("t", 2);
        circuit.cz(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        PrintGateCountPass::new(StandardGate::CZ)
            .unwrap()
            .run(&mut circuit, &mut data)
            .await
            .unwrap();

        assert_eq!(sink.messages(), vec!["Compilation step, current CZ count: 1"]);
        assert_eq!(data.value("cz_count"), Some(&json!(1)));
    }

    #[test]
    fn test_gate_count_rejects_non_two_qubit_gate() {
        assert!(matches!(
            PrintGateCountPass::new(StandardGate::H),
            Err(CompileError::InvalidConfiguration(_))
        ));
        assert!(PrintGateCountPass::new(StandardGate::CCX).is_err());
    }

    #[tokio::test]
    async fn test_gate_count_history_accumulates() {
        let (mut data, _sink) = data_with_sink();
        let mut circuit = Circuit::ghz(3).unwrap();
        let pass = PrintGateCountPass::cnot();

        pass.run(&mut circuit, &mut data).await.unwrap();
        circuit.cx(QubitId(0), QubitId(2)).unwrap();
        pass.run(&mut circuit, &mut data).await.unwrap();

        let history = data.get::<GateCountHistory>().unwrap();
        let counts: Vec<_> = history.0.iter().map(|g| g.count).collect();
        assert_eq!(counts, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_not_yet_partitioned() {
        let (mut data, sink) = data_with_sink();
        let mut circuit = partitioned(&[2, 2]);
        circuit.x(QubitId(0)).unwrap();
        let before = circuit.clone();

        PrintPartitionInfoPass
            .run(&mut circuit, &mut data)
            .await
            .unwrap();

        assert_eq!(sink.messages(), vec!["Circuit not yet partitioned"]);
        assert_eq!(data.get::<PartitionInfo>(), Some(&PartitionInfo::Unpartitioned));
        assert_eq!(circuit, before);
    }

    #[tokio::test]
    async fn test_partition_stats() {
        let (mut data, sink) = data_with_sink();
        let mut circuit = partitioned(&[3, 5]);

        PrintPartitionInfoPass
            .run(&mut circuit, &mut data)
            .await
            .unwrap();

        assert_eq!(
            sink.messages(),
            vec!["Number of partitions: 2", "Average block size: 4.0"]
        );
        assert_eq!(
            data.get::<PartitionInfo>(),
            Some(&PartitionInfo::Partitioned {
                partitions: 2,
                total_operations: 8,
                average_block_size: Some(4.0),
            })
        );
        assert_eq!(
            data.value("partition_info"),
            Some(&json!({
                "state": "partitioned",
                "partitions": 2,
                "total_operations": 8,
                "average_block_size": 4.0,
            }))
        );
    }

    #[tokio::test]
    async fn test_partition_fractional_average() {
        let (mut data, sink) = data_with_sink();
        let mut circuit = partitioned(&[1, 2]);

        PrintPartitionInfoPass
            .run(&mut circuit, &mut data)
            .await
            .unwrap();

        assert_eq!(sink.messages()[1], "Average block size: 1.5");
    }

    #[tokio::test]
    async fn test_empty_circuit_has_undefined_average() {
        let (mut data, sink) = data_with_sink();
        let mut circuit = Circuit::with_size("empty", 3);

        PrintPartitionInfoPass
            .run(&mut circuit, &mut data)
            .await
            .unwrap();

        assert_eq!(
            sink.messages(),
            vec!["Number of partitions: 0", "Average block size: undefined"]
        );
        assert_eq!(
            data.get::<PartitionInfo>(),
            Some(&PartitionInfo::Partitioned {
                partitions: 0,
                total_operations: 0,
                average_block_size: None,
            })
        );
    }

    #[test]
    fn test_inspect_stops_at_first_primitive() {
        let mut circuit = Circuit::with_size("t", 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.append_circuit_gate(block(4), [QubitId(0)]).unwrap();
        assert_eq!(
            PrintPartitionInfoPass::inspect(&circuit),
            PartitionInfo::Unpartitioned
        );
    }
}
