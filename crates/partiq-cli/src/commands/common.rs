//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use console::style;
use serde_json::{Value, json};

use partiq_compile::{
    DiagnosticSink, FanoutSink, MemorySink, PassData, TracingSink, WorkflowConfig,
};
use partiq_ir::Circuit;

/// Load a circuit from a JSON file.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    let circuit: Circuit = serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse circuit: {path}"))?;
    circuit
        .validate()
        .with_context(|| format!("Invalid circuit: {path}"))?;

    Ok(circuit)
}

/// Save a circuit to a JSON file.
pub fn save_circuit(circuit: &Circuit, path: &str) -> Result<()> {
    let content = serde_json::to_string_pretty(circuit).context("Failed to serialize circuit")?;
    fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))?;
    Ok(())
}

/// Load a workflow file, or the default workflow when no path is given.
pub fn load_workflow(path: Option<&str>) -> Result<WorkflowConfig> {
    match path {
        Some(path) => WorkflowConfig::from_file(path)
            .with_context(|| format!("Failed to load workflow: {path}")),
        None => Ok(WorkflowConfig::default()),
    }
}

/// Pass data that logs diagnostics through `tracing` and also keeps them.
pub fn recording_pass_data() -> (PassData, Arc<MemorySink>) {
    let memory = Arc::new(MemorySink::new());
    let sink = FanoutSink::new(vec![
        Arc::new(TracingSink) as Arc<dyn DiagnosticSink>,
        memory.clone() as Arc<dyn DiagnosticSink>,
    ]);
    (PassData::with_sink(Arc::new(sink)), memory)
}

/// JSON summary of a finished run.
pub fn summary_json(
    workflow: &WorkflowConfig,
    circuit: &Circuit,
    data: &PassData,
    diagnostics: &MemorySink,
) -> Value {
    json!({
        "workflow": workflow.name,
        "circuit": {
            "name": circuit.name(),
            "num_qubits": circuit.num_qubits(),
            "num_operations": circuit.num_operations(),
            "depth": circuit.depth(),
            "gate_counts": circuit.gate_counts(),
        },
        "diagnostics": diagnostics.messages(),
        "values": data.values(),
    })
}

/// Print the top-level gate counts of a circuit.
pub fn print_gate_counts(circuit: &Circuit) {
    let counts = circuit.gate_counts();
    if counts.is_empty() {
        println!("  Gates: {}", style("none").dim());
        return;
    }

    println!("  Gates:");
    for (name, count) in counts {
        println!("    {:<10} {:>6}", style(name).cyan(), count);
    }
}
