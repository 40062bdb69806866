//! Inspect command implementation.

use anyhow::{Context, Result};
use console::style;

use partiq_compile::WorkflowConfig;

use super::common::{load_circuit, print_gate_counts, recording_pass_data, summary_json};

/// Execute the inspect command.
pub async fn execute(input: &str, json: bool) -> Result<()> {
    let config = WorkflowConfig::diagnostics();
    let pm = config.build().context("Failed to build diagnostics")?;
    let mut circuit = load_circuit(input)?;

    let (mut data, diagnostics) = recording_pass_data();
    pm.run(&mut circuit, &mut data).await?;

    if json {
        let summary = summary_json(&config, &circuit, &data, &diagnostics);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {} ({} qubits)",
        style("Circuit").cyan().bold(),
        style(circuit.name()).green(),
        circuit.num_qubits()
    );
    println!(
        "  Operations: {} top-level, {} primitive",
        circuit.num_operations(),
        circuit.num_primitive_operations()
    );
    println!("  Depth: {}", circuit.depth());
    print_gate_counts(&circuit);

    Ok(())
}
