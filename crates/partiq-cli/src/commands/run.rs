//! Run command implementation.

use anyhow::{Context, Result};
use console::style;

use super::common::{
    load_circuit, load_workflow, print_gate_counts, recording_pass_data, save_circuit,
    summary_json,
};

/// Execute the run command.
pub async fn execute(
    input: &str,
    workflow: Option<&str>,
    output: Option<&str>,
    json: bool,
) -> Result<()> {
    let config = load_workflow(workflow)?;
    let pm = config.build().context("Failed to build workflow")?;
    let mut circuit = load_circuit(input)?;

    if !json {
        println!(
            "{} Running workflow {} on {}",
            style("→").cyan().bold(),
            style(&config.name).yellow(),
            style(input).green()
        );
        println!(
            "  Loaded: {} qubits, {} ops, depth {}",
            circuit.num_qubits(),
            circuit.num_operations(),
            circuit.depth()
        );
        println!("  Passes: {}", pm.pass_names().join(" → "));
    }

    let (mut data, diagnostics) = recording_pass_data();
    pm.run(&mut circuit, &mut data)
        .await
        .with_context(|| format!("Workflow '{}' failed", config.name))?;

    if let Some(path) = output {
        save_circuit(&circuit, path)?;
    }

    if json {
        let summary = summary_json(&config, &circuit, &data, &diagnostics);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{} Workflow complete", style("✓").green().bold());
    println!(
        "  Result: {} ops, depth {}",
        circuit.num_operations(),
        circuit.depth()
    );
    print_gate_counts(&circuit);
    if let Some(path) = output {
        println!("  Output: {}", style(path).green());
    }

    Ok(())
}
