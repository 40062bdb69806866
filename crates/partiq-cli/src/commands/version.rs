//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - partitioning quantum compiler with pipeline diagnostics",
        style("Partiq").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  partiq-ir       Circuit intermediate representation");
    println!("  partiq-compile  Pass pipeline, partitioning and diagnostic passes");
    println!("  partiq-cli      Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
