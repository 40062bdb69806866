//! Pass trait and types for compilation passes.

use async_trait::async_trait;
use partiq_ir::Circuit;

use crate::data::PassData;
use crate::error::CompileResult;

/// The kind of compilation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Analysis pass that reads but does not modify the circuit.
    Analysis,
    /// Transformation pass that modifies the circuit.
    Transformation,
}

/// A compilation pass that operates on a circuit.
///
/// Passes are the fundamental unit of work in Partiq. The pass manager
/// awaits each pass in turn, handing it the circuit and the shared
/// [`PassData`] for the run.
///
/// `run` is asynchronous so a pass can yield to the scheduler, but the
/// built-in passes never block and finish in a single poll.
#[async_trait]
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Get the kind of this pass.
    fn kind(&self) -> PassKind;

    /// Run the pass on the given circuit.
    ///
    /// Analysis passes must leave the circuit untouched; they report through
    /// the sink in `data` and may store results in it.
    ///
    /// Transformation passes rewrite the circuit and may read from `data`.
    async fn run(&self, circuit: &mut Circuit, data: &mut PassData) -> CompileResult<()>;

    /// Check if this pass should run based on current state.
    ///
    /// This can be overridden to skip passes that have nothing to do.
    fn should_run(&self, _circuit: &Circuit, _data: &PassData) -> bool {
        true
    }
}
