//! Transformation pass trait.

use csa_parser::Program;

/// Trait for passes that rewrite a config module
pub trait Pass {
    /// Returns the name of the pass
    fn name(&self) -> &str;

    /// Runs the pass on a module
    ///
    /// Returns `true` if any changes were made, `false` otherwise
    fn run(&self, program: &mut Program) -> bool;
}
