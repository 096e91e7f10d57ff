//! Source-to-source transformations on config module ASTs.

mod next_config;
mod pass;
pub mod visit;

pub use next_config::{
    NEXT_CONFIG_IDENTIFIER, NEXT_CONFIG_TYPE_COMMENT, NextConfigPass, Requirement,
};
pub use pass::Pass;
pub use visit::Visitor;

use csa_parser::Program;

/// Transformer that applies a sequence of passes to a config module
pub struct Transformer {
    passes: Vec<Box<dyn Pass>>,
}

impl Transformer {
    /// Creates a transformer with the default passes
    #[must_use]
    pub fn new() -> Self {
        Self {
            passes: vec![Box::new(NextConfigPass::new())],
        }
    }

    /// Runs every pass once, in order
    ///
    /// Returns `true` if any pass changed the module
    pub fn transform(&self, program: &mut Program) -> bool {
        let mut changed = false;
        for pass in &self.passes {
            if pass.run(program) {
                tracing::debug!(pass = pass.name(), "pass changed the module");
                changed = true;
            }
        }
        changed
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}
