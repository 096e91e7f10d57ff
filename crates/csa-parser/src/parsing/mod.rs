//! Parsing implementation modules.

mod expressions;
mod parser;
mod raw;
mod statements;

pub use parser::Parser;
