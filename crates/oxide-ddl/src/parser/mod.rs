//! SQL Parser
//!
//! A hand-written recursive descent parser for MySQL data definition
//! statements.

mod error;
mod expression;
mod parser;

pub use error::ParseError;
pub use parser::Parser;
