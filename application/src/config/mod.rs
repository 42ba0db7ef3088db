//! Application-level configuration.
//!
//! - [`ExecutionParams`]: invocation timeout and default extraction token

pub mod execution_params;

pub use execution_params::ExecutionParams;
