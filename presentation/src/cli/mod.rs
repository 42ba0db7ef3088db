pub mod candidates;
pub mod commands;
