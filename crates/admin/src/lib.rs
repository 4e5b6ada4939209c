pub mod catalog;
pub mod commands;
