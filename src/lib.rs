//! Powertier - map spreadsheet columns onto the electricity distribution hierarchy
//!
//! This library provides the core functionality for Powertier, including:
//! - Stage models for the Generation -> Transmission -> Substation ->
//!   Distribution -> Consumer hierarchy
//! - Spreadsheet loading (CSV and Excel/OpenDocument workbooks)
//! - Column detection for each hierarchy level
//! - The example power-flow simulation
//! - CLI command parsing, configuration and output formatting
//!
//! # Example
//!
//! ```no_run
//! use powertier::cli::run;
//!
//! fn main() {
//!     if let Err(e) = run() {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod config;
pub mod models;
pub mod mapping;
pub mod loader;
pub mod sim;
pub mod cli;
pub mod utils;
