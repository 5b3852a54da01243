//! Core library components.
//!
//! This module contains the reconciliation logic, the 1Password CLI client,
//! data sources, and template rendering. Nothing here prints to the terminal.

pub mod config;
pub mod constants;
pub mod domain;
pub mod reconcile;
pub mod render;
pub mod resolver;
pub mod runner;
pub mod source;
pub mod validation;
pub mod vault;
