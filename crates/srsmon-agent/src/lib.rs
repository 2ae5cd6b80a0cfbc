//! Agent-side harness for srsmon plugins.
//!
//! Parses the command line and configuration file, drives a
//! [`srsmon_collector::Plugin`] once, and prints its values or graph
//! definitions in the Mackerel agent plugin format.

pub mod cli;
pub mod config;
pub mod helper;
pub mod logging;
pub mod state;
