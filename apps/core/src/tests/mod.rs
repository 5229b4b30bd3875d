//! Test Module
//!
//! Test suite for the prospection classifier and the review loop around it.
//!
//! ## Test Categories
//! - `brain_tests`: end-to-end classification scenarios and engine properties
//! - `state_tests`: state file persistence
//! - `beeper_tests`: JSON-RPC client against a mock MCP server
//! - `integration_tests`: scan, then act on detections, with fake source and sink

pub mod beeper_tests;
pub mod state_tests;
