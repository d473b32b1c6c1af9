//! Rabital configuration resolver.
//!
//! Produces a single effective [`config::Settings`] value (plus optional
//! tasks and debugger documents) for a workspace, and provides theme
//! discovery and loading from the application's shared directory.

pub mod cli;
pub mod config;
pub mod error;
