//! Terminal chat client for a CRM assistant backend.
//!
//! The crate is organized in four layers:
//!
//! - [`api`]: wire types for the backend's JSON endpoints
//! - [`core`]: conversation state, reply classification, and the gateway
//! - [`ui`]: ratatui rendering and the interactive event loop
//! - [`cli`]: argument parsing and one-shot commands
//!
//! The binary (`src/main.rs`) routes straight into [`cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
