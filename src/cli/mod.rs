//! # CLI Module
//!
//! Command-line front end for the bundled applications.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! ```bash
//! minirouter serve --app typed --addr 127.0.0.1:8080
//! curl http://127.0.0.1:8080/book/7     # Book #7
//! curl http://127.0.0.1:8080/book/x     # 400 Bad Request: Failed to convert 'x' to int
//! ```
//!
//! ### `routes`
//!
//! ```bash
//! minirouter routes --app params --json
//! ```
//!
//! ### `call`
//!
//! Dispatches one request without opening a socket:
//!
//! ```bash
//! minirouter call --app hello --method POST /echo
//! ```
//!
//! Every command accepts `--config <FILE>`, `--name <NAME>` and
//! `--types <true|false>`; flags win over the environment, which wins over the file.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run, run_cli, AppArgs, Cli, Commands};
