//! # CLI Module
//!
//! Command-line entry point for the `kittymux` binary.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Start the key-value HTTP server:
//!
//! ```bash
//! kittymux serve --addr 127.0.0.1:8080 --config kittymux.yaml --log-format json
//! ```
//!
//! Options:
//! - `--addr <ADDR>` - Listen address (default `0.0.0.0:8080`)
//! - `--config <FILE>` - YAML configuration file
//! - `--log-level <LEVEL>` - trace, debug, info, warn, error
//! - `--log-format <FORMAT>` - json or pretty
//!
//! Flags override the `KITTY_*` environment variables, which override the
//! config file; see [`crate::config`].
//!
//! ### `routes`
//!
//! Print the route table in the order requests are matched against it:
//!
//! ```bash
//! kittymux routes
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run, run_cli, Cli, Commands, ServeArgs};
