//! # CLI Module
//!
//! The `hexgen` command-line interface over the generator.
//!
//! ## Commands
//!
//! ### `add-module`
//!
//! Scaffold a module with its layer directories and base artifacts:
//!
//! ```bash
//! hexgen add-module --service saas-mt-pim-service --module catalog --entity product
//! ```
//!
//! ### `component`
//!
//! Generate a single component and print the one that naturally follows:
//!
//! ```bash
//! hexgen component --service saas-mt-pim-service --module catalog \
//!     --kind usecase --entity product --operation create
//! ```
//!
//! ### `roadmap`, `analyze`, `next`
//!
//! Planning helpers. `roadmap` and `next` do not need a project on disk:
//!
//! ```bash
//! hexgen roadmap --workflow crud_complete --entity product --complexity complex
//! hexgen analyze --service saas-mt-pim-service --module catalog \
//!     --description "create and list products"
//! hexgen next --kind repository
//! ```
//!
//! ### `status`, `scripts`, `track`
//!
//! ```bash
//! hexgen status
//! hexgen scripts --service saas-mt-pim-service --module catalog --entity product
//! hexgen track --done "Product entity:entity" --todo "Stock sync:high:2h"
//! ```
//!
//! ## Global options
//!
//! - `--root <DIR>` - project root (default: `HEXGEN_ROOT`, then the working directory)
//! - `--config <FILE>` - configuration file (default: `hexgen.toml` in the root)
//! - `--dry-run` - report what would be written without touching the filesystem
//! - `--format text|json|yaml` - output format
//! - `--verbose` - debug logging on stderr

mod commands;
mod output;

#[cfg(test)]
mod tests;

pub use commands::{execute, run_cli, Cli, Commands, OutputFormat};
