// src/commands/mod.rs

//! Command runners behind the CLI subcommands.

mod fetch;
mod requests;
mod sections;
mod validate;
mod watch;

pub use fetch::{run_fetch, FetchTarget};
pub use requests::{run_request_create, run_request_delete};
pub use sections::{build_drafts, run_sections, SetOverride};
pub use validate::run_validate;
pub use watch::run_watch;
