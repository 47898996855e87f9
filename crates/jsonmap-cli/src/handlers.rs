//! Command handlers for CLI subcommands
//!
//! Each subcommand lives in its own module; shared document and template
//! loading lives in `utils`.

mod completions;
mod config;
mod map;
mod utils;
mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use map::handle_map;
pub use validate::handle_validate;
