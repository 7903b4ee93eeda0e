//! Engine module: packing core, archiver driver, CLI surface, helpers.

pub mod arg_parser;
pub mod cli;
pub mod driver;
pub mod packer;
pub mod progress;
pub mod tools;

// Re-export commonly used items
pub use arg_parser::Cli;
pub use cli::handle_run;
pub use driver::{build_archiver_args, resolve_archiver, run_archiver};
pub use packer::{next_batch, pack, sort_for_policy};
pub use tools::{
    format_size, glob_match, pad_id, path_relative_to, render_archive_name, running_as_root,
    should_include_in_walk,
};
