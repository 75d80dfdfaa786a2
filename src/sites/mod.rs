//! Site file input.
//!
//! Sites are read from a JSON file; see [`file`] for the layout handling.

mod file;

pub use file::{parse_sites_json, read_sites_file, DEFAULT_SITES_FILE};
