//! Output generation for normalized MBS items.
//!
//! The record set is rendered as indented JSON under its single collection
//! key and saved as `mbs_<release date>.json`.

mod common;
mod json;

pub use common::{OUTPUT_FILE_PREFIX, ensure_parent_dir, output_file_name};
pub use json::{render_record_set, write_record_set, write_release_output};
