//! MBS source acquisition.
//!
//! This crate turns a published MBS XML file into the loosely-typed JSON
//! document consumed by `mbs-normalization`.
//!
//! # Features
//!
//! - **Download**: fetch the XML file over HTTP, or read it from disk
//! - **XML to JSON**: generic structural conversion with no type inference
//! - **Extraction**: re-root `MBS_XML.Data` as the `MBS_Items` collection
//! - **Releases**: read the release date from the XML link and check whether
//!   that release was already downloaded
//!
//! # Example
//!
//! ```ignore
//! use mbs_ingest::{convert_source, fetch_xml, release_date_from_link};
//!
//! let date = release_date_from_link(url)?;
//! let document = convert_source(&fetch_xml(url)?)?;
//! ```

mod download;
mod error;
mod extract;
mod release;
mod xml;

// === Error Types ===
pub use error::{IngestError, Result};

// === Acquisition ===
pub use download::{fetch_xml, read_xml_file};

// === Conversion ===
pub use extract::{DATA_ELEMENT, ROOT_ELEMENT, convert_source, extract_items};
pub use xml::{ATTRIBUTE_PREFIX, CONTENT_KEY, read_xml_tree, xml_to_json};

// === Releases ===
pub use release::{has_release, release_date_from_link};
