//! # ndmat-io
//!
//! Delimited text ingestion and output for [`ndmat_linalg::Matrix`].
//!
//! - [`load`] / [`load_with`] / [`load_file`]: read a whole input into a new
//!   matrix whose shape is inferred from the data
//! - [`extract`]: fill an existing matrix from the current position of a
//!   buffered reader, stopping once it is full
//! - [`write_delimited`] / [`save_file`]: one row per line
//! - [`Tokenizer`]: the delimiter splitter behind all of them
//!
//! Delimiters and the malformed-line policy are configured with
//! [`TextOptions`]. Failures are logged through `tracing` and returned as
//! [`TextError`].

pub mod error;
pub mod options;
pub mod text;
pub mod tokenizer;

#[cfg(test)]
mod property_tests;

pub use error::{TextError, TextResult};
pub use options::TextOptions;
pub use text::{
    extract, extract_with_options, load, load_file, load_file_with, load_with,
    load_with_options, parse_matrix, save_file, write_delimited,
};
pub use tokenizer::Tokenizer;
