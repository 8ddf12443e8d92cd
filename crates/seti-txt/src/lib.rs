//! SETI-IPRESS report file format.
//!
//! Writes validated records as pipe-delimited lines encoded in Windows-1252,
//! one file per table, period and facility, named
//! `{ipress}_{YYYY}_{MM}_{SUFFIX}.TXT`. A reader is provided to inspect
//! generated files.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use seti_model::{Childbirth, RecordHeader};
//! use seti_txt::TxtWriter;
//!
//! let record = Childbirth {
//!     header: RecordHeader::new("202602", "12345678", "12345678"),
//!     total_deliveries: 50,
//!     complicated_deliveries: 10,
//!     live_births: 49,
//!     still_births: 1,
//! };
//! let path = TxtWriter::new().write(&[record.into()], Path::new("out"))?;
//! assert!(path.ends_with("12345678_2026_02_TEE0.TXT"));
//! # Ok::<(), seti_txt::TxtError>(())
//! ```

pub mod encoding;
pub mod error;
pub mod reader;
pub mod writer;

pub use encoding::{decode_windows_1252, encode_windows_1252};
pub use error::{Result, TxtError};
pub use reader::{TxtReader, parse_lines, read_txt};
pub use writer::{
    DELIMITER, FILE_EXTENSION, LINE_TERMINATOR, TxtWriter, WriterOptions, encode_records,
    output_filename, render_line,
};
