//! Parser layer
//! - error.rs: ParseError definition
//! - srcinfo.rs: .SRCINFO parser

pub mod error;
pub mod srcinfo;

pub use error::ParseError;
pub use srcinfo::{Srcinfo, SrcinfoParser, read_version};
