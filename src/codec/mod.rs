//! # Codec
//!
//! Decoding of the textual ACL listing produced by `getfacl(1)`. This is the format the process
//! based resolver consumes but it is equally useful for loading hand written fixtures. Names and
//! paths in the listing use getfacl's octal escaping which is reversed while parsing.

mod escape;
mod getfacl;

pub use escape::EscapeError;
pub use getfacl::{parse_getfacl, GetfaclParseError};
