//! # recordkit support
//!
//! Collaborators that sit next to the composition core:
//! - [`Enumerated`] and [`EnumValue`]: named values with labels, cached in a
//!   process-wide registry
//! - [`text`]: byte and character aware string helpers, URL-safe base64
//! - [`headers_from_cgi`]: request headers rebuilt from CGI variables

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod headers;
mod labels;
pub mod text;

pub use error::{SupportError, SupportResult};
pub use headers::{header, headers_from_cgi, Headers};
pub use labels::{EnumValue, Enumerated, UNKNOWN_LABEL};
