//! # zenconvert
//!
//! Detect and convert between byte, text, base64, stream, blob and HTTP
//! response representations.
//!
//! Every supported representation has a [`DataType`] tag and a predicate.
//! [`detect`] classifies a [`Value`]; [`convert_to`] and the `to_*` shortcuts
//! convert it to any other tag through a registry that holds a converter for
//! every (source, destination) pair. Most converters go through bytes as an
//! intermediate form, so the MIME type of a blob, response or data URL carries
//! over to the destination.
//!
//! ## Usage
//!
//! ```rust
//! use zenconvert::{ByteStream, DataType, Value, detect, to_base64, to_text};
//!
//! # futures::executor::block_on(async {
//! assert_eq!(detect(&Value::from("Hello, World"))?, DataType::Text);
//!
//! let encoded = to_base64("Hello").await?;
//! assert_eq!(encoded, "data:;base64,SGVsbG8=");
//!
//! let text = to_text(ByteStream::from_chunks(["He", "llo"])).await?;
//! assert_eq!(text, "Hello");
//! # Ok::<(), zenconvert::ConvertError>(())
//! # }).unwrap();
//! ```
//!
//! Conversions from blobs, streams, readers and responses read their source
//! and must be awaited; all others complete immediately (see
//! [`Conversion`]).

#![forbid(unsafe_code)]

mod blob;
mod buffer;
mod codecs;
mod config;
mod convert;
mod data_type;
mod detect;
mod error;
mod limits;
mod pipeline;
pub mod predicate;
mod registry;
mod response;
mod stream;
mod value;

pub use blob::Blob;
pub use buffer::{ArrayBuffer, DataView};
pub use config::{BytePolicy, ConvertOptions, TextEncoding};
pub use convert::{
    Conversion, ConvertRequest, convert_to, to_array_buffer, to_base64, to_base64_url, to_blob,
    to_bytes, to_data_view, to_number_array, to_readable_stream, to_response, to_text,
};
pub use data_type::DataType;
pub use detect::detect;
pub use error::ConvertError;
pub use limits::Limits;
pub use registry::{Converter, ConverterRegistry};
pub use response::{Body, Response};
pub use stream::{ByteReader, ByteStream};
pub use value::Value;

// Re-export the crates whose types appear in the public API.
pub use bytes;
pub use http;
