//! Byte codecs used by the conversion pipeline.
//!
//! Each module is a thin adapter between the hub representation (bytes) and
//! one family of representations: text, base64, number arrays.

pub(crate) mod base64;
pub(crate) mod numbers;
pub(crate) mod text;
