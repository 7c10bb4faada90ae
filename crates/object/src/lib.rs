//! Native PDF object model and serialization.
//!
//! This crate provides the foundation types for assembling PDF documents:
//! - [`Object`] for every encodable PDF value, as a closed variant type
//! - [`Reference`] for indirect objects: a numbered cell holding a value and
//!   an optional raw stream payload
//! - [`serialize()`] for turning values into PDF literal syntax

mod error;
mod object;
mod reference;
mod serialize;

pub use error::ConversionError;
pub use object::{Dictionary, ObjId, Object, StringFormat};
pub use reference::Reference;
pub use serialize::serialize;
