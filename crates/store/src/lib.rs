//! Indirect object registry for PDF document assembly.
//!
//! This crate owns the numbered object graph behind a PDF document:
//! - [`ObjectStore`] for allocation, registration and ordered enumeration of
//!   indirect objects, plus the distinguished info/root/pages objects
//! - template import for rebuilding an existing document's object graph
//!   inside a fresh store, remapping indirect references so that cyclic and
//!   shared structures stay finite and identity-preserving

mod error;
mod import;
mod store;

pub use error::StoreError;
pub use store::ObjectStore;
