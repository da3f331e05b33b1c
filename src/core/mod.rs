//! Core layer - engine traits and the values they exchange.
//!
//! This module provides:
//! - [`Backend`] and the reader traits a container engine implements
//! - [`AttrValue`] - attribute values in native form
//! - [`Layout`] - dataset storage layout

mod layout;
mod traits;
mod value;

pub use layout::Layout;
pub use traits::{AttributeReader, Backend, DatasetReader, FileReader, GroupReader};
pub use value::AttrValue;
