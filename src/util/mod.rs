//! Utility types shared by every layer.
//!
//! - [`TypeClass`] / [`Datatype`] - stored element types and their native mapping
//! - [`Dimensions`] - dataspace extents
//! - [`Error`] / [`Result`] - error handling

mod type_class;
mod data_type;
mod error;
mod dimensions;

pub use type_class::*;
pub use data_type::*;
pub use error::*;
pub use dimensions::*;
