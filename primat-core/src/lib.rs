#![no_std]

//! primat Core - Dense Matrix Element, Shape and Error Definitions
//!
//! This crate provides the element-kind traits, the shape model and the
//! precondition validators shared by every dense matrix in `primat`. It
//! performs no allocation and no I/O.

pub mod error;
pub mod kind;
pub mod shape;
pub mod traits;
pub mod validation;

pub use error::*;
pub use kind::ElementKind;
pub use shape::{Position, Shape};
pub use traits::*;
