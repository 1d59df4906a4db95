//! Precondition validation for matrix operations
//!
//! Pure functions with no allocation. Every public operation runs the
//! relevant checks here before it allocates, mutates or dispatches workers.

pub mod bounds;

pub use bounds::{
    check_from_to, check_index, check_position, check_range, check_rectangular, check_repeats,
    check_same_shape, check_square, checked_count, checked_extent, checked_storage,
};
