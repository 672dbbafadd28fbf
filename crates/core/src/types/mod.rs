//! Shared newtype wrappers.

mod id;

pub use id::ProductId;
