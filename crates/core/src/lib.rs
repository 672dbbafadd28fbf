//! Vitrine Core - Shared types library.
//!
//! This crate provides common types used across Vitrine components:
//! - `storefront` - the catalog browser, cart, and presentation core
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
