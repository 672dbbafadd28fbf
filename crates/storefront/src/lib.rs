//! Vitrine Storefront library.
//!
//! Headless storefront core for a REST product catalog:
//!
//! - [`catalog`] - remote catalog client and in-session product cache
//! - [`cart`] - authoritative cart state with durable persistence
//! - [`browser`] - category selection and the grid fetch/render cycle
//! - [`views`] - pure presentation view-models
//!
//! The rendering surface is a collaborator: components return view data (or
//! publish it through subscriptions) and the embedding UI draws it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod browser;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod views;
