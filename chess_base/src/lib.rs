//! # Base types for sanchess
//!
//! This is an auxiliary crate for `sanchess`, which contains the leaf data model: coordinates,
//! colors, pieces and their geometric reach.
//!
//! Normally you don't want to use this crate directly. Use `sanchess` instead.

pub mod geometry;
pub mod rules;
pub mod types;
