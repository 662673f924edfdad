//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine trait)
//! - `visualization` - Concepts, extraction, and the generation session lifecycle

pub mod foundation;
pub mod visualization;
