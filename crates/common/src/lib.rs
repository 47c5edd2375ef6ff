//! Shared types for the event-sourcing contract crates.
//!
//! - [`Value`], [`Object`] and [`Callable`]: untyped structural values as
//!   supplied by a host runtime
//! - [`Identifier`]: number-or-text ids for aggregates and events

pub mod types;
pub mod value;

pub use types::Identifier;
pub use value::{Callable, Object, Value};
