//! Seeded property checking
//!
//! A small randomized harness for stating rules about the game: typed
//! generators built from a seeded rng, and properties that report the first
//! failing input together with the seed that reproduces it.

pub mod domain;
pub mod generator;
pub mod property;

pub use generator::{Generator, array, boolean, constant_from, integer, nat, record, tuple2, tuple3};
pub use property::{CheckOutcome, DEFAULT_ITERATIONS, Property, PropertyFailure, assert_property};
