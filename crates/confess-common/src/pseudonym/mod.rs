//! Pseudonym generation

mod generator;

pub use generator::{generate_pseudonym, NUMBER_MAX, NUMBER_MIN};
