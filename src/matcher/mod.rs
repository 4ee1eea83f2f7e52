//! Address representation and prefix matching.

mod pattern;

pub use pattern::{Address, Prefix, PrefixError};
