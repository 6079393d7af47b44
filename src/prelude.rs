//! Derive macros shared by the enums of this crate.

pub use derive_more::Display;
