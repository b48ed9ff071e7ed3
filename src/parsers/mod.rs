//! Parsing functionality for source files
//!
//! Declarations are recognized line by line; see [`statement`].

pub mod statement;

pub use statement::{split_reference, ImportTarget, Recognizer, Statement};
