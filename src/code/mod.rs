//! # Code
//!
//! Generators for the JavaScript that gets spliced into a target extension

pub mod js;
