// src/db/models/mod.rs

//! Row models for the archive snapshot tables

mod binary_package;
mod source_package;

pub use binary_package::BinaryPackage;
pub use source_package::SourcePackage;
