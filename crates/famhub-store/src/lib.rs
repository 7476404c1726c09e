//! Concrete storage implementation: one JSON file per key under a data
//! directory, written atomically so a crash never leaves a torn value.

pub mod json_file_store;
