//! Core abstractions for FamHub: entity models, the key-value storage
//! contract, the session/identity store, and derived view computations.

pub mod model;
pub mod session;
pub mod store;
pub mod views;
