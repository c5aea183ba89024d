//! Upload area provider implementations.

pub mod local;
