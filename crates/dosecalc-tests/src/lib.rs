//! End-to-end test suite for dosecalc.
//!
//! Drives the HTTP router in-process and checks the calculator's published
//! properties across crate boundaries.

pub mod helpers;
