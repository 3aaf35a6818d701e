//! # dosecalc-decay — Radioactive decay and dose-volume engine.
//!
//! Single-nuclide exponential decay, `A(t) = A0 * 0.5^(t / T½)`, evaluated
//! between two times of day:
//! - **Elapsed time**: a target earlier than the start time rolls over to
//!   the next day.
//! - **Safe divide**: concentration and required volume are 0 instead of
//!   dividing by a zero volume or concentration.
//! - **Reporting precision**: activity to 2 places, concentration and volume
//!   to 3, elapsed minutes to 1.

pub mod engine;

pub use engine::DecayEngine;
