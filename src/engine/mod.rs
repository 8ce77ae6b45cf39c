//! The expected-loss calculation engine.

pub mod calculator;
