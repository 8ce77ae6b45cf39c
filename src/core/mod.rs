//! Foundational domain types for the stress engine.

pub mod country;
pub mod currency;
pub mod loan;
pub mod portfolio;
pub mod rating;
