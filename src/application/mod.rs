//! Application layer orchestrating the domain.
//!
//! `LoanCalculator` owns the user's inputs and republishes a fresh estimate
//! through its sink after every change.

pub mod calculator;
