//! Domain layer: loan value types, the amortization engine and the ports
//! through which results leave the core.

pub mod amortization;
pub mod currency;
pub mod loan;
pub mod ports;
pub mod range;
