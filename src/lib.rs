//! Bus admittance matrices and power injection derivatives for
//! power flow analysis.
//!
//! [`make_ybus`] assembles the bus admittance matrix of a network of
//! π-equivalent branches with off-nominal taps and phase shifters.
//! [`d_sbus_d_v`] forms the partial derivatives of the complex bus power
//! injections with respect to voltage magnitude and angle, the blocks of
//! a Newton-Raphson power flow Jacobian.

mod error;
mod flows;
mod loadcase;
mod mpc;
mod sbus;
mod ybus;

pub mod debug;
pub mod idx;
pub mod idx_cost;
pub mod math;

pub use error::*;
pub use flows::*;
pub use loadcase::*;
pub use mpc::*;
pub use sbus::*;
pub use ybus::*;

#[cfg(test)]
mod tests;
