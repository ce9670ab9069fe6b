//! Column indices of the generator cost table (0-based) and the cost
//! models it can hold.
//!
//! ```txt
//! MODEL     cost model, 1 - piecewise linear, 2 - polynomial
//! STARTUP   startup cost in US dollars
//! SHUTDOWN  shutdown cost in US dollars
//! NCOST     number of breakpoints (piecewise linear) or
//!           number of coefficients (polynomial)
//! COST      first cost parameter:
//!             piecewise linear: p0, f0, p1, f1, ... with p0 < p1 < ...
//!             polynomial: cn, ..., c1, c0 (highest order first)
//! ```

use crate::error::{NetworkError, Result};

// cost models
pub const PW_LINEAR: usize = 1;
pub const POLYNOMIAL: usize = 2;

// indices
pub const MODEL: usize = 0;
pub const STARTUP: usize = 1;
pub const SHUTDOWN: usize = 2;
pub const NCOST: usize = 3;
pub const COST: usize = 4;

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum CostModel {
    /// Piecewise linear cost model defined by breakpoints.
    PwLinear,
    /// Polynomial cost model, highest order coefficient first.
    Polynomial,
}

/// GenCost defines a generator cost function f(p), with f in $/hr and
/// p in MW (or MVAr).
#[derive(Debug, Clone, PartialEq)]
pub struct GenCost {
    pub model: CostModel,

    /// Startup cost in US dollars.
    pub startup: f64,

    /// Shutdown cost in US dollars.
    pub shutdown: f64,

    /// Breakpoints `p0, f0, p1, f1, ...` or coefficients `cn, ..., c0`.
    pub cost: Vec<f64>,
}

impl GenCost {
    /// Number of breakpoints or coefficients.
    pub fn n_cost(&self) -> usize {
        match self.model {
            CostModel::PwLinear => self.cost.len() / 2,
            CostModel::Polynomial => self.cost.len(),
        }
    }

    /// Reads a cost function from a gencost row.
    pub fn from_row(row: usize, a: &[f64]) -> Result<Self> {
        let malformed = |reason: String| NetworkError::MalformedRow {
            table: "gencost",
            row,
            reason,
        };
        if a.len() < COST {
            return Err(malformed(format!(
                "expected at least {} columns, got {}",
                COST,
                a.len()
            )));
        }

        let model = match a[MODEL] {
            m if m == PW_LINEAR as f64 => CostModel::PwLinear,
            m if m == POLYNOMIAL as f64 => CostModel::Polynomial,
            m => return Err(malformed(format!("unknown cost model {}", m))),
        };
        let n_cost = a[NCOST];
        if n_cost < 0.0 || n_cost.fract() != 0.0 {
            return Err(malformed(format!("invalid NCOST {}", n_cost)));
        }
        let per_cost = match model {
            CostModel::PwLinear => 2,
            CostModel::Polynomial => 1,
        };
        let available = a.len() - COST;
        if n_cost > (available / per_cost) as f64 {
            return Err(malformed(format!(
                "NCOST = {} needs {} cost values, got {}",
                n_cost,
                per_cost as f64 * n_cost,
                available
            )));
        }
        let n = per_cost * n_cost as usize;
        if model == CostModel::PwLinear {
            let p: Vec<f64> = a[COST..COST + n].iter().step_by(2).copied().collect();
            if n_cost < 2.0 || p.windows(2).any(|w| w[0] >= w[1]) {
                return Err(malformed(
                    "piecewise linear cost needs at least 2 increasing breakpoints".to_string(),
                ));
            }
        }

        Ok(Self {
            model,
            startup: a[STARTUP],
            shutdown: a[SHUTDOWN],
            cost: a[COST..COST + n].to_vec(),
        })
    }

    /// Evaluates the cost at output `p`. Piecewise linear costs are
    /// extrapolated from the first and last segments, and are constant
    /// with fewer than two breakpoints.
    pub fn total_cost(&self, p: f64) -> f64 {
        match self.model {
            CostModel::Polynomial => self.cost.iter().fold(0.0, |acc, c| acc * p + c),
            CostModel::PwLinear => {
                let points: Vec<(f64, f64)> =
                    self.cost.chunks_exact(2).map(|c| (c[0], c[1])).collect();
                match points.as_slice() {
                    [] => 0.0,
                    [(_, f0)] => *f0,
                    _ => {
                        let k = points
                            .windows(2)
                            .position(|w| p <= w[1].0)
                            .unwrap_or(points.len() - 2);
                        let ((p0, f0), (p1, f1)) = (points[k], points[k + 1]);
                        f0 + (p - p0) * (f1 - f0) / (p1 - p0)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn polynomial() -> Result<()> {
        // 0.01 p^2 + 40 p + 100
        let c = GenCost::from_row(0, &[2.0, 1500.0, 0.0, 3.0, 0.01, 40.0, 100.0])?;
        assert_eq!(c.model, CostModel::Polynomial);
        assert_eq!(c.n_cost(), 3);
        assert_eq!(c.startup, 1500.0);
        assert!((c.total_cost(100.0) - 4200.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn piecewise_linear() -> Result<()> {
        let c = GenCost::from_row(
            1,
            &[1.0, 0.0, 0.0, 3.0, 0.0, 0.0, 100.0, 2000.0, 200.0, 5000.0],
        )?;
        assert_eq!(c.model, CostModel::PwLinear);
        assert_eq!(c.n_cost(), 3);
        assert!((c.total_cost(50.0) - 1000.0).abs() < 1e-9);
        assert!((c.total_cost(150.0) - 3500.0).abs() < 1e-9);
        assert!((c.total_cost(250.0) - 6500.0).abs() < 1e-9);
        assert!((c.total_cost(-10.0) + 200.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn malformed_rows() {
        // too few coefficients
        assert!(GenCost::from_row(0, &[2.0, 0.0, 0.0, 3.0, 1.0, 2.0]).is_err());
        // unknown model
        assert!(GenCost::from_row(0, &[3.0, 0.0, 0.0, 1.0, 1.0]).is_err());
        // breakpoints out of order
        assert!(GenCost::from_row(0, &[1.0, 0.0, 0.0, 2.0, 10.0, 0.0, 5.0, 1.0]).is_err());
        assert!(GenCost::from_row(0, &[2.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn huge_ncost_is_malformed() {
        for model in [1.0, 2.0] {
            match GenCost::from_row(0, &[model, 0.0, 0.0, 1e20, 1.0]) {
                Err(NetworkError::MalformedRow { table, .. }) => assert_eq!(table, "gencost"),
                other => panic!("expected malformed row, got {:?}", other),
            }
        }
        assert!(GenCost::from_row(0, &[2.0, 0.0, 0.0, f64::INFINITY, 1.0]).is_err());
    }

    #[test]
    fn short_piecewise_linear_cost() {
        let mut c = GenCost {
            model: CostModel::PwLinear,
            startup: 0.0,
            shutdown: 0.0,
            cost: vec![],
        };
        assert_eq!(c.total_cost(10.0), 0.0);
        c.cost = vec![50.0, 700.0];
        assert_eq!(c.total_cost(10.0), 700.0);
    }
}
