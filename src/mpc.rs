use crate::error::{NetworkError, Result};
use crate::idx;
use derive_builder::Builder;
use num_complex::Complex64;

/// Bus is a node in the network graph. Only the quantities that enter
/// the admittance matrix and the initial voltage are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    /// Bus number. Must equal the position of the bus in its table.
    pub bus_i: usize,

    /// Shunt conductance (MW demanded at V = 1.0 p.u.).
    pub gs: f64,

    /// Shunt susceptance (MVAr injected at V = 1.0 p.u.).
    pub bs: f64,

    /// Voltage magnitude (p.u.).
    pub vm: f64,

    /// Voltage angle (degrees).
    pub va: f64,
}

impl Bus {
    /// A bus with no shunt at 1.0 p.u. and zero angle.
    pub fn new(bus_i: usize) -> Self {
        Self {
            bus_i,
            gs: 0.0,
            bs: 0.0,
            vm: 1.0,
            va: 0.0,
        }
    }

    pub fn with_shunt(mut self, gs: f64, bs: f64) -> Self {
        self.gs = gs;
        self.bs = bs;
        self
    }

    /// Shunt admittance in per-unit.
    ///
    /// If Psh is the real power consumed by the shunt at V = 1.0 p.u.
    /// and Qsh is the reactive power injected, then
    /// Psh - j Qsh = conj(Ysh) = Gs - j Bs, i.e. Ysh = (Gs + j Bs) / baseMVA.
    pub fn y_sh(&self, base_mva: f64) -> Complex64 {
        Complex64::new(self.gs, self.bs) / base_mva
    }

    /// Voltage phasor from the magnitude and angle columns.
    pub fn v(&self) -> Complex64 {
        Complex64::from_polar(self.vm, self.va.to_radians())
    }

    /// Reads a bus from a row in MATPOWER column layout.
    pub fn from_row(row: usize, a: &[f64]) -> Result<Self> {
        check_len("bus", row, a, idx::BUS_COLS)?;
        Ok(Self {
            bus_i: index_column("bus", row, a, idx::BUS_I)?,
            gs: finite_column("bus", row, a, idx::GS)?,
            bs: finite_column("bus", row, a, idx::BS)?,
            vm: finite_column("bus", row, a, idx::VM)?,
            va: finite_column("bus", row, a, idx::VA)?,
        })
    }
}

/// Branch represents either a transmission line/cable or a two winding
/// transformer, modelled as a π-equivalent with an ideal phase shifting
/// transformer at the from end.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Branch {
    /// From bus number.
    pub f_bus: usize,

    /// To bus number.
    pub t_bus: usize,

    /// Resistance (p.u.).
    #[builder(default)]
    pub br_r: f64,

    /// Reactance (p.u.).
    #[builder(default)]
    pub br_x: f64,

    /// Total line charging susceptance (p.u.).
    #[builder(default)]
    pub br_b: f64,

    /// In-service status.
    #[builder(default = "true")]
    pub br_status: bool,

    /// Transformer off nominal tap ratio. Zero means no transformer.
    #[builder(default)]
    pub tap: f64,

    /// Transformer phase shift angle (degrees).
    #[builder(default)]
    pub shift: f64,
}

impl BranchBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        let params = [
            ("br_r", self.br_r),
            ("br_x", self.br_x),
            ("br_b", self.br_b),
            ("tap", self.tap),
            ("shift", self.shift),
        ];
        for (name, value) in params {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(format!("{} must be finite, got {}", name, v));
                }
            }
        }
        if let Some(tap) = self.tap {
            if tap < 0.0 {
                return Err(format!("tap must not be negative, got {}", tap));
            }
        }
        Ok(())
    }
}

impl Branch {
    /// Returns a builder for a branch between buses `f_bus` and `t_bus`.
    pub fn new(f_bus: usize, t_bus: usize) -> BranchBuilder {
        BranchBuilder {
            f_bus: Some(f_bus),
            t_bus: Some(t_bus),
            ..Default::default()
        }
    }

    pub fn is_on(&self) -> bool {
        self.br_status
    }

    pub fn is_off(&self) -> bool {
        !self.br_status
    }

    /// Series admittance. Zero for out-of-service branches.
    pub fn y_s(&self) -> Complex64 {
        if self.is_on() {
            Complex64::new(1.0, 0.0) / Complex64::new(self.br_r, self.br_x)
        } else {
            Complex64::default()
        }
    }

    /// Complex tap ratio including the phase shift. The default tap ratio is 1.
    pub fn tap_ratio(&self) -> Complex64 {
        let t = if self.tap == 0.0 { 1.0 } else { self.tap };
        Complex64::from_polar(t, self.shift.to_radians())
    }

    /// Reads a branch from a row in MATPOWER column layout.
    pub fn from_row(row: usize, a: &[f64]) -> Result<Self> {
        check_len("branch", row, a, idx::BRANCH_COLS)?;
        Ok(Self {
            f_bus: index_column("branch", row, a, idx::F_BUS)?,
            t_bus: index_column("branch", row, a, idx::T_BUS)?,
            br_r: finite_column("branch", row, a, idx::BR_R)?,
            br_x: finite_column("branch", row, a, idx::BR_X)?,
            br_b: finite_column("branch", row, a, idx::BR_B)?,
            br_status: finite_column("branch", row, a, idx::BR_STATUS)? != 0.0,
            tap: finite_column("branch", row, a, idx::TAP)?,
            shift: finite_column("branch", row, a, idx::SHIFT)?,
        })
    }
}

fn check_len(table: &'static str, row: usize, a: &[f64], cols: usize) -> Result<()> {
    if a.len() < cols {
        return Err(NetworkError::MalformedRow {
            table,
            row,
            reason: format!("expected at least {} columns, got {}", cols, a.len()),
        });
    }
    Ok(())
}

fn finite_column(table: &'static str, row: usize, a: &[f64], col: usize) -> Result<f64> {
    let v = a[col];
    if !v.is_finite() {
        return Err(NetworkError::MalformedRow {
            table,
            row,
            reason: format!("column {} must be finite, got {}", col, v),
        });
    }
    Ok(v)
}

fn index_column(table: &'static str, row: usize, a: &[f64], col: usize) -> Result<usize> {
    let v = a[col];
    if !v.is_finite() || v < 0.0 || v.fract() != 0.0 {
        return Err(NetworkError::MalformedRow {
            table,
            row,
            reason: format!("column {} must be a non-negative integer, got {}", col, v),
        });
    }
    Ok(v as usize)
}
