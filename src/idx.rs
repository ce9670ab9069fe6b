//! Column indices of the bus and branch tables in MATPOWER row layout
//! (0-based). Only the columns read by this crate are named.

// Bus //

pub const BUS_I: usize = 0; // bus number
pub const BUS_TYPE: usize = 1; // PQ = 1, PV = 2, REF = 3, NONE = 4
pub const GS: usize = 4; // shunt conductance (MW demanded at V = 1.0 p.u.)
pub const BS: usize = 5; // shunt susceptance (MVAr injected at V = 1.0 p.u.)
pub const VM: usize = 7; // voltage magnitude (p.u.)
pub const VA: usize = 8; // voltage angle (degrees)

/// Minimum number of columns in a bus row.
pub const BUS_COLS: usize = VA + 1;

// Branch //

pub const F_BUS: usize = 0; // from bus number
pub const T_BUS: usize = 1; // to bus number
pub const BR_R: usize = 2; // resistance (p.u.)
pub const BR_X: usize = 3; // reactance (p.u.)
pub const BR_B: usize = 4; // total line charging susceptance (p.u.)
pub const TAP: usize = 8; // off nominal turns ratio, 0 for lines
pub const SHIFT: usize = 9; // phase shift angle (degrees)
pub const BR_STATUS: usize = 10; // 1 - in service, 0 - out of service

/// Minimum number of columns in a branch row.
pub const BRANCH_COLS: usize = BR_STATUS + 1;
