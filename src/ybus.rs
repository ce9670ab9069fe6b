use num_complex::Complex64;
use sparsetools::csr::CSR;
use sparsetools::dok::DoK;

use crate::debug::format_rect_vec;
use crate::error::{NetworkError, Result};
use crate::math::J;
use crate::mpc::{Branch, Bus};

/// Adds `v` to element (i, j). Entries that sum to exactly zero are removed.
fn add(a: &mut DoK<usize, Complex64>, i: usize, j: usize, v: Complex64) -> Result<()> {
    a.add(i, j, v).map_err(|err| NetworkError::Dimension(err.to_string()))
}

/// Checks that a case can be indexed consistently before any matrix is
/// built from it.
pub fn check_case(base_mva: f64, bus: &[Bus], branch: &[Branch]) -> Result<()> {
    if !base_mva.is_finite() || base_mva <= 0.0 {
        return Err(NetworkError::InvalidBaseMva(base_mva));
    }

    let nb = bus.len();
    if let Some((row, b)) = bus.iter().enumerate().find(|(i, b)| b.bus_i != *i) {
        return Err(NetworkError::BusOrder {
            row,
            bus_i: b.bus_i,
        });
    }

    for (l, br) in branch.iter().enumerate() {
        for bus in [br.f_bus, br.t_bus] {
            if bus >= nb {
                return Err(NetworkError::BusOutOfRange { branch: l, bus, nb });
            }
        }
        if br.is_on() && br.br_r == 0.0 && br.br_x == 0.0 {
            return Err(NetworkError::ZeroImpedance {
                branch: l,
                f_bus: br.f_bus,
                t_bus: br.t_bus,
            });
        }
    }
    Ok(())
}

/// Builds the bus admittance matrix and branch admittance matrices.
///
/// Returns the full bus admittance matrix (i.e. for all buses) and the
/// matrices `Yf` and `Yt` which, when multiplied by a complex voltage
/// vector, yield the vector of currents injected into each branch from
/// the "from" and "to" buses respectively. Shunts are converted to
/// per-unit using `base_mva`.
///
/// Bus numbers must equal their position in `bus` (i.e. internal ordering).
pub fn make_ybus(
    base_mva: f64,
    bus: &[Bus],
    branch: &[Branch],
) -> Result<(
    CSR<usize, Complex64>,
    CSR<usize, Complex64>,
    CSR<usize, Complex64>,
)> {
    check_case(base_mva, bus, branch)?;

    let nb = bus.len();
    let nl = branch.len();
    log::debug!("building Ybus: {} buses, {} branches", nb, nl);

    // For each branch, compute the elements of the branch admittance matrix where:
    //
    //      | If |   | Yff  Yft |   | Vf |
    //      |    | = |          | * |    |
    //      | It |   | Ytf  Ytt |   | Vt |
    let mut y_bus = DoK::new(nb, nb);
    let mut y_f = DoK::new(nl, nb);
    let mut y_t = DoK::new(nl, nb);

    for (l, br) in branch.iter().enumerate() {
        let y_s = br.y_s(); // series admittance
        let b_c = if br.is_on() { br.br_b } else { 0.0 }; // line charging susceptance
        let tap = br.tap_ratio();

        let y_tt = y_s + J * (b_c / 2.0);
        let y_ff = y_tt / (tap * tap.conj());
        let y_ft = -y_s / tap.conj();
        let y_tf = -y_s / tap;

        // Impedances or taps small enough to underflow leave NaN or inf here.
        if [y_s, y_ff, y_ft, y_tf, y_tt].iter().any(|y| !y.is_finite()) {
            return Err(NetworkError::NonFiniteAdmittance {
                branch: l,
                f_bus: br.f_bus,
                t_bus: br.t_bus,
            });
        }

        let (f, t) = (br.f_bus, br.t_bus);

        add(&mut y_f, l, f, y_ff)?;
        add(&mut y_f, l, t, y_ft)?;

        add(&mut y_t, l, f, y_tf)?;
        add(&mut y_t, l, t, y_tt)?;

        // Cf' * Yf + Ct' * Yt
        add(&mut y_bus, f, f, y_ff)?;
        add(&mut y_bus, f, t, y_ft)?;
        add(&mut y_bus, t, f, y_tf)?;
        add(&mut y_bus, t, t, y_tt)?;
    }

    let y_sh: Vec<Complex64> = bus.iter().map(|b| b.y_sh(base_mva)).collect();
    log::trace!("Ysh: {}", format_rect_vec(&y_sh));

    for (i, y) in y_sh.into_iter().enumerate() {
        if !y.is_finite() {
            return Err(NetworkError::NonFiniteShunt { bus: i });
        }
        add(&mut y_bus, i, i, y)?;
    }

    Ok((y_bus.to_csr(), y_f.to_csr(), y_t.to_csr()))
}
