use num_complex::Complex64;
use num_traits::Zero;
use sparsetools::csr::{CCSR, CSR};

use crate::debug::format_polar_vec;
use crate::error::{NetworkError, Result};
use crate::math::{find_non_finite, J};

fn check_dims(y_bus: &CSR<usize, Complex64>, v: &[Complex64]) -> Result<()> {
    if y_bus.rows() != y_bus.cols() {
        return Err(NetworkError::Dimension(format!(
            "Ybus must be square, got {}x{}",
            y_bus.rows(),
            y_bus.cols()
        )));
    }
    if y_bus.rows() != v.len() {
        return Err(NetworkError::Dimension(format!(
            "Ybus is {}x{} but V has {} elements",
            y_bus.rows(),
            y_bus.cols(),
            v.len()
        )));
    }
    if let Some(bus) = find_non_finite(v) {
        return Err(NetworkError::NonFiniteVoltage { bus });
    }
    Ok(())
}

/// Computes the vector of complex bus power injections `S = V .* conj(Ybus * V)`
/// in per-unit.
pub fn s_bus(y_bus: &CSR<usize, Complex64>, v: &[Complex64]) -> Result<Vec<Complex64>> {
    check_dims(y_bus, v)?;

    let i_bus = y_bus * v;
    Ok(v.iter().zip(i_bus).map(|(v, i)| v * i.conj()).collect())
}

/// Computes partial derivatives of power injection w.r.t. voltage
/// magnitude and voltage angle.
///
/// Returns `(dS_dVm, dS_dVa)`, the partial derivatives of the complex bus
/// power injections w.r.t voltage magnitude and voltage angle respectively
/// (for all buses). With `S = diag(V) * conj(Ibus)`:
///
/// ```txt
/// dS/dVm = diag(V) * conj(Ybus * diag(V./abs(V))) + conj(diag(Ibus)) * diag(V./abs(V))
/// dS/dVa = j * diag(V) * conj(diag(Ibus) - Ybus * diag(V))
/// ```
///
/// Every voltage must have a non-zero magnitude.
pub fn d_sbus_d_v(
    y_bus: &CSR<usize, Complex64>,
    v: &[Complex64],
) -> Result<(CSR<usize, Complex64>, CSR<usize, Complex64>)> {
    check_dims(y_bus, v)?;
    if let Some(bus) = v.iter().position(|v| v.is_zero()) {
        return Err(NetworkError::ZeroVoltage { bus });
    }
    log::debug!("V: {}", format_polar_vec(v));

    let i_bus = y_bus * v;

    let diag_v = CSR::<usize, Complex64>::with_diagonal(v.to_vec());
    let diag_i_bus = CSR::<usize, Complex64>::with_diagonal(i_bus);

    let v_norm = v
        .iter()
        .map(|v| v / Complex64::new(v.norm(), 0.0))
        .collect();
    let diag_v_norm = CSR::<usize, Complex64>::with_diagonal(v_norm);

    let mut d_sbus_d_vm =
        &diag_v * (y_bus * &diag_v_norm).conj() + diag_i_bus.conj() * &diag_v_norm;
    let mut d_sbus_d_va = &diag_v * (&diag_i_bus - y_bus * &diag_v).conj() * J;

    d_sbus_d_vm.sort_indexes();
    d_sbus_d_va.sort_indexes();

    Ok((d_sbus_d_vm, d_sbus_d_va))
}

/// Computes partial derivatives of power injection w.r.t. the real and
/// imaginary parts of the voltage.
///
/// Returns `(dS_dVr, dS_dVi)`:
///
/// ```txt
/// dS/dVr = conj(diag(Ibus)) + diag(V) * conj(Ybus)
/// dS/dVi = j * (conj(diag(Ibus)) - diag(V) * conj(Ybus))
/// ```
pub fn d_sbus_d_v_cart(
    y_bus: &CSR<usize, Complex64>,
    v: &[Complex64],
) -> Result<(CSR<usize, Complex64>, CSR<usize, Complex64>)> {
    check_dims(y_bus, v)?;
    log::debug!("V: {}", format_polar_vec(v));

    let i_bus = y_bus * v;

    let diag_v = CSR::<usize, Complex64>::with_diagonal(v.to_vec());
    let diag_i_bus = CSR::<usize, Complex64>::with_diagonal(i_bus);

    let mut d_sbus_d_vr = diag_i_bus.conj() + &diag_v * y_bus.conj();
    let mut d_sbus_d_vi = (diag_i_bus.conj() - &diag_v * y_bus.conj()) * J;

    d_sbus_d_vr.sort_indexes();
    d_sbus_d_vi.sort_indexes();

    Ok((d_sbus_d_vr, d_sbus_d_vi))
}
