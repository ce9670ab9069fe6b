use num_complex::Complex64;
use sparsetools::csr::CSR;

use crate::error::{NetworkError, Result};
use crate::math::find_non_finite;
use crate::mpc::Branch;

/// Computes the complex power injected into each branch at its "from" and
/// "to" ends, in MVA. Out-of-service branches carry no flow.
pub fn branch_flows(
    base_mva: f64,
    branch: &[Branch],
    y_f: &CSR<usize, Complex64>,
    y_t: &CSR<usize, Complex64>,
    v: &[Complex64],
) -> Result<(Vec<Complex64>, Vec<Complex64>)> {
    let (nl, nb) = (branch.len(), v.len());
    for (name, y) in [("Yf", y_f), ("Yt", y_t)] {
        if y.rows() != nl || y.cols() != nb {
            return Err(NetworkError::Dimension(format!(
                "{} is {}x{}, expected {}x{}",
                name,
                y.rows(),
                y.cols(),
                nl,
                nb
            )));
        }
    }
    if let Some(bus) = find_non_finite(v) {
        return Err(NetworkError::NonFiniteVoltage { bus });
    }
    if let Some((l, br)) = branch
        .iter()
        .enumerate()
        .find(|(_, br)| br.f_bus >= nb || br.t_bus >= nb)
    {
        let bus = if br.f_bus >= nb { br.f_bus } else { br.t_bus };
        return Err(NetworkError::BusOutOfRange { branch: l, bus, nb });
    }

    let i_f = y_f * v;
    let i_t = y_t * v;

    let mut s_f = vec![Complex64::default(); nl];
    let mut s_t = vec![Complex64::default(); nl];
    for (l, br) in branch.iter().enumerate().filter(|(_, br)| br.is_on()) {
        s_f[l] = v[br.f_bus] * i_f[l].conj() * base_mva;
        s_t[l] = v[br.t_bus] * i_t[l].conj() * base_mva;
    }
    Ok((s_f, s_t))
}
