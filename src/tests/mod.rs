//! Shared fixtures and assertions for unit tests.

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use num_complex::Complex64;
use sparsetools::csr::CSR;

use crate::mpc::{Branch, Bus};

/// Expands `a` to a dense row-major matrix.
pub(crate) fn dense(a: &CSR<usize, Complex64>) -> Vec<Vec<Complex64>> {
    a.to_coo().to_dense()
}

/// Asserts `|actual - expected| <= rel_tol * max(|expected|, 1)`.
pub(crate) fn assert_close(actual: Complex64, expected: Complex64, rel_tol: f64) {
    let scale = expected.norm().max(1.0);
    assert!(
        (actual - expected).norm() <= rel_tol * scale,
        "expected {}, got {}",
        expected,
        actual
    );
}

/// Three buses without shunts: a line 0-1 and a phase shifting
/// transformer 1-2 (tap 1.02, shift 5 degrees).
pub(crate) fn case3() -> Result<(f64, Vec<Bus>, Vec<Branch>)> {
    let bus = (0..3).map(Bus::new).collect();
    let branch = vec![
        Branch::new(0, 1).br_r(0.02).br_x(0.06).tap(1.0).build()?,
        Branch::new(1, 2)
            .br_r(0.03)
            .br_x(0.09)
            .tap(1.02)
            .shift(5.0)
            .build()?,
    ];
    Ok((100.0, bus, branch))
}

/// Two buses joined by `n` identical branches.
pub(crate) fn network_pair(n: usize) -> Result<(Vec<Bus>, Vec<Branch>)> {
    let bus = vec![Bus::new(0), Bus::new(1)];
    let branch = (0..n)
        .map(|_| {
            Branch::new(0, 1)
                .br_r(0.01)
                .br_x(0.05)
                .br_b(0.02)
                .tap(0.97)
                .shift(-2.0)
                .build()
        })
        .collect::<Result<Vec<Branch>, _>>()?;
    Ok((bus, branch))
}

pub(crate) fn casedata_dir() -> Result<PathBuf> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")?;
    Ok(PathBuf::from(manifest_dir).join("casedata"))
}
