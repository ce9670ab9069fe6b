use num_complex::Complex64;
use pretty_dtoa::{dtoa, FmtFloatConfig};
use sparsetools::csr::CSR;

const FLOAT_CONFIG: FmtFloatConfig = FmtFloatConfig::default()
    .add_point_zero(false)
    .max_significant_digits(9);

pub fn format_f64_vec(v: &[f64]) -> String {
    let a: Vec<String> = v.iter().map(|f| dtoa(*f, FLOAT_CONFIG)).collect();
    format!("[{}]", a.join(", "))
}

pub fn format_complex(z: &Complex64) -> String {
    format!(
        "{}{}j{}",
        dtoa(z.re, FLOAT_CONFIG),
        if z.im.is_sign_negative() { "-" } else { "+" },
        dtoa(z.im.abs(), FLOAT_CONFIG)
    )
}

pub fn format_rect_vec(v: &[Complex64]) -> String {
    let a: Vec<String> = v.iter().map(format_complex).collect();
    format!("[{}]", a.join(", "))
}

pub fn format_polar(z: &Complex64) -> String {
    format!(
        "{}\u{2220}{}\u{00B0}",
        dtoa(z.norm(), FLOAT_CONFIG),
        dtoa(z.arg().to_degrees(), FLOAT_CONFIG)
    )
}

pub fn format_polar_vec(v: &[Complex64]) -> String {
    let a: Vec<String> = v.iter().map(format_polar).collect();
    format!("[{}]", a.join(", "))
}

/// Lists the stored entries of `a` as `(row, col) value` lines in row order.
pub fn format_triplets(a: &CSR<usize, Complex64>, polar: bool) -> String {
    let (rowptr, colidx, values) = (a.rowptr(), a.colidx(), a.values());
    let mut lines = Vec::with_capacity(values.len());
    for i in 0..a.rows() {
        for k in rowptr[i]..rowptr[i + 1] {
            let z = &values[k];
            let value = if polar {
                format_polar(z)
            } else {
                format_complex(z)
            };
            lines.push(format!("({}, {}) {}", i, colidx[k], value));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats() {
        assert_eq!(format_f64_vec(&[1.0, 0.5]), "[1, 0.5]");
        assert_eq!(format_complex(&Complex64::new(1.0, -2.0)), "1-j2");
        assert_eq!(
            format_rect_vec(&[Complex64::new(0.5, 0.25)]),
            "[0.5+j0.25]"
        );
        assert!(format_polar(&Complex64::new(0.0, 2.0)).starts_with("2\u{2220}"));
    }
}
