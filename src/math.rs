use num_complex::Complex64;

/// The imaginary unit.
pub const J: Complex64 = Complex64 { re: 0.0, im: 1.0 };

/// Index of the first element that is not finite, if any.
pub(crate) fn find_non_finite(v: &[Complex64]) -> Option<usize> {
    v.iter().position(|z| !z.is_finite())
}
