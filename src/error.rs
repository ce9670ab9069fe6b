use thiserror::Error;

/// Classifies a [`NetworkError`] by what the caller has to fix.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ErrorKind {
    /// The case data is inconsistent (ordering, indexing, shape).
    DataIntegrity,
    /// The data is consistent but a quantity makes the closed-form
    /// expressions undefined or not finite (zero impedance, zero voltage).
    Numerical,
}

/// Errors from building network matrices.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum NetworkError {
    #[error("base MVA must be positive and finite, got {0}")]
    InvalidBaseMva(f64),

    #[error("bus at row {row} has number {bus_i}: buses must appear in order by bus number")]
    BusOrder { row: usize, bus_i: usize },

    #[error("branch {branch} references bus {bus} but there are only {nb} buses")]
    BusOutOfRange { branch: usize, bus: usize, nb: usize },

    #[error("{table} row {row}: {reason}")]
    MalformedRow {
        table: &'static str,
        row: usize,
        reason: String,
    },

    #[error("dimension mismatch: {0}")]
    Dimension(String),

    #[error("branch {branch} ({f_bus} -> {t_bus}) is in service with zero series impedance")]
    ZeroImpedance {
        branch: usize,
        f_bus: usize,
        t_bus: usize,
    },

    #[error("branch {branch} ({f_bus} -> {t_bus}) has a non-finite admittance")]
    NonFiniteAdmittance {
        branch: usize,
        f_bus: usize,
        t_bus: usize,
    },

    #[error("shunt admittance at bus {bus} is not finite")]
    NonFiniteShunt { bus: usize },

    #[error("voltage at bus {bus} has zero magnitude")]
    ZeroVoltage { bus: usize },

    #[error("voltage at bus {bus} is not finite")]
    NonFiniteVoltage { bus: usize },
}

impl NetworkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NetworkError::InvalidBaseMva(_)
            | NetworkError::BusOrder { .. }
            | NetworkError::BusOutOfRange { .. }
            | NetworkError::MalformedRow { .. }
            | NetworkError::Dimension(_) => ErrorKind::DataIntegrity,
            NetworkError::ZeroImpedance { .. }
            | NetworkError::NonFiniteAdmittance { .. }
            | NetworkError::NonFiniteShunt { .. }
            | NetworkError::ZeroVoltage { .. }
            | NetworkError::NonFiniteVoltage { .. } => ErrorKind::Numerical,
        }
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds() {
        assert_eq!(
            NetworkError::BusOrder { row: 1, bus_i: 2 }.kind(),
            ErrorKind::DataIntegrity
        );
        assert_eq!(
            NetworkError::ZeroVoltage { bus: 0 }.kind(),
            ErrorKind::Numerical
        );
        assert_eq!(
            NetworkError::NonFiniteShunt { bus: 2 }.kind(),
            ErrorKind::Numerical
        );
        assert_eq!(
            NetworkError::ZeroImpedance {
                branch: 3,
                f_bus: 0,
                t_bus: 1
            }
            .to_string(),
            "branch 3 (0 -> 1) is in service with zero series impedance"
        );
    }
}
