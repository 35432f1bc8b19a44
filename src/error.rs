use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure of a kernel operation.
///
/// Inversion failures are reported as values, never as panics. The target of an
/// in-place inversion is left untouched whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    /// The determinant magnitude fell below [`crate::EPSILON`] or was NaN/infinite.
    Singular { determinant: f32 },
    /// Gauss-Jordan elimination found no pivot of usable magnitude in `column`.
    ZeroPivot { column: usize, pivot: f32 },
    /// Gauss-Jordan or affine inversion was given a NaN or infinite entry.
    NonFinite { row: usize, column: usize, value: f32 },
    /// A strict slice conversion received the wrong number of components.
    WrongLength { expected: usize, actual: usize },
}

impl MathError {
    /// Whether this error reports a (near-)singular matrix, whichever algorithm detected it.
    pub fn is_singular(&self) -> bool {
        matches!(
            self,
            MathError::Singular { .. } | MathError::ZeroPivot { .. }
        )
    }
}

impl Error for MathError {}

impl Display for MathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MathError::Singular { determinant } => {
                write!(f, "matrix is singular (determinant {determinant})")
            }
            MathError::ZeroPivot { column, pivot } => {
                write!(f, "matrix is singular (pivot {pivot} in column {column})")
            }
            MathError::NonFinite { row, column, value } => {
                write!(f, "matrix entry ({row}, {column}) is {value}")
            }
            MathError::WrongLength { expected, actual } => {
                write!(f, "expected {expected} components, got {actual}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display() {
        let err = MathError::WrongLength {
            expected: 16,
            actual: 9,
        };
        assert_eq!(err.to_string(), "expected 16 components, got 9");
        let err = MathError::ZeroPivot {
            column: 2,
            pivot: 0.0,
        };
        assert_eq!(err.to_string(), "matrix is singular (pivot 0 in column 2)");
        let err = MathError::NonFinite {
            row: 1,
            column: 3,
            value: f32::INFINITY,
        };
        assert_eq!(err.to_string(), "matrix entry (1, 3) is inf");
    }

    #[test]
    fn test_is_singular() {
        assert!(MathError::Singular { determinant: 0.0 }.is_singular());
        assert!(
            MathError::ZeroPivot {
                column: 0,
                pivot: 0.0
            }
            .is_singular()
        );
        assert!(
            !MathError::WrongLength {
                expected: 4,
                actual: 3
            }
            .is_singular()
        );
        assert!(
            !MathError::NonFinite {
                row: 0,
                column: 0,
                value: f32::NAN
            }
            .is_singular()
        );
    }
}
