//! Flat-array construction shared by every vector and matrix type.
//!
//! All types in this crate are a fixed number of `f32` components laid out
//! contiguously. Validation of foreign input happens in exactly one place,
//! `from_slice`, which the in-place `reset`, the strict `TryFrom<&[f32]>` and
//! deserialization all funnel through.

/// Implements slice/array conversions, `Default` and (with the `serde`
/// feature) flat-sequence serialization for a type.
///
/// Assumes the type provides:
/// - `const fn from_array([f32; LEN]) -> Self`
/// - `fn to_array(&self) -> [f32; LEN]`
///
/// `$default` is the canonical value substituted for malformed input.
macro_rules! impl_flat_storage {
    ($ty:ident, $len:expr, $default:expr, $default_name:literal) => {
        impl $ty {
            /// Number of `f32` components in the flat representation.
            pub const LEN: usize = $len;

            /// Builds a value from a slice of exactly [`Self::LEN`] components.
            ///
            /// Any other length yields the canonical default instead of an error.
            pub fn from_slice(src: &[f32]) -> Self {
                match <[f32; $len]>::try_from(src) {
                    Ok(array) => Self::from_array(array),
                    Err(_) => {
                        log::warn!(
                            "{} expects {} components, got {}; using {}",
                            stringify!($ty),
                            $len,
                            src.len(),
                            $default_name
                        );
                        $default
                    }
                }
            }

            /// Redefines `self` in place, with the same validation as [`Self::from_slice`].
            pub fn reset(&mut self, src: &[f32]) {
                *self = Self::from_slice(src);
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                $default
            }
        }

        impl TryFrom<&[f32]> for $ty {
            type Error = $crate::MathError;

            fn try_from(src: &[f32]) -> Result<Self, Self::Error> {
                <[f32; $len]>::try_from(src)
                    .map(Self::from_array)
                    .map_err(|_| $crate::MathError::WrongLength {
                        expected: $len,
                        actual: src.len(),
                    })
            }
        }

        impl From<[f32; $len]> for $ty {
            fn from(array: [f32; $len]) -> Self {
                Self::from_array(array)
            }
        }

        impl From<$ty> for [f32; $len] {
            fn from(value: $ty) -> Self {
                value.to_array()
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_seq(self.to_array())
            }
        }

        /// Deserializes from a flat sequence; a sequence of the wrong length
        /// falls back to the default like [`Self::from_slice`].
        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let values = <Vec<f32> as serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from_slice(&values))
            }
        }
    };
}

pub(crate) use impl_flat_storage;
