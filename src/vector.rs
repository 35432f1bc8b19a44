//! Fixed-size vectors.
//!
//! Every vector is `#[repr(C)]` so its memory layout equals the flat
//! `[f32; N]` array used by [`from_slice`](Vector3::from_slice) and by
//! serialization. [`Vector4`] doubles as the quaternion type, see
//! [`crate::quaternion`].

use std::fmt::{Display, Formatter};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::storage::impl_flat_storage;

/// 2-component vector
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(test, derive(fake::Dummy))]
#[repr(C)]
pub struct Vector2 {
    #[cfg_attr(test, dummy(faker = "-10.0..10.0"))]
    pub x: f32,
    #[cfg_attr(test, dummy(faker = "-10.0..10.0"))]
    pub y: f32,
}

/// 3-component vector
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(test, derive(fake::Dummy))]
#[repr(C)]
pub struct Vector3 {
    #[cfg_attr(test, dummy(faker = "-10.0..10.0"))]
    pub x: f32,
    #[cfg_attr(test, dummy(faker = "-10.0..10.0"))]
    pub y: f32,
    #[cfg_attr(test, dummy(faker = "-10.0..10.0"))]
    pub z: f32,
}

/// 4-component vector, also used as an `(x, y, z, w)` quaternion
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(test, derive(fake::Dummy))]
#[repr(C)]
pub struct Vector4 {
    #[cfg_attr(test, dummy(faker = "-10.0..10.0"))]
    pub x: f32,
    #[cfg_attr(test, dummy(faker = "-10.0..10.0"))]
    pub y: f32,
    #[cfg_attr(test, dummy(faker = "-10.0..10.0"))]
    pub z: f32,
    #[cfg_attr(test, dummy(faker = "-10.0..10.0"))]
    pub w: f32,
}

impl_flat_storage!(Vector2, 2, Vector2::ZERO, "the zero vector");
impl_flat_storage!(Vector3, 3, Vector3::ZERO, "the zero vector");
impl_flat_storage!(
    Vector4,
    4,
    Vector4::IDENTITY_QUATERNION,
    "the identity quaternion"
);

/// Component-wise arithmetic shared by all vector sizes.
macro_rules! impl_vector_ops {
    ($ty:ident { $($field:ident),+ }) => {
        impl $ty {
            pub const ZERO: $ty = $ty { $($field: 0.0),+ };

            /// Vector with every component set to `value`
            pub const fn splat(value: f32) -> Self {
                Self { $($field: value),+ }
            }

            /// Multiplies every component by `s` in place
            pub fn scale(&mut self, s: f32) {
                $(self.$field *= s;)+
            }

            pub fn dot(&self, other: &Self) -> f32 {
                0.0 $(+ self.$field * other.$field)+
            }

            pub fn length_squared(&self) -> f32 {
                self.dot(self)
            }

            pub fn length(&self) -> f32 {
                self.length_squared().sqrt()
            }

            pub fn distance(&self, other: &Self) -> f32 {
                (*other - *self).length()
            }

            /// Scales to unit length. A zero vector stays zero.
            pub fn normalize(&mut self) {
                let len = self.length();
                if len > 0.0 {
                    let inv_len = 1.0 / len;
                    $(self.$field *= inv_len;)+
                }
            }

            pub fn normalized(mut self) -> Self {
                self.normalize();
                self
            }

            /// Linear interpolation, `t = 0` yields `self` and `t = 1` yields `to`
            pub fn lerp(&self, to: &Self, t: f32) -> Self {
                Self { $($field: self.$field + (to.$field - self.$field) * t),+ }
            }

            /// Whether every component is within `tolerance` of `other`'s
            pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
                true $(&& (self.$field - other.$field).abs() <= tolerance)+
            }
        }

        impl Add for $ty {
            type Output = Self;
            fn add(self, other: Self) -> Self {
                Self { $($field: self.$field + other.$field),+ }
            }
        }

        impl Sub for $ty {
            type Output = Self;
            fn sub(self, other: Self) -> Self {
                Self { $($field: self.$field - other.$field),+ }
            }
        }

        /// Component-wise product
        impl Mul for $ty {
            type Output = Self;
            fn mul(self, other: Self) -> Self {
                Self { $($field: self.$field * other.$field),+ }
            }
        }

        impl Mul<f32> for $ty {
            type Output = Self;
            fn mul(self, s: f32) -> Self {
                Self { $($field: self.$field * s),+ }
            }
        }

        /// Component-wise quotient
        impl Div for $ty {
            type Output = Self;
            fn div(self, other: Self) -> Self {
                Self { $($field: self.$field / other.$field),+ }
            }
        }

        impl Div<f32> for $ty {
            type Output = Self;
            fn div(self, s: f32) -> Self {
                Self { $($field: self.$field / s),+ }
            }
        }

        impl Neg for $ty {
            type Output = Self;
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl AddAssign for $ty {
            fn add_assign(&mut self, other: Self) {
                $(self.$field += other.$field;)+
            }
        }

        impl SubAssign for $ty {
            fn sub_assign(&mut self, other: Self) {
                $(self.$field -= other.$field;)+
            }
        }

        impl MulAssign for $ty {
            fn mul_assign(&mut self, other: Self) {
                $(self.$field *= other.$field;)+
            }
        }

        impl MulAssign<f32> for $ty {
            fn mul_assign(&mut self, s: f32) {
                $(self.$field *= s;)+
            }
        }

        impl DivAssign for $ty {
            fn div_assign(&mut self, other: Self) {
                $(self.$field /= other.$field;)+
            }
        }

        impl DivAssign<f32> for $ty {
            fn div_assign(&mut self, s: f32) {
                $(self.$field /= s;)+
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                let parts = [$(self.$field.to_string()),+];
                write!(f, "({})", parts.join(", "))
            }
        }
    };
}

impl_vector_ops!(Vector2 { x, y });
impl_vector_ops!(Vector3 { x, y, z });
impl_vector_ops!(Vector4 { x, y, z, w });

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn from_array([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }

    pub const fn to_array(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// The z component of the 3D cross product of two vectors in the xy plane
    pub fn cross(&self, other: &Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub const fn extend(&self, z: f32) -> Vector3 {
        Vector3::new(self.x, self.y, z)
    }
}

impl Vector3 {
    pub const UNIT_X: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Vector3 = Vector3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn from_array([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }

    pub const fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub const fn xy(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub const fn extend(&self, w: f32) -> Vector4 {
        Vector4::new(self.x, self.y, self.z, w)
    }
}

impl Vector4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn from_array([x, y, z, w]: [f32; 4]) -> Self {
        Self { x, y, z, w }
    }

    pub const fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    pub const fn xyz(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}
