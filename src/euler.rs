//! Euler angle conversion for rotation matrices
//!
//! Angles are a [`Vector3`] of radians around the x, y and z axes. Only the
//! two orderings used by camera-style rotations are supported, both with the
//! x rotation in the middle:
//!
//! | order | matrix |
//! |-------|--------|
//! | [`EulerOrder::Yxz`] | `Ry · Rx · Rz` |
//! | [`EulerOrder::Zxy`] | `Rz · Rx · Ry` |
//!
//! Extraction recovers `x` with `asin`. When `|sin x|` reaches
//! [`GIMBAL_LOCK_THRESHOLD`] the y and z axes line up and only their combined
//! rotation is observable: `Yxz` then reports `z = 0`, `Zxy` reports `y = 0`,
//! and the other angle carries the whole rotation.

use log::debug;

use crate::{Matrix3, Matrix4, Vector3};

/// `|sin x|` at or above which extraction treats the rotation as gimbal locked
pub const GIMBAL_LOCK_THRESHOLD: f32 = 0.999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EulerOrder {
    /// Yaw, pitch, roll: `Ry · Rx · Rz`
    Yxz,
    /// `Rz · Rx · Ry`
    Zxy,
}

impl Matrix3 {
    /// Rotation matrix for `angles` (radians around x, y, z) composed in `order`
    pub fn from_euler(angles: Vector3, order: EulerOrder) -> Self {
        let rx = Matrix3::rotation_x(angles.x);
        let ry = Matrix3::rotation_y(angles.y);
        let rz = Matrix3::rotation_z(angles.z);
        match order {
            EulerOrder::Yxz => ry * rx * rz,
            EulerOrder::Zxy => rz * rx * ry,
        }
    }

    /// Recovers the angles of a pure rotation matrix composed in `order`.
    ///
    /// The `asin` argument is clamped to `[-1, 1]` first, so slightly
    /// denormalized input cannot produce NaN.
    pub fn to_euler(&self, order: EulerOrder) -> Vector3 {
        match order {
            EulerOrder::Yxz => {
                let sin_x = (-self.n12()).clamp(-1.0, 1.0);
                let x = sin_x.asin();
                if sin_x.abs() < GIMBAL_LOCK_THRESHOLD {
                    Vector3::new(
                        x,
                        self.n02().atan2(self.n22()),
                        self.n10().atan2(self.n11()),
                    )
                } else {
                    debug!("gimbal lock in YXZ extraction, fixing z to 0");
                    Vector3::new(x, (-self.n20()).atan2(self.n00()), 0.0)
                }
            }
            EulerOrder::Zxy => {
                let sin_x = self.n21().clamp(-1.0, 1.0);
                let x = sin_x.asin();
                if sin_x.abs() < GIMBAL_LOCK_THRESHOLD {
                    Vector3::new(
                        x,
                        (-self.n20()).atan2(self.n22()),
                        (-self.n01()).atan2(self.n11()),
                    )
                } else {
                    debug!("gimbal lock in ZXY extraction, fixing y to 0");
                    Vector3::new(x, 0.0, self.n10().atan2(self.n00()))
                }
            }
        }
    }
}

impl Matrix4 {
    /// Rotation matrix for `angles` composed in `order`, with no translation
    pub fn from_euler(angles: Vector3, order: EulerOrder) -> Self {
        Self::from_matrix3(&Matrix3::from_euler(angles, order))
    }

    /// Euler angles of the upper-left 3x3 rotation, see [`Matrix3::to_euler`]
    pub fn to_euler(&self, order: EulerOrder) -> Vector3 {
        Matrix3::from_matrix4(self).to_euler(order)
    }
}
