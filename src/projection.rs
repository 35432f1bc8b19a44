//! Perspective and orthographic projection builders
//!
//! [`Frustum`] and [`Orthographic`] own their scalar parameters together with
//! the [`Matrix4`] derived from them. Every parameter is clamped into a valid
//! range before it is stored, so the stored values and the matrix always
//! agree. Matrix entries are computed in `f64` and saturate at `±f32::MAX`,
//! so every entry is finite for any clamped parameters.
//!
//! Both produce OpenGL style clip space: right-handed view space looking down
//! `-z`, depth mapped to `[-1, 1]` from `near` to `far`.

use std::f32::consts::{FRAC_PI_4, TAU};

use log::debug;
use tracing::instrument;

use crate::{EPSILON, Matrix4, SquareMatrix};

/// Lower bound for every projection parameter
pub const MIN_PARAMETER: f32 = 1e-10;
/// Upper bound for the vertical field of view, in radians
pub const MAX_FOV: f32 = TAU;
pub const MAX_ASPECT: f32 = 1e10;
/// Upper bound for `near`, `far` and the orthographic `height`
pub const MAX_DISTANCE: f32 = f32::MAX;

/// Clamps `value` into `[min, max]`. NaN becomes `min`.
fn clamp_parameter(name: &str, value: f32, min: f32, max: f32) -> f32 {
    let clamped = if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    };
    if clamped != value {
        debug!("projection {name} {value} clamped to {clamped}");
    }
    clamped
}

/// Distance used as the depth divisor, never zero
fn depth_span(near: f64, far: f64) -> f64 {
    let span = far - near;
    if span == 0.0 { f64::from(EPSILON) } else { span }
}

/// Narrows to `f32`, saturating instead of overflowing to infinity
fn narrow(value: f64) -> f32 {
    value.clamp(-f64::from(f32::MAX), f64::from(f32::MAX)) as f32
}

/// Parameters of a symmetric perspective projection
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrustumParams {
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width divided by height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for FrustumParams {
    fn default() -> Self {
        Self {
            fov: FRAC_PI_4,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl FrustumParams {
    /// The parameters with every value moved into its valid range
    pub fn clamped(self) -> Self {
        let near = clamp_parameter("near", self.near, MIN_PARAMETER, MAX_DISTANCE);
        Self {
            fov: clamp_parameter("fov", self.fov, MIN_PARAMETER, MAX_FOV),
            aspect: clamp_parameter("aspect", self.aspect, MIN_PARAMETER, MAX_ASPECT),
            near,
            far: clamp_parameter("far", self.far, near, MAX_DISTANCE),
        }
    }

    #[instrument(level = "trace")]
    #[rustfmt::skip]
    fn matrix(&self) -> Matrix4 {
        let (near, far) = (f64::from(self.near), f64::from(self.far));
        let f = 1.0 / (f64::from(self.fov) * 0.5).tan();
        let span = depth_span(near, far);
        Matrix4::from_array([
            narrow(f / f64::from(self.aspect)), 0.0, 0.0, 0.0,
            0.0, narrow(f), 0.0, 0.0,
            0.0, 0.0, narrow(-(far + near) / span), -1.0,
            0.0, 0.0, narrow(-2.0 * far * near / span), 0.0,
        ])
    }
}

/// Perspective projection
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "FrustumParams", into = "FrustumParams")
)]
pub struct Frustum {
    params: FrustumParams,
    matrix: Matrix4,
}

impl Default for Frustum {
    fn default() -> Self {
        Self::from_params(FrustumParams::default())
    }
}

impl Frustum {
    /// `fov` is the vertical field of view in radians
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::from_params(FrustumParams {
            fov,
            aspect,
            near,
            far,
        })
    }

    pub fn from_params(params: FrustumParams) -> Self {
        let params = params.clamped();
        Self {
            params,
            matrix: params.matrix(),
        }
    }

    /// The clamped parameters
    pub fn params(&self) -> FrustumParams {
        self.params
    }

    pub fn fov(&self) -> f32 {
        self.params.fov
    }

    pub fn aspect(&self) -> f32 {
        self.params.aspect
    }

    pub fn near(&self) -> f32 {
        self.params.near
    }

    pub fn far(&self) -> f32 {
        self.params.far
    }

    pub fn matrix(&self) -> &Matrix4 {
        &self.matrix
    }

    /// Maps clip space back to view space, `None` if the matrix is singular
    pub fn inverse(&self) -> Option<Matrix4> {
        self.matrix.inverse()
    }

    pub fn set_params(&mut self, params: FrustumParams) {
        *self = Self::from_params(params);
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.set_params(FrustumParams { fov, ..self.params });
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.set_params(FrustumParams {
            aspect,
            ..self.params
        });
    }

    /// Sets both planes at once so `far` is clamped against the new `near`
    pub fn set_depth_range(&mut self, near: f32, far: f32) {
        self.set_params(FrustumParams {
            near,
            far,
            ..self.params
        });
    }
}

impl From<FrustumParams> for Frustum {
    fn from(params: FrustumParams) -> Self {
        Self::from_params(params)
    }
}

impl From<Frustum> for FrustumParams {
    fn from(frustum: Frustum) -> Self {
        frustum.params
    }
}

/// Parameters of a symmetric orthographic projection
///
/// The view box is `height` tall and `height * aspect` wide, centered on the
/// view axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrthographicParams {
    pub height: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrthographicParams {
    fn default() -> Self {
        Self {
            height: 2.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl OrthographicParams {
    pub fn clamped(self) -> Self {
        let near = clamp_parameter("near", self.near, MIN_PARAMETER, MAX_DISTANCE);
        Self {
            height: clamp_parameter("height", self.height, MIN_PARAMETER, MAX_DISTANCE),
            aspect: clamp_parameter("aspect", self.aspect, MIN_PARAMETER, MAX_ASPECT),
            near,
            far: clamp_parameter("far", self.far, near, MAX_DISTANCE),
        }
    }

    #[instrument(level = "trace")]
    #[rustfmt::skip]
    fn matrix(&self) -> Matrix4 {
        let (near, far) = (f64::from(self.near), f64::from(self.far));
        let height = f64::from(self.height);
        let width = height * f64::from(self.aspect);
        let span = depth_span(near, far);
        Matrix4::from_array([
            narrow(2.0 / width), 0.0, 0.0, 0.0,
            0.0, narrow(2.0 / height), 0.0, 0.0,
            0.0, 0.0, narrow(-2.0 / span), 0.0,
            0.0, 0.0, narrow(-(far + near) / span), 1.0,
        ])
    }
}

/// Orthographic projection
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "OrthographicParams", into = "OrthographicParams")
)]
pub struct Orthographic {
    params: OrthographicParams,
    matrix: Matrix4,
}

impl Default for Orthographic {
    fn default() -> Self {
        Self::from_params(OrthographicParams::default())
    }
}

impl Orthographic {
    pub fn new(height: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::from_params(OrthographicParams {
            height,
            aspect,
            near,
            far,
        })
    }

    pub fn from_params(params: OrthographicParams) -> Self {
        let params = params.clamped();
        Self {
            params,
            matrix: params.matrix(),
        }
    }

    pub fn params(&self) -> OrthographicParams {
        self.params
    }

    pub fn height(&self) -> f32 {
        self.params.height
    }

    pub fn aspect(&self) -> f32 {
        self.params.aspect
    }

    pub fn near(&self) -> f32 {
        self.params.near
    }

    pub fn far(&self) -> f32 {
        self.params.far
    }

    pub fn matrix(&self) -> &Matrix4 {
        &self.matrix
    }

    pub fn inverse(&self) -> Option<Matrix4> {
        self.matrix.inverse()
    }

    pub fn set_params(&mut self, params: OrthographicParams) {
        *self = Self::from_params(params);
    }

    pub fn set_height(&mut self, height: f32) {
        self.set_params(OrthographicParams {
            height,
            ..self.params
        });
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.set_params(OrthographicParams {
            aspect,
            ..self.params
        });
    }

    pub fn set_depth_range(&mut self, near: f32, far: f32) {
        self.set_params(OrthographicParams {
            near,
            far,
            ..self.params
        });
    }
}

impl From<OrthographicParams> for Orthographic {
    fn from(params: OrthographicParams) -> Self {
        Self::from_params(params)
    }
}

impl From<Orthographic> for OrthographicParams {
    fn from(orthographic: Orthographic) -> Self {
        orthographic.params
    }
}
