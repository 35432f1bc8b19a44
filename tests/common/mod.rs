#![allow(dead_code)]

use fake::Fake;
use rand::Rng;
use rand::rngs::StdRng;
use smallmat::{Matrix3, Matrix4, Vector3, Vector4};
use std::f32::consts::PI;
use tracing_subscriber::EnvFilter;

/// Routes `log` records and `tracing` spans to the test output.
///
/// Set `RUST_LOG=debug` to see singularity and clamping events, or
/// `RUST_LOG=trace` for the inversion spans.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

pub fn random_unit_axis(rng: &mut StdRng) -> Vector3 {
    loop {
        let v = Vector3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        let length = v.length();
        if length > 0.1 && length <= 1.0 {
            return v / length;
        }
    }
}

pub fn random_angle(rng: &mut StdRng) -> f32 {
    (-PI..PI).fake_with_rng(rng)
}

pub fn random_rotation(rng: &mut StdRng) -> Vector4 {
    let axis = random_unit_axis(rng);
    Vector4::from_axis_angle(axis, random_angle(rng))
}

/// Rotation, positive scale and translation composed into one affine matrix
pub fn random_affine(rng: &mut StdRng) -> Matrix4 {
    let scale = Vector3::new(
        rng.random_range(0.5..2.0),
        rng.random_range(0.5..2.0),
        rng.random_range(0.5..2.0),
    );
    let translation = Vector3::new(
        rng.random_range(-10.0..10.0),
        rng.random_range(-10.0..10.0),
        rng.random_range(-10.0..10.0),
    );
    Matrix4::from_rotation_translation(&random_rotation(rng), translation)
        * Matrix4::scale(scale)
}

/// Dense matrix with a dominant diagonal, so it is comfortably invertible
pub fn random_dense4(rng: &mut StdRng) -> Matrix4 {
    let mut m = Matrix4::IDENTITY;
    for row in 0..4 {
        for col in 0..4 {
            let value: f32 = rng.random_range(-1.0..1.0);
            m.set(row, col, if row == col { value + 5.0 } else { value });
        }
    }
    m
}

pub fn random_dense3(rng: &mut StdRng) -> Matrix3 {
    Matrix3::from_matrix4(&random_dense4(rng))
}

pub fn random_array<const N: usize>(rng: &mut StdRng) -> [f32; N] {
    let mut out = [0.0; N];
    for value in out.iter_mut() {
        *value = rng.random_range(-100.0..100.0);
    }
    out
}
