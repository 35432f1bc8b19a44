mod common;

use common::{
    init_logging, random_affine, random_angle, random_array, random_dense3, random_dense4,
    random_rotation,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallmat::{
    EulerOrder, MathError, Matrix2, Matrix3, Matrix4, SquareMatrix, Vector3, Vector4,
};
use std::f32::consts::FRAC_PI_2;

const ROUNDS: usize = 200;

fn relative_close(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn inverse_round_trip_all_algorithms() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..ROUNDS {
        let m = random_dense4(&mut rng);
        let adjoint = m.inverse().unwrap();
        let gauss_jordan = m.inverse_gauss_jordan().unwrap();
        assert!((m * adjoint).is_identity(1e-4), "{m}");
        assert!((adjoint * m).is_identity(1e-4), "{m}");
        assert!((m * gauss_jordan).is_identity(1e-4), "{m}");
        assert!(adjoint.approx_eq(&gauss_jordan, 1e-4), "{adjoint} vs {gauss_jordan}");

        let a = random_affine(&mut rng);
        let affine = a.inverse_affine().unwrap();
        assert!((a * affine).is_identity(1e-4), "{a}");
        assert!(affine.approx_eq(&a.inverse().unwrap(), 1e-4));
        assert!(affine.approx_eq(&a.inverse_gauss_jordan().unwrap(), 1e-4));
    }
}

#[test]
fn inverse_round_trip_small_matrices() {
    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..ROUNDS {
        let m3 = random_dense3(&mut rng);
        assert!((m3 * m3.inverse().unwrap()).is_identity(1e-5), "{m3}");

        let m2 = Matrix2::new(
            rng.random_range(4.0..6.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(4.0..6.0),
        );
        assert!((m2.inverse().unwrap() * m2).is_identity(1e-5), "{m2}");
    }
}

#[test]
fn determinant_is_multiplicative() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..ROUNDS {
        let a = random_dense4(&mut rng);
        let b = random_dense4(&mut rng);
        let product = a.determinant() * b.determinant();
        assert!(relative_close((a * b).determinant(), product, 1e-4));

        let a = random_dense3(&mut rng);
        let b = random_dense3(&mut rng);
        let product = a.determinant() * b.determinant();
        assert!(relative_close((a * b).determinant(), product, 1e-4));
    }
}

#[test]
fn determinant_of_inverse_is_reciprocal() {
    let mut rng = StdRng::seed_from_u64(14);
    for _ in 0..ROUNDS {
        let m = random_dense4(&mut rng);
        let inv = m.inverse().unwrap();
        assert!(relative_close(m.determinant() * inv.determinant(), 1.0, 1e-4));
    }
}

#[test]
fn transpose_is_an_involution() {
    let mut rng = StdRng::seed_from_u64(15);
    for _ in 0..ROUNDS {
        let m4 = Matrix4::from_array(random_array(&mut rng));
        assert_eq!(m4.transposed().transposed(), m4);

        let dense = random_dense4(&mut rng);
        assert!(relative_close(dense.transposed().determinant(), dense.determinant(), 1e-4));

        let m3 = Matrix3::from_array(random_array(&mut rng));
        assert_eq!(m3.transposed().transposed(), m3);

        let m2 = Matrix2::from_array(random_array(&mut rng));
        assert_eq!(m2.transposed().transposed(), m2);
    }
}

#[test]
fn singular_matrices_leave_target_unchanged() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(16);
    for round in 0..ROUNDS {
        let zeroed = round % 4;
        let mut values = random_array::<16>(&mut rng);
        let original = if round % 2 == 0 {
            // zero column
            values[zeroed * 4..zeroed * 4 + 4].fill(0.0);
            Matrix4::from_array(values)
        } else {
            // zero row
            for col in 0..4 {
                values[col * 4 + zeroed] = 0.0;
            }
            Matrix4::from_array(values)
        };
        assert_eq!(original.determinant(), 0.0, "{original}");

        let mut m = original;
        assert!(m.invert().unwrap_err().is_singular());
        assert_eq!(m, original);
        assert!(m.invert_gauss_jordan().unwrap_err().is_singular());
        assert_eq!(m, original);
        assert_eq!(m.inverse(), None);
        assert_eq!(m.inverse_gauss_jordan(), None);

        let mut m3 = Matrix3::from_matrix4(&original);
        let before = m3;
        if zeroed < 3 {
            assert!(m3.invert().is_err());
            assert_eq!(m3, before);
        }
    }
}

#[test]
fn proportional_rows_are_singular() {
    let original = Matrix4::new(
        1.0, 2.0, 3.0, 4.0, //
        2.0, 4.0, 6.0, 8.0, //
        0.0, 1.0, 5.0, 2.0, //
        7.0, 0.0, 1.0, 3.0,
    );
    assert_eq!(original.determinant(), 0.0);
    let mut m = original;
    assert!(matches!(m.invert(), Err(MathError::Singular { .. })));
    assert_eq!(m, original);
    assert!(matches!(
        m.invert_gauss_jordan(),
        Err(MathError::ZeroPivot { column: 3, .. })
    ));
    assert_eq!(m, original);
    assert_eq!(m.inverse_gauss_jordan(), None);
}

#[test]
fn rotation_quaternion_round_trip() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..ROUNDS {
        let q = random_rotation(&mut rng);
        let m = Matrix3::from_quaternion(&q);
        assert!((m.determinant() - 1.0).abs() < 1e-5);
        assert!((m * m.transposed()).is_identity(1e-5));

        let back = Vector4::from_matrix3(&m);
        assert!((back.length() - 1.0).abs() < 1e-5);
        assert!(
            back.approx_eq(&q, 1e-5) || back.approx_eq(&-q, 1e-5),
            "{q} came back as {back}"
        );
        assert!(Matrix3::from_quaternion(&back).approx_eq(&m, 1e-5));

        let m4 = Matrix4::from_rotation_translation(&q, Vector3::new(1.0, -2.0, 3.0));
        let back4 = Vector4::from_matrix4(&m4);
        assert!(back4.approx_eq(&q, 1e-5) || back4.approx_eq(&-q, 1e-5));
    }
}

#[test]
fn quaternion_and_matrix_rotate_the_same() {
    let mut rng = StdRng::seed_from_u64(18);
    for _ in 0..ROUNDS {
        let q = random_rotation(&mut rng);
        let v = Vector3::new(
            rng.random_range(-5.0..5.0),
            rng.random_range(-5.0..5.0),
            rng.random_range(-5.0..5.0),
        );
        let by_matrix = Matrix3::from_quaternion(&q) * v;
        assert!(q.rotate_vector(v).approx_eq(&by_matrix, 1e-4));
    }
}

#[test]
fn euler_round_trip_through_matrix4() {
    let mut rng = StdRng::seed_from_u64(19);
    for order in [EulerOrder::Yxz, EulerOrder::Zxy] {
        for _ in 0..ROUNDS {
            let angles = Vector3::new(
                rng.random_range(-1.3..1.3),
                random_angle(&mut rng) * 0.95,
                random_angle(&mut rng) * 0.95,
            );
            let m = Matrix4::from_euler(angles, order);
            assert!(m.to_euler(order).approx_eq(&angles, 1e-5), "{order:?} {angles}");

            // same rotation through a quaternion
            let q = Vector4::from_matrix4(&m);
            let again = Matrix3::from_quaternion(&q).to_euler(order);
            assert!(again.approx_eq(&angles, 1e-4), "{order:?} {angles} vs {again}");
        }
    }
}

#[test]
fn euler_gimbal_lock_is_stable() {
    for order in [EulerOrder::Yxz, EulerOrder::Zxy] {
        for x in [FRAC_PI_2, -FRAC_PI_2] {
            let m = Matrix3::from_euler(Vector3::new(x, 0.4, -0.3), order);
            let angles = m.to_euler(order);
            assert!(angles.x.is_finite() && angles.y.is_finite() && angles.z.is_finite());
            assert!(Matrix3::from_euler(angles, order).approx_eq(&m, 1e-5));
        }
    }
}

#[test]
fn translation_scenario() {
    let m = Matrix4::translation(Vector3::new(1.0, 2.0, 3.0));
    let expected = Matrix4::translation(Vector3::new(-1.0, -2.0, -3.0));
    assert_eq!(m.inverse(), Some(expected));
    assert_eq!(m.inverse_gauss_jordan(), Some(expected));
    assert_eq!(m.inverse_affine(), Some(expected));
}

#[test]
fn quarter_turn_quaternion_scenario() {
    let q = Vector4::from_matrix3(&Matrix3::rotation_z(FRAC_PI_2));
    let half = std::f32::consts::FRAC_1_SQRT_2;
    assert!(q.approx_eq(&Vector4::new(0.0, 0.0, half, half), 1e-6), "{q}");
}

#[test]
fn vector_cross_is_orthogonal() {
    let mut rng = StdRng::seed_from_u64(20);
    for _ in 0..ROUNDS {
        let a = Vector3::from_array(random_array(&mut rng));
        let b = Vector3::from_array(random_array(&mut rng));
        let c = a.cross(&b);
        let scale = (a.length() * b.length() * (a.length() + b.length())).max(1.0);
        assert!(c.dot(&a).abs() <= 1e-5 * scale);
        assert!(c.dot(&b).abs() <= 1e-5 * scale);
        assert_eq!(a.cross(&b), -b.cross(&a));
    }
}
