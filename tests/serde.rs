#![cfg(feature = "serde")]

mod common;

use common::init_logging;
use pretty_assertions::assert_eq;
use smallmat::projection::{MAX_FOV, MIN_PARAMETER};
use smallmat::{
    Frustum, FrustumParams, Matrix2, Matrix3, Matrix4, Orthographic, Vector2, Vector3, Vector4,
};
use testresult::TestResult;

#[test]
fn vectors_serialize_as_flat_arrays() -> TestResult {
    let json = serde_json::to_string(&Vector3::new(1.0, -2.5, 0.0))?;
    assert_eq!(json, "[1.0,-2.5,0.0]");
    let v: Vector2 = serde_json::from_str("[3.0, 4.0]")?;
    assert_eq!(v, Vector2::new(3.0, 4.0));
    Ok(())
}

#[test]
fn matrices_serialize_column_major() -> TestResult {
    let m = Matrix2::new(1.0, 2.0, 3.0, 4.0);
    let json = serde_json::to_string(&m)?;
    assert_eq!(json, "[1.0,3.0,2.0,4.0]");
    let back: Matrix2 = serde_json::from_str(&json)?;
    assert_eq!(back, m);

    let m = Matrix4::translation(Vector3::new(5.0, 6.0, 7.0));
    let back: Matrix4 = serde_json::from_str(&serde_json::to_string(&m)?)?;
    assert_eq!(back, m);
    Ok(())
}

#[test]
fn wrong_length_falls_back_to_default() -> TestResult {
    init_logging();
    let m: Matrix3 = serde_json::from_str("[1.0, 2.0, 3.0]")?;
    assert_eq!(m, Matrix3::IDENTITY);
    let v: Vector3 = serde_json::from_str("[]")?;
    assert_eq!(v, Vector3::ZERO);
    let q: Vector4 = serde_json::from_str("[1.0, 2.0, 3.0, 4.0, 5.0]")?;
    assert_eq!(q, Vector4::IDENTITY_QUATERNION);
    Ok(())
}

#[test]
fn non_numeric_input_is_still_an_error() {
    let result: Result<Vector3, _> = serde_json::from_str(r#"["a", "b", "c"]"#);
    assert!(result.is_err());
}

#[test]
fn frustum_serializes_its_parameters() -> TestResult {
    let frustum = Frustum::new(1.0, 1.5, 0.5, 100.0);
    let json = serde_json::to_string(&frustum)?;
    assert_eq!(json, r#"{"fov":1.0,"aspect":1.5,"near":0.5,"far":100.0}"#);
    let back: Frustum = serde_json::from_str(&json)?;
    assert_eq!(back, frustum);
    Ok(())
}

#[test]
fn deserialized_projection_is_clamped() -> TestResult {
    init_logging();
    let frustum: Frustum =
        serde_json::from_str(r#"{"fov": 20.0, "aspect": 2.0, "near": -1.0, "far": -5.0}"#)?;
    assert_eq!(
        frustum.params(),
        FrustumParams {
            fov: MAX_FOV,
            aspect: 2.0,
            near: MIN_PARAMETER,
            far: MIN_PARAMETER,
        }
    );
    assert_eq!(*frustum.matrix(), *Frustum::from_params(frustum.params()).matrix());
    assert!(frustum.matrix().as_array().iter().all(|v| v.is_finite()));

    let ortho: Orthographic =
        serde_json::from_str(r#"{"height": 4.0, "aspect": 2.0, "near": 9.0, "far": 1.0}"#)?;
    assert_eq!(ortho.far(), 9.0);
    assert_eq!(*ortho.matrix(), *Orthographic::new(4.0, 2.0, 9.0, 9.0).matrix());
    Ok(())
}
