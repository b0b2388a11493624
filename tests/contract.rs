//! Behavior shared by every operation set.

use std::{f64::consts::FRAC_PI_3, ptr};

use gpumath::*;

#[test]
fn operation_sets_are_cached() {
    assert!(ptr::eq(vec2(), vec2()));
    assert!(ptr::eq(mat3(), &apis::<F32>().mat3));
    assert!(ptr::eq(vec4d(), &apis::<F64>().vec4));
    assert!(ptr::eq(quatn(), &apis::<ArrayStorage>().quat));
    assert!(!ptr::eq(
        apis::<F64>() as *const Apis<F64> as *const (),
        apis::<ArrayStorage>() as *const Apis<ArrayStorage> as *const (),
    ));
}

#[test]
fn destination_is_returned_and_matches_allocation() {
    let (m4, v3) = (mat4d(), vec3d());
    let m = m4.axis_rotation(&[1.0, 2.0, 3.0], 0.7, New);

    let mut buf = [0.0; 16];
    let start = buf.as_ptr();
    let out = m4.inverse(&m, &mut buf[..]);
    assert_eq!(out.as_ptr(), start);
    assert_eq!(out, &*m4.inverse(&m, New));

    // Larger destinations are fine; trailing elements are left alone.
    let mut buf = [7.0; 5];
    v3.cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0], &mut buf[..]);
    assert_eq!(buf, [0.0, 0.0, 1.0, 7.0, 7.0]);
}

#[test]
fn storage_selects_container() {
    let a: Box<[f32]> = vec3().create(&[1.0]);
    let b: Box<[f64]> = vec3d().create(&[1.0]);
    let c: Vec<f64> = vec3n().create(&[1.0]);
    assert_eq!(&*a, &[1.0, 0.0, 0.0]);
    assert_eq!(&*b, &[1.0, 0.0, 0.0]);
    assert_eq!(c, [1.0, 0.0, 0.0]);

    // Any slice of the right element type is accepted, regardless of who allocated it.
    assert_eq!(vec3d().dot(&b, &c), 1.0);
    assert_eq!(mat4n().identity(New), mat4d().identity(New).to_vec());
}

#[test]
fn aliasing() {
    let (m3, m4, v2, q) = (mat3d(), mat4d(), vec2d(), quatd());

    let b = m4.translation(&[1.0, 2.0, 3.0], New);
    let mut a = m4.rotation_x(0.3, New);
    let fresh = m4.multiply(&a, &b, New);
    m4.in_place(&mut a, |m4, src, dst| {
        m4.multiply(src, &b, dst);
    });
    assert_eq!(a, fresh);

    let mut a = m3.rotation(0.4, New);
    let fresh = m3.inverse(&a, New);
    m3.in_place(&mut a, |m3, src, dst| {
        m3.inverse(src, dst);
    });
    assert_eq!(a, fresh);

    let mut a = v2.from_values(3.0, 4.0);
    let fresh = v2.add_scaled(&a, &[1.0, 1.0], 2.0, New);
    v2.in_place(&mut a, |v2, src, dst| {
        v2.add_scaled(src, &[1.0, 1.0], 2.0, dst);
    });
    assert_eq!(a, fresh);

    let mut a = q.from_axis_angle(&[0.0, 0.0, 1.0], 0.5, New);
    let b = q.from_axis_angle(&[1.0, 0.0, 0.0], 0.5, New);
    let fresh = q.slerp(&a, &b, 0.25, New);
    q.in_place(&mut a, |q, src, dst| {
        q.slerp(src, &b, 0.25, dst);
    });
    assert_eq!(a, fresh);
}

#[test]
fn algebraic_identities() {
    let (m3, m4, v3) = (mat3d(), mat4d(), vec3d());

    let m = m4.multiply(
        &m4.translation(&[1.0, -2.0, 0.5], New),
        &m4.axis_rotation(&[0.0, 1.0, 1.0], FRAC_PI_3, New),
        New,
    );
    assert_approx_eq!(m4.inverse(&m4.inverse(&m, New), New), m);
    assert_eq!(m4.transpose(&m4.transpose(&m, New), New), m);
    assert_eq!(m4.multiply(&m4.identity(New), &m, New), m);
    assert_eq!(m4.multiply(&m, &m4.identity(New), New), m);

    let m = m3.create(&[2.0, 1.0, 0.0, 0.0, 3.0, 1.0, 1.0, 0.0, 4.0]);
    assert_approx_eq!(m3.inverse(&m3.inverse(&m, New), New), m);
    assert_eq!(m3.transpose(&m3.transpose(&m, New), New), m);
    assert_eq!(m3.multiply(&m3.identity(New), &m, New), m);
    assert_eq!(m3.multiply(&m, &m3.identity(New), New), m);

    let n = v3.normalize(&[3.0, -4.0, 12.0], New);
    assert_approx_eq!(v3.normalize(&n, New), n);
    assert_approx_eq!(v3.length(&n), 1.0);
}

#[test]
fn degenerate_input() {
    assert_eq!(&*vec3().normalize(&[0.0, 0.0, 0.0], New), &[0.0, 0.0, 0.0]);
    assert_eq!(&*quatd().normalize(&[0.0; 4], New), &[0.0; 4]);

    let singular = mat4().create(&[1.0, 2.0, 3.0, 4.0, 2.0, 4.0, 6.0, 8.0]);
    let inv = mat4().inverse(&singular, New);
    assert!(inv.iter().any(|x| !x.is_finite()), "{inv:?}");
}

#[test]
fn partial_mat3_construction() {
    let m = mat3().create(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(
        &*m,
        &[1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
    );
}

#[test]
fn approximate_equality_uses_epsilon() {
    let v2 = vec2d();
    let eps = DEFAULT_EPSILON;
    let _guard = scoped_epsilon(eps);
    assert!(v2.equals_approximately(&[2.0, 3.0], &[2.0 + eps * 0.5, 3.0]));
    assert!(!v2.equals_approximately(&[2.0, 3.0], &[2.001, 3.0]));
    assert!(!v2.equals(&[2.0, 3.0], &[2.0 + eps * 0.5, 3.0]));

    {
        let _guard = scoped_epsilon(0.01);
        assert!(v2.equals_approximately(&[2.0, 3.0], &[2.001, 3.0]));
    }
    assert_eq!(epsilon(), eps);
}

#[test]
fn scalar_helpers() {
    assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
    assert_eq!(lerp(10.0, 20.0, 1.5), 25.0);
    assert_eq!(lerp(10.0, 20.0, -0.5), 5.0);
    assert_eq!(vec2d().lerp(&[10.0, 0.0], &[20.0, 0.0], 1.5, New)[0], 25.0);
}

#[test]
fn infinite_perspective() {
    let m = mat4d().perspective(FRAC_PI_3, 1.5, 0.25, f64::INFINITY, New);
    assert_eq!(m[10], -1.0);
    assert_eq!(m[14], -0.25);
    assert_eq!(m[11], -1.0);
}

#[test]
fn quat_slerp_fixed_point() {
    let q = quat();
    let a = q.normalize(&[0.1, 0.7, -0.2, 0.5], New);
    for t in [0.0, 0.3, 0.9] {
        assert_approx_eq!(q.slerp(&a, &a, t, New), a).abs(1e-6);
    }
}

#[test]
fn rotation_order_errors() {
    let err = "abc".parse::<RotationOrder>().unwrap_err();
    assert_eq!(err, Error::UnknownRotationOrder("abc".into()));
    let order: RotationOrder = "yzx".parse().unwrap();
    assert_eq!(order, RotationOrder::Yzx);
    assert_eq!(order.to_string(), "yzx");
}

#[test]
fn default_storage_switches_every_family() {
    struct Allocate;

    impl ApisVisitor for Allocate {
        type Output = [(StorageKind, usize); 6];

        fn visit<S: Storage>(self, apis: &'static Apis<S>) -> Self::Output {
            let len = |c: S::Container| c.as_ref().len();
            [
                (apis.vec2.storage(), len(apis.vec2.zero(New))),
                (apis.vec3.storage(), len(apis.vec3.zero(New))),
                (apis.vec4.storage(), len(apis.vec4.zero(New))),
                (apis.mat3.storage(), len(apis.mat3.identity(New))),
                (apis.mat4.storage(), len(apis.mat4.identity(New))),
                (apis.quat.storage(), len(apis.quat.identity(New))),
            ]
        }
    }

    let _guard = scoped_default_storage(StorageKind::Array);
    for (i, (kind, len)) in with_default_apis(Allocate).into_iter().enumerate() {
        assert_eq!(kind, StorageKind::Array);
        assert_eq!(len, [2, 3, 4, 12, 16, 4][i]);
    }
}
