use strata_geom::{Aabb, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_constants() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::UP, Vec3::new(0.0, 1.0, 0.0), 1e-6));
    assert_eq!(Vec3::splat(2.5), Vec3::new(2.5, 2.5, 2.5));
}

#[test]
fn vec3_add_sub_scale() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq(c - a, b, 1e-6));

    let mut v = Vec3::new(1.0, 1.0, 1.0);
    v += Vec3::new(2.0, 3.0, 4.0);
    v -= Vec3::new(1.0, 2.0, 3.0);
    assert!(vec3_approx_eq(v, Vec3::new(2.0, 2.0, 2.0), 1e-6));
    assert!(vec3_approx_eq(v * 2.0 / 4.0, Vec3::new(1.0, 1.0, 1.0), 1e-6));
}

#[test]
fn vec3_cross_basis_and_normalize() {
    let i = Vec3::new(1.0, 0.0, 0.0);
    let j = Vec3::new(0.0, 1.0, 0.0);
    let k = Vec3::new(0.0, 0.0, 1.0);
    assert!(vec3_approx_eq(i.cross(j), k, 1e-6));
    assert!(vec3_approx_eq(j.cross(k), i, 1e-6));
    assert!(vec3_approx_eq(k.cross(i), j, 1e-6));

    let v = Vec3::new(3.0, 4.0, 0.0);
    assert!(approx_eq(v.length(), 5.0, 1e-6));
    assert!(vec3_approx_eq(v.normalized(), Vec3::new(0.6, 0.8, 0.0), 1e-6));
    // Zero stays zero instead of turning into NaN
    assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
}

#[test]
fn vec3_array_conversions() {
    let v: Vec3 = [1.0, -2.0, 3.5].into();
    assert_eq!(v, Vec3::new(1.0, -2.0, 3.5));
    let a: [f32; 3] = v.into();
    assert_eq!(a, [1.0, -2.0, 3.5]);
}

#[test]
fn aabb_empty_then_include() {
    let mut bb = Aabb::empty();
    assert!(bb.is_empty());
    assert_eq!(bb.size(), Vec3::ZERO);

    bb.include(Vec3::new(1.0, 2.0, 3.0));
    assert!(!bb.is_empty());
    assert_eq!(bb.min, bb.max);

    bb.include(Vec3::new(-1.0, 5.0, 0.0));
    assert!(vec3_approx_eq(bb.min, Vec3::new(-1.0, 2.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(bb.max, Vec3::new(1.0, 5.0, 3.0), 1e-6));
    assert!(vec3_approx_eq(bb.size(), Vec3::new(2.0, 3.0, 3.0), 1e-6));
}

#[test]
fn aabb_translate_keeps_empty() {
    let e = Aabb::empty().translated(Vec3::new(5.0, 5.0, 5.0));
    assert!(e.is_empty());
    let b = Aabb::new(Vec3::ZERO, Vec3::splat(1.0)).translated(Vec3::new(16.0, 0.0, -16.0));
    assert_eq!(b.min, Vec3::new(16.0, 0.0, -16.0));
    assert_eq!(b.max, Vec3::new(17.0, 1.0, -15.0));
}
