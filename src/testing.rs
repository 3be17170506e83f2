//! Geometry shared by tests in several modules

use nalgebra::Point3;

/// Axis-aligned cube with outward-facing, counter-clockwise triangles, with
/// one corner at the origin
pub fn cube(side: f64) -> Vec<[Point3<f64>; 3]> {
    let s = side;
    let v = |x: f64, y: f64, z: f64| Point3::new(x * s, y * s, z * s);
    let quads = [
        // -z                                       +z
        [v(0.,0.,0.), v(0.,1.,0.), v(1.,1.,0.), v(1.,0.,0.)],
        [v(0.,0.,1.), v(1.,0.,1.), v(1.,1.,1.), v(0.,1.,1.)],
        // -y                                       +y
        [v(0.,0.,0.), v(1.,0.,0.), v(1.,0.,1.), v(0.,0.,1.)],
        [v(0.,1.,0.), v(0.,1.,1.), v(1.,1.,1.), v(1.,1.,0.)],
        // -x                                       +x
        [v(0.,0.,0.), v(0.,0.,1.), v(0.,1.,1.), v(0.,1.,0.)],
        [v(1.,0.,0.), v(1.,1.,0.), v(1.,1.,1.), v(1.,0.,1.)],
    ];
    quads.into_iter()
        .flat_map(|[p, q, r, s]| [[p, q, r], [p, r, s]])
        .collect()
}
