use strata_geom::Vec3;

/// Densities closer than this are treated as equal.
pub const INTERP_EPSILON: f64 = 1e-5;

/// Point where the isosurface crosses the edge `p1 -> p2`.
///
/// Linear in `mu = (isolevel - val1) / (val2 - val1)`, with fixed
/// tie-breaks: an endpoint sitting on the isolevel is returned exactly
/// (`p1` first), and a flat edge (`val1 ≈ val2`) returns `p1`.
#[inline]
pub fn vertex_interp(isolevel: f64, p1: Vec3, p2: Vec3, val1: f64, val2: f64) -> Vec3 {
    if (isolevel - val1).abs() < INTERP_EPSILON {
        return p1;
    }
    if (isolevel - val2).abs() < INTERP_EPSILON {
        return p2;
    }
    if (val1 - val2).abs() < INTERP_EPSILON {
        // Can yield a zero-length edge in flat regions; kept as-is.
        return p1;
    }
    let mu = (isolevel - val1) / (val2 - val1);
    let d = p2 - p1;
    Vec3::new(
        (f64::from(p1.x) + mu * f64::from(d.x)) as f32,
        (f64::from(p1.y) + mu * f64::from(d.y)) as f32,
        (f64::from(p1.z) + mu * f64::from(d.z)) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_on_even_split() {
        let p = vertex_interp(
            5.0,
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            0.0,
            10.0,
        );
        assert_eq!(p, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn endpoint_on_isolevel_is_returned_exactly() {
        let p1 = Vec3::new(0.3, 1.7, -2.0);
        let p2 = Vec3::new(1.3, 1.7, -2.0);
        assert_eq!(vertex_interp(5.0, p1, p2, 5.0, 9.0), p1);
        assert_eq!(vertex_interp(5.0, p1, p2, 1.0, 5.0), p2);
        // p1 wins when both ends sit on the isolevel.
        assert_eq!(vertex_interp(5.0, p1, p2, 5.0, 5.0), p1);
    }

    #[test]
    fn flat_edge_falls_back_to_p1() {
        let p1 = Vec3::new(0.0, 0.0, 0.0);
        let p2 = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(vertex_interp(5.0, p1, p2, 7.0, 7.0 + 1e-7), p1);
    }

    #[test]
    fn fraction_follows_densities() {
        let p = vertex_interp(
            5.0,
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            0.0,
            20.0,
        );
        assert_eq!(p, Vec3::new(1.0, 0.0, 0.0));
        // Reversed edge direction mirrors the fraction.
        let q = vertex_interp(
            5.0,
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            20.0,
            0.0,
        );
        assert_eq!(q, Vec3::new(1.0, 0.0, 0.0));
    }
}
