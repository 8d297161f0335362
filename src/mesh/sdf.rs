use crate::mesh::types::{Pt3, Vec3};

/// Signed distance function for a sphere
pub fn sphere_sdf(point: &Pt3, center: &Pt3, radius: f32) -> f32 {
    (point - center).magnitude() - radius
}

/// Signed distance to a plane through `origin` with unit `normal`
/// Positive on the side the normal points to
pub fn plane_sdf(point: &Pt3, origin: &Pt3, normal: &Vec3) -> f32 {
    (point - origin).dot(normal)
}

/// Signed distance function for an axis-aligned box
pub fn box_sdf(point: &Pt3, center: &Pt3, half_extents: &Vec3) -> f32 {
    let p = point - center;
    let q = Vec3::new(
        p.x.abs() - half_extents.x,
        p.y.abs() - half_extents.y,
        p.z.abs() - half_extents.z,
    );

    let outside = Vec3::new(q.x.max(0.0), q.y.max(0.0), q.z.max(0.0)).magnitude();
    let inside = q.x.max(q.y).max(q.z).min(0.0);
    outside + inside
}

/// Implicit disc `r² - x² - y²`: positive inside, zero on the circle
pub fn circle_field(x: f32, y: f32, radius: f32) -> f32 {
    radius * radius - x * x - y * y
}

/// Analytic outward normal of a sphere at `point`
pub fn sphere_normal(point: &Pt3, center: &Pt3) -> Vec3 {
    (point - center).try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_sdf() {
        let c = Pt3::origin();
        assert_relative_eq!(sphere_sdf(&Pt3::new(2.0, 0.0, 0.0), &c, 1.0), 1.0);
        assert_relative_eq!(sphere_sdf(&c, &c, 1.0), -1.0);
    }

    #[test]
    fn test_box_sdf() {
        let c = Pt3::origin();
        let h = Vec3::new(1.0, 1.0, 1.0);
        assert_relative_eq!(box_sdf(&Pt3::new(2.0, 0.0, 0.0), &c, &h), 1.0);
        assert_relative_eq!(box_sdf(&c, &c, &h), -1.0);
        assert_relative_eq!(box_sdf(&Pt3::new(2.0, 2.0, 1.0), &c, &h), 2.0_f32.sqrt());
    }

    #[test]
    fn test_plane_and_circle() {
        let n = Vec3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(plane_sdf(&Pt3::new(3.0, 1.0, 2.5), &Pt3::new(0.0, 0.0, 2.0), &n), 0.5);
        assert_relative_eq!(circle_field(3.0, 4.0, 5.0), 0.0);
        assert!(circle_field(0.0, 0.0, 5.0) > 0.0);
    }
}
