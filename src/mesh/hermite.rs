use nalgebra::Matrix3;
use tracing::trace;

use crate::mesh::types::Vec3;

/// Pull toward the mass point used by the least-squares solve.
/// Keeps flat and edge-like configurations from drifting along their free directions.
const LEAST_SQUARES_BIAS: f32 = 0.05;

/// Edge crossings of one cell paired with the field gradient at each.
/// Positions are cell-local, in `[0, 1]³`.
#[derive(Debug, Clone, Default)]
pub struct HermiteData {
    pub points: Vec<Vec3>,
    pub gradients: Vec<Vec3>,
}

impl HermiteData {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            gradients: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, point: Vec3, gradient: Vec3) {
        self.points.push(point);
        self.gradients.push(gradient);
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.gradients.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean of the crossing points.
    pub fn mass_point(&self) -> Option<Vec3> {
        if self.points.is_empty() {
            return None;
        }
        let sum: Vec3 = self.points.iter().sum();
        Some(sum / self.points.len() as f32)
    }

    /// Damped mass-point relaxation.
    ///
    /// Starts at the mass point and repeatedly pushes the candidate toward every
    /// crossing's tangent plane, with damping falling linearly from 1 to 0 over
    /// `max_iterations`. Stops early once the force magnitude drops below
    /// `threshold`. Returns `None` for a cell without crossings.
    pub fn relax(&self, max_iterations: usize, threshold: f32) -> Option<Vec3> {
        let mut c = self.mass_point()?;
        let count = self.points.len() as f32;
        let threshold_sq = threshold * threshold;

        for i in 0..max_iterations {
            let mut force = Vec3::zeros();
            for (point, normal) in self.points.iter().zip(&self.gradients) {
                force -= normal * normal.dot(&(c - point));
            }

            let damping = 1.0 - i as f32 / max_iterations as f32;
            c += force * damping / count;

            if force.norm_squared() < threshold_sq {
                return Some(c);
            }
        }

        trace!(
            crossings = self.points.len(),
            max_iterations,
            "Mass-point relaxation hit iteration cap"
        );
        Some(c)
    }

    /// Minimizes `Σ (n·(x - p))²` plus a small pull toward the mass point,
    /// by solving the 3×3 normal equations. Falls back to the mass point if
    /// the system can't be factored.
    pub fn solve_least_squares(&self) -> Option<Vec3> {
        let mass = self.mass_point()?;

        let mut ata = Matrix3::<f32>::identity() * LEAST_SQUARES_BIAS;
        let mut atb = mass * LEAST_SQUARES_BIAS;
        for (point, normal) in self.points.iter().zip(&self.gradients) {
            ata += normal * normal.transpose();
            atb += normal * normal.dot(point);
        }

        Some(ata.cholesky().map(|c| c.solve(&atb)).unwrap_or(mass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Two perpendicular planes x = 0.7 and y = 0.3 meeting inside the cell.
    fn crease() -> HermiteData {
        let mut data = HermiteData::with_capacity(4);
        data.push(Vec3::new(0.7, 0.0, 0.5), Vec3::x());
        data.push(Vec3::new(0.7, 1.0, 0.5), Vec3::x());
        data.push(Vec3::new(0.0, 0.3, 0.5), Vec3::y());
        data.push(Vec3::new(1.0, 0.3, 0.5), Vec3::y());
        data
    }

    #[test]
    fn test_empty() {
        let data = HermiteData::default();
        assert!(data.is_empty());
        assert!(data.mass_point().is_none());
        assert!(data.relax(50, 1e-5).is_none());
        assert!(data.solve_least_squares().is_none());
    }

    #[test]
    fn test_mass_point() {
        let mass = crease().mass_point().unwrap();
        assert_relative_eq!(mass, Vec3::new(0.6, 0.4, 0.5), epsilon = 1e-6);
    }

    #[test]
    fn test_flat_stays_put() {
        let mut data = HermiteData::default();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            data.push(Vec3::new(x, y, 0.25), Vec3::z());
        }
        let v = data.relax(50, 1e-5).unwrap();
        assert_relative_eq!(v, Vec3::new(0.5, 0.5, 0.25), epsilon = 1e-6);
    }

    #[test]
    fn test_relax_finds_crease() {
        let v = crease().relax(50, 1e-5).unwrap();
        assert_relative_eq!(v.x, 0.7, epsilon = 1e-3);
        assert_relative_eq!(v.y, 0.3, epsilon = 1e-3);
        assert_relative_eq!(v.z, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_relax_respects_iteration_cap() {
        // Zero iterations leaves the mass point.
        let v = crease().relax(0, 1e-5).unwrap();
        assert_relative_eq!(v, Vec3::new(0.6, 0.4, 0.5), epsilon = 1e-6);
    }

    #[test]
    fn test_least_squares_finds_crease() {
        let v = crease().solve_least_squares().unwrap();
        assert_relative_eq!(v.x, 0.7, epsilon = 1e-2);
        assert_relative_eq!(v.y, 0.3, epsilon = 1e-2);
        assert_relative_eq!(v.z, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_clear() {
        let mut data = crease();
        assert_eq!(data.len(), 4);
        data.clear();
        assert!(data.is_empty());
    }
}
