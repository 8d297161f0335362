//! End-to-end checks through the public API.
//!
//! Grids are built by the caller, bound with `setup`, extracted, and the
//! output is checked against the geometry the field describes.

use std::cell::Cell;

use approx::assert_relative_eq;
use isocontour::mesh::sdf::{box_sdf, circle_field, sphere_sdf};
use isocontour::{
    ContourError, ContourParams, DualContourParams, Grid2, Grid3, PlanarContourExtractor, Pt3,
    ScalarGrid2, ScalarGrid3, Vec3, VertexSolver, VolumeDualContourExtractor,
};

/// Caller-side storage that isn't one of the crate's grids.
struct Checkerboard {
    n: usize,
}

impl Grid2 for Checkerboard {
    fn dims(&self) -> [usize; 2] {
        [self.n, self.n]
    }

    fn get(&self, x: usize, y: usize) -> f32 {
        ((x + y) % 2) as f32
    }
}

#[test]
fn custom_grid_storage() {
    let grid = Checkerboard { n: 5 };
    let ms = PlanarContourExtractor::setup(4, &grid).unwrap();
    let params = ContourParams::default();

    // Every cell is a saddle: two corner triangles and two segments each.
    let mesh = ms.extract_filled_binary(&params);
    assert_eq!(mesh.triangle_count(), 16 * 2);
    assert_eq!(ms.extract_lines_binary(&params).len(), 16 * 2);
}

/// Volume that counts its reads through interior mutability.
struct CountingPlane {
    n: usize,
    reads: Cell<usize>,
}

impl Grid3 for CountingPlane {
    fn dims(&self) -> [usize; 3] {
        [self.n; 3]
    }

    fn get(&self, _: usize, _: usize, z: usize) -> f32 {
        self.reads.set(self.reads.get() + 1);
        z as f32 - 1.5
    }
}

#[test]
fn custom_volume_with_interior_mutability() {
    let grid = CountingPlane {
        n: 4,
        reads: Cell::new(0),
    };
    let dc = VolumeDualContourExtractor::setup(3, &grid).unwrap();
    let mesh = dc.extract(&DualContourParams::default().with_size(3.0));

    // Interior edges crossing z = 1.5 form a 2x2 patch.
    assert_eq!(mesh.quad_count(), 4);
    assert!(grid.reads.get() > 0);
}

#[test]
fn setup_errors_surface_at_the_boundary() {
    let grid = ScalarGrid2::new(8).unwrap();
    assert!(matches!(
        PlanarContourExtractor::setup(4, &grid),
        Err(ContourError::DimensionMismatch { .. })
    ));

    let volume = ScalarGrid3::new(8).unwrap();
    assert!(VolumeDualContourExtractor::setup(8, &volume).is_ok());
    assert_eq!(
        VolumeDualContourExtractor::setup(0, &volume).unwrap_err(),
        ContourError::ZeroResolution
    );
}

#[test]
fn disc_outline_scales_with_size_and_origin() {
    let res = 20;
    let radius = 6.3;
    let grid = ScalarGrid2::from_fn(res, |x, y| {
        circle_field(x as f32 - 10.0, y as f32 - 10.0, radius)
    })
    .unwrap();
    let ms = PlanarContourExtractor::setup(res, &grid).unwrap();

    let base = ContourParams::default().with_threshold(0.0).with_size(res as f32);
    let moved = base
        .clone()
        .with_size(res as f32 * 0.5)
        .with_origin(Vec3::new(-3.0, 7.0, 1.0));

    let a = ms.extract_lines_interpolated(&base);
    let b = ms.extract_lines_interpolated(&moved);
    assert_eq!(a.len(), b.len());

    for (sa, sb) in a.iter().zip(&b) {
        let expected = Pt3::new(sa.start.x * 0.5 - 3.0, sa.start.y * 0.5 + 7.0, 1.0);
        assert_relative_eq!(sb.start, expected, epsilon = 1e-4);
    }

    // Interpolated outline length approximates the circumference.
    let length: f32 = a.iter().map(|s| s.length()).sum();
    let circumference = 2.0 * std::f32::consts::PI * radius;
    assert!((length - circumference).abs() / circumference < 0.03);
}

#[test]
fn filled_and_lines_agree_on_boundary_cells() {
    let grid = ScalarGrid2::from_fn(12, |x, y| {
        circle_field(x as f32 - 6.0, y as f32 - 5.5, 4.1)
    })
    .unwrap();
    let ms = PlanarContourExtractor::setup(12, &grid).unwrap();
    let params = ContourParams::default().with_threshold(0.0);

    let mesh = ms.extract_filled_binary(&params);
    let lines = ms.extract_lines_binary(&params);

    // Without solid fill only boundary cells produce triangles, and each
    // non-saddle boundary cell produces exactly one segment.
    assert!(!mesh.is_empty());
    assert!(!lines.is_empty());
    assert!(mesh.triangle_count() >= lines.len());
}

#[test]
fn dual_contouring_box_triangulates() {
    let res = 12;
    let grid = ScalarGrid3::from_fn(res, |x, y, z| {
        box_sdf(
            &Pt3::new(x as f32, y as f32, z as f32),
            &Pt3::new(6.0, 6.0, 6.0),
            &Vec3::new(3.3, 2.7, 3.6),
        )
    })
    .unwrap();
    let dc = VolumeDualContourExtractor::setup(res, &grid).unwrap();
    let quads = dc.extract(&DualContourParams::default().with_size(res as f32));

    assert_eq!(quads.vertex_count(), res * res * res);
    assert!(quads.quad_count() > 0);

    let mesh = quads.triangulate();
    assert_eq!(mesh.triangle_count(), quads.quad_count() * 2);

    // Closed surface: surface area is close to the box's.
    let expected = 2.0 * (6.6 * 5.4 + 6.6 * 7.2 + 5.4 * 7.2);
    let area = mesh.area();
    assert!((area - expected).abs() / expected < 0.15, "area {area}");

    let normals = mesh.compute_normals();
    assert_eq!(normals.len(), mesh.vertex_count());
}

#[test]
fn dual_contouring_sphere_solvers_agree() {
    let res = 14;
    let center = Pt3::new(7.0, 7.0, 7.0);
    let grid = ScalarGrid3::from_fn(res, |x, y, z| {
        sphere_sdf(&Pt3::new(x as f32, y as f32, z as f32), &center, 4.6)
    })
    .unwrap();
    let dc = VolumeDualContourExtractor::setup(res, &grid).unwrap();

    let params = DualContourParams::default().with_size(res as f32);
    let relaxed = dc.extract(&params);
    let solved = dc.extract(&params.clone().with_solver(VertexSolver::LeastSquares));

    // Topology depends only on the samples.
    assert_eq!(relaxed.quads, solved.quads);

    for quad in &relaxed.quads {
        for &i in quad {
            let a = relaxed.vertices[i as usize];
            let b = solved.vertices[i as usize];
            assert!((a - b).magnitude() < 0.5);
        }
    }
}

#[test]
fn mesh_bytes_match_counts() {
    let grid = ScalarGrid2::from_fn(4, |x, _| x as f32).unwrap();
    let ms = PlanarContourExtractor::setup(4, &grid).unwrap();
    let mesh = ms.extract_filled_interpolated(&ContourParams::default().with_threshold(1.5));

    let bytes = mesh.to_bytes();
    let vertex_len = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
    let index_len = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
    assert_eq!(vertex_len, mesh.vertex_count() * 12);
    assert_eq!(index_len, mesh.indices.len() * 4);
    assert_eq!(bytes.len(), 8 + vertex_len + index_len);
}
