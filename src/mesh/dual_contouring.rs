use tracing::debug;

use crate::error::{check_dims, ContourResult};
use crate::mesh::grid_trait::Grid3;
use crate::mesh::hermite::HermiteData;
use crate::mesh::params::{DualContourParams, VertexSolver};
use crate::mesh::scalar_grid::ScalarGrid3;
use crate::mesh::types::{Pt3, QuadMesh, Vec3};

/*  Local offsets of the 8 cell corners
 *
 *  y         z
 *  ^        /
 *  |
 *    7----6
 *   /|   /|
 *  3----2 |
 *  | 4--|-5
 *  |/   |/
 *  0----1   --> x
 */
const CORNER_OFFSETS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Cell edges as corner pairs: front ring, back ring, then front-to-back.
const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Zero counts as positive.
#[inline]
fn same_sign(a: f32, b: f32) -> bool {
    (a >= 0.0) == (b >= 0.0)
}

/// Interpolation weight of the zero crossing between `v1` and `v2`.
/// Equal values give the edge midpoint.
#[inline]
fn zero_crossing(v1: f32, v2: f32) -> f32 {
    let delta = v1 - v2;
    if delta == 0.0 {
        return 0.5;
    }
    v1 / delta
}

/// Extract a quad mesh using Dual Contouring
///
/// Every cell gets exactly one vertex. Cells crossed by the surface place it
/// from their Hermite data (edge crossings + gradients); the rest sit at the
/// cell center. Quads are then stitched around every sign-changing grid edge
/// from the four cells sharing it.
#[derive(Debug)]
pub struct VolumeDualContourExtractor<'a, G: Grid3 + ?Sized = ScalarGrid3> {
    resolution: usize,
    grid: &'a G,
}

impl<'a, G: Grid3 + ?Sized> VolumeDualContourExtractor<'a, G> {
    /// Binds a grid with `resolution + 1` samples per axis.
    pub fn setup(resolution: usize, grid: &'a G) -> ContourResult<Self> {
        check_dims(resolution, &grid.dims())?;
        Ok(Self { resolution, grid })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn grid(&self) -> &'a G {
        self.grid
    }

    /// Runs both phases. The result holds `resolution³` vertices indexed
    /// `x + y*res + z*res*res`; quads wind counter-clockwise seen from the
    /// positive side of the field.
    pub fn extract(&self, params: &DualContourParams) -> QuadMesh {
        let vertices = self.place_vertices(params);
        let quads = self.stitch(params.iso_value);

        debug!(
            resolution = self.resolution,
            vertices = vertices.len(),
            quads = quads.len(),
            "Dual contouring finished"
        );

        QuadMesh { vertices, quads }
    }

    /// Field gradient estimate at a lattice point, normalized, pointing toward
    /// decreasing values. Forward differences, backward on the upper boundary.
    pub fn gradient(&self, x: usize, y: usize, z: usize) -> Vec3 {
        let r = self.resolution;
        let here = self.grid.get(x, y, z);

        let dx = if x < r {
            here - self.grid.get(x + 1, y, z)
        } else {
            self.grid.get(x - 1, y, z) - here
        };
        let dy = if y < r {
            here - self.grid.get(x, y + 1, z)
        } else {
            self.grid.get(x, y - 1, z) - here
        };
        let dz = if z < r {
            here - self.grid.get(x, y, z + 1)
        } else {
            self.grid.get(x, y, z - 1) - here
        };

        Vec3::new(dx, dy, dz)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vec3::zeros)
    }

    /// Phase 1: one vertex per cell, z-major so the flat index matches stitching.
    fn place_vertices(&self, params: &DualContourParams) -> Vec<Pt3> {
        let r = self.resolution;
        let scale = params.size / r as f32;
        let mut vertices = Vec::with_capacity(r * r * r);
        let mut hermite = HermiteData::with_capacity(EDGES.len());

        for z in 0..r {
            for y in 0..r {
                for x in 0..r {
                    hermite.clear();
                    self.collect_crossings(x, y, z, params.iso_value, &mut hermite);

                    let local = match params.solver {
                        VertexSolver::MassPoint => {
                            hermite.relax(params.max_iterations, params.convergence_threshold)
                        }
                        VertexSolver::LeastSquares => hermite.solve_least_squares(),
                    }
                    .unwrap_or_else(|| Vec3::new(0.5, 0.5, 0.5));

                    let cell = Vec3::new(x as f32, y as f32, z as f32);
                    vertices.push(Pt3::from((local + cell) * scale + params.origin));
                }
            }
        }

        vertices
    }

    /// Fills `hermite` with every sign-changing edge of cell `(x, y, z)`.
    fn collect_crossings(&self, x: usize, y: usize, z: usize, iso: f32, hermite: &mut HermiteData) {
        let corner = |i: usize| {
            let [ox, oy, oz] = CORNER_OFFSETS[i];
            (x + ox, y + oy, z + oz)
        };

        let mut values = [0.0f32; 8];
        for (i, value) in values.iter_mut().enumerate() {
            let (cx, cy, cz) = corner(i);
            *value = self.grid.get(cx, cy, cz) - iso;
        }

        for &(a, b) in &EDGES {
            let (v1, v2) = (values[a], values[b]);
            if same_sign(v1, v2) {
                continue;
            }

            let from = offset_vec(CORNER_OFFSETS[a]);
            let to = offset_vec(CORNER_OFFSETS[b]);
            let point = from + (to - from) * zero_crossing(v1, v2);

            let (gx, gy, gz) = corner(a);
            hermite.push(point, self.gradient(gx, gy, gz));
        }
    }

    /// Phase 2: a quad around every sign-changing lattice edge leaving an
    /// interior sample in +x, +y or +z.
    fn stitch(&self, iso: f32) -> Vec<[u32; 4]> {
        let r = self.resolution;
        let rr = r * r;
        let mut quads = Vec::new();

        for z in 1..r {
            for y in 1..r {
                for x in 1..r {
                    let v = x + y * r + z * rr;
                    let here = self.grid.get(x, y, z) - iso;
                    let negative = here < 0.0;

                    // Edge along x: cells around it differ in y and z.
                    if !same_sign(here, self.grid.get(x + 1, y, z) - iso) {
                        let quad = if negative {
                            [v, v - r, v - r - rr, v - rr]
                        } else {
                            [v, v - rr, v - r - rr, v - r]
                        };
                        quads.push(to_u32(quad));
                    }

                    // Edge along y: cells differ in x and z.
                    if !same_sign(here, self.grid.get(x, y + 1, z) - iso) {
                        let quad = if negative {
                            [v, v - rr, v - rr - 1, v - 1]
                        } else {
                            [v, v - 1, v - rr - 1, v - rr]
                        };
                        quads.push(to_u32(quad));
                    }

                    // Edge along z: cells differ in x and y.
                    if !same_sign(here, self.grid.get(x, y, z + 1) - iso) {
                        let quad = if negative {
                            [v, v - 1, v - r - 1, v - r]
                        } else {
                            [v, v - r, v - r - 1, v - 1]
                        };
                        quads.push(to_u32(quad));
                    }
                }
            }
        }

        quads
    }
}

fn offset_vec([x, y, z]: [usize; 3]) -> Vec3 {
    Vec3::new(x as f32, y as f32, z as f32)
}

fn to_u32(quad: [usize; 4]) -> [u32; 4] {
    quad.map(|i| i as u32)
}
