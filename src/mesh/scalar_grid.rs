use crate::error::{sample_count, samples_per_axis, ContourError, ContourResult};
use crate::mesh::grid_trait::{Grid2, Grid3};
use rayon::prelude::*;

/// Dense 2D sample buffer. A grid of resolution `R` holds `(R + 1)²` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarGrid2 {
    dims: [usize; 2],
    /// Samples stored flat, indexed by `x + y*nx`.
    data: Vec<f32>,
}

impl ScalarGrid2 {
    /// Creates a zero-filled grid with `resolution + 1` samples per axis.
    pub fn new(resolution: usize) -> ContourResult<Self> {
        let n = samples_per_axis(resolution)?;
        let dims = [n, n];
        Ok(Self {
            dims,
            data: vec![0.0; sample_count(&dims)?],
        })
    }

    /// Wraps an existing flat buffer (`x + y*nx` order).
    pub fn from_vec(dims: [usize; 2], data: Vec<f32>) -> ContourResult<Self> {
        check_nonempty(&dims)?;
        let expected = sample_count(&dims)?;
        if data.len() != expected {
            return Err(ContourError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    /// Samples `field(x, y)` at every lattice point, in parallel.
    pub fn from_fn<F>(resolution: usize, field: F) -> ContourResult<Self>
    where
        F: Fn(usize, usize) -> f32 + Sync,
    {
        let mut grid = Self::new(resolution)?;
        let nx = grid.dims[0];

        grid.data
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, value)| {
                *value = field(index % nx, index / nx);
            });

        Ok(grid)
    }

    /// Number of cells per axis, or `None` if the axes differ in length.
    pub fn resolution(&self) -> Option<usize> {
        uniform_resolution(&self.dims)
    }

    pub fn dims(&self) -> [usize; 2] {
        self.dims
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[x + y * self.dims[0]]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let nx = self.dims[0];
        self.data[x + y * nx] = value;
    }
}

impl Grid2 for ScalarGrid2 {
    fn dims(&self) -> [usize; 2] {
        self.dims
    }

    fn get(&self, x: usize, y: usize) -> f32 {
        self.get(x, y)
    }
}

/// Dense 3D sample buffer. A grid of resolution `R` holds `(R + 1)³` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarGrid3 {
    dims: [usize; 3],
    /// Samples stored flat, indexed by `x + y*nx + z*nx*ny`.
    data: Vec<f32>,
}

impl ScalarGrid3 {
    /// Creates a zero-filled grid with `resolution + 1` samples per axis.
    pub fn new(resolution: usize) -> ContourResult<Self> {
        let n = samples_per_axis(resolution)?;
        let dims = [n, n, n];
        Ok(Self {
            dims,
            data: vec![0.0; sample_count(&dims)?],
        })
    }

    /// Wraps an existing flat buffer (`x + y*nx + z*nx*ny` order).
    pub fn from_vec(dims: [usize; 3], data: Vec<f32>) -> ContourResult<Self> {
        check_nonempty(&dims)?;
        let expected = sample_count(&dims)?;
        if data.len() != expected {
            return Err(ContourError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    /// Evaluates `field(x, y, z)` for all lattice points in parallel.
    pub fn from_fn<F>(resolution: usize, field: F) -> ContourResult<Self>
    where
        F: Fn(usize, usize, usize) -> f32 + Sync,
    {
        let mut grid = Self::new(resolution)?;
        let [nx, ny, _] = grid.dims;

        grid.data
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, value)| {
                let x = index % nx;
                let y = (index / nx) % ny;
                let z = index / (nx * ny);
                *value = field(x, y, z);
            });

        Ok(grid)
    }

    /// Number of cells per axis, or `None` if the axes differ in length.
    pub fn resolution(&self) -> Option<usize> {
        uniform_resolution(&self.dims)
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        let [nx, ny, _] = self.dims;
        self.data[x + y * nx + z * nx * ny]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: f32) {
        let [nx, ny, _] = self.dims;
        self.data[x + y * nx + z * nx * ny] = value;
    }
}

impl Grid3 for ScalarGrid3 {
    fn dims(&self) -> [usize; 3] {
        self.dims
    }

    fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        self.get(x, y, z)
    }
}

fn uniform_resolution(dims: &[usize]) -> Option<usize> {
    let n = dims[0];
    dims.iter().all(|&d| d == n).then(|| n - 1)
}

fn check_nonempty(dims: &[usize]) -> ContourResult<()> {
    match dims.iter().position(|&n| n == 0) {
        Some(axis) => Err(ContourError::EmptyGrid { axis }),
        None => Ok(()),
    }
}
