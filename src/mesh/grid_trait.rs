// Traits for abstracting over scalar sample storage
// Lets the extractors read caller-owned buffers without copying them

/// Read-only 2D sample lattice, indexed `0..dims()[axis]` per axis
pub trait Grid2 {
    /// Number of samples along x and y
    fn dims(&self) -> [usize; 2];

    /// Sample value at lattice coordinates
    fn get(&self, x: usize, y: usize) -> f32;
}

/// Read-only 3D sample lattice, indexed `0..dims()[axis]` per axis
pub trait Grid3 {
    /// Number of samples along x, y and z
    fn dims(&self) -> [usize; 3];

    /// Sample value at lattice coordinates
    fn get(&self, x: usize, y: usize, z: usize) -> f32;
}
