/// Evenly spaced samples over `[start, end]`, endpoints included.
pub fn linspace(start: f64, end: f64, samples: usize) -> Vec<f64> {
    if samples == 1 {
        return vec![start];
    }
    let step = (end - start) / (samples - 1) as f64;
    (0..samples).map(|i| start + i as f64 * step).collect()
}

/// A sampled parametric surface: three coordinate arrays of identical shape,
/// stored row-major with `rows` axial samples of `cols` angular samples each.
#[derive(Clone, Debug, PartialEq)]
pub struct GridMesh {
    pub rows: usize,
    pub cols: usize,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub zs: Vec<f64>,
}

impl GridMesh {
    pub fn with_capacity(rows: usize, cols: usize) -> Self {
        let n = rows * cols;
        Self {
            rows,
            cols,
            xs: Vec::with_capacity(n),
            ys: Vec::with_capacity(n),
            zs: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, x: f64, y: f64, z: f64) {
        self.xs.push(x);
        self.ys.push(y);
        self.zs.push(z);
    }

    pub fn point(&self, row: usize, col: usize) -> [f64; 3] {
        let i = row * self.cols + col;
        [self.xs[i], self.ys[i], self.zs[i]]
    }

    /// Reflects every height about the cone midplane: `z' = 1 - z`.
    /// Applying it twice is the identity.
    pub fn flip_heights(&mut self) {
        for z in &mut self.zs {
            *z = 1.0 - *z;
        }
    }

    /// Triangulates the grid for GPU upload. Height (the grid's z) maps to
    /// the renderer's vertical Y axis; normals come from central differences
    /// of the position grid, one-sided at the boundary rows and columns.
    pub fn tessellate(&self) -> TriangleMesh {
        let (rows, cols) = (self.rows, self.cols);
        let world = |row: usize, col: usize| -> glam::DVec3 {
            let [x, y, z] = self.point(row, col);
            glam::DVec3::new(x, z, y)
        };

        let mut vertices = Vec::with_capacity(rows * cols * 3);
        let mut normals = Vec::with_capacity(rows * cols * 3);

        for i in 0..rows {
            for j in 0..cols {
                let p = world(i, j);

                let tangent_u = if i > 0 && i < rows - 1 {
                    world(i + 1, j) - world(i - 1, j)
                } else if i == 0 {
                    world(i + 1, j) - p
                } else {
                    p - world(i - 1, j)
                };

                let tangent_v = if j > 0 && j < cols - 1 {
                    world(i, j + 1) - world(i, j - 1)
                } else if j == 0 {
                    world(i, j + 1) - p
                } else {
                    p - world(i, j - 1)
                };

                let n = tangent_u.cross(tangent_v);
                let len = n.length().max(1e-4);

                vertices.push(p.x as f32);
                vertices.push(p.y as f32);
                vertices.push(p.z as f32);

                normals.push((n.x / len) as f32);
                normals.push((n.y / len) as f32);
                normals.push((n.z / len) as f32);
            }
        }

        let mut indices = Vec::with_capacity((rows - 1) * (cols - 1) * 6);
        for i in 0..rows - 1 {
            for j in 0..cols - 1 {
                let tl = (i * cols + j) as u32;
                let tr = (i * cols + j + 1) as u32;
                let bl = ((i + 1) * cols + j) as u32;
                let br = ((i + 1) * cols + j + 1) as u32;

                indices.push(tl);
                indices.push(bl);
                indices.push(tr);

                indices.push(tr);
                indices.push(bl);
                indices.push(br);
            }
        }

        TriangleMesh {
            vertices,
            normals,
            indices,
        }
    }
}

/// Indexed triangle list ready for vertex/normal/index buffer upload.
pub struct TriangleMesh {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

/// An ordered ring of 3D points traced at a single height.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub points: Vec<[f64; 3]>,
}

impl Polyline {
    /// A closed circle of `samples` points with the given radius, lying at
    /// the given height.
    pub fn circle(samples: usize, radius: f64, height: f64) -> Self {
        let points = linspace(0.0, std::f64::consts::TAU, samples)
            .into_iter()
            .map(|theta| [radius * theta.cos(), radius * theta.sin(), height])
            .collect();
        Self { points }
    }

    /// Flat vertex list for a line-strip draw, height on the Y axis.
    pub fn vertices(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.points.len() * 3);
        for [x, y, z] in &self.points {
            out.push(*x as f32);
            out.push(*z as f32);
            out.push(*y as f32);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let vals = linspace(0.0, 1.0, 50);
        assert_eq!(vals.len(), 50);
        assert!((vals[0]).abs() < 1e-10);
        assert!((vals[49] - 1.0).abs() < 1e-10);
        let step = vals[1] - vals[0];
        assert!((step - 1.0 / 49.0).abs() < 1e-10);
    }

    #[test]
    fn test_flip_heights_is_involution() {
        let mut grid = GridMesh::with_capacity(2, 2);
        for z in [0.0, 0.25, 0.5, 1.0] {
            grid.push(0.1, 0.2, z);
        }
        let original = grid.clone();
        grid.flip_heights();
        assert!((grid.zs[0] - 1.0).abs() < 1e-10);
        assert!((grid.zs[1] - 0.75).abs() < 1e-10);
        grid.flip_heights();
        assert_eq!(grid, original);
    }

    #[test]
    fn test_tessellate_counts() {
        let mut grid = GridMesh::with_capacity(4, 5);
        for i in 0..4 {
            for j in 0..5 {
                grid.push(j as f64, i as f64, (i * j) as f64 * 0.1);
            }
        }
        let mesh = grid.tessellate();
        assert_eq!(mesh.vertices.len(), 4 * 5 * 3);
        assert_eq!(mesh.normals.len(), 4 * 5 * 3);
        assert_eq!(mesh.indices.len(), 3 * 4 * 6);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < 4 * 5));
    }

    #[test]
    fn test_tessellate_normals_unit_length() {
        let mut grid = GridMesh::with_capacity(3, 3);
        for i in 0..3 {
            for j in 0..3 {
                // Tilted plane, no degenerate cells.
                grid.push(j as f64, i as f64, 0.5 * j as f64);
            }
        }
        let mesh = grid.tessellate();
        for n in mesh.normals.chunks(3) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_circle_outline() {
        let ring = Polyline::circle(100, 0.67, 0.67);
        assert_eq!(ring.points.len(), 100);
        for [x, y, z] in &ring.points {
            let r = (x * x + y * y).sqrt();
            assert!((r - 0.67).abs() < 1e-10);
            assert!((z - 0.67).abs() < 1e-10);
        }
        // Inclusive angular sweep closes the loop.
        let first = ring.points[0];
        let last = ring.points[99];
        assert!((first[0] - last[0]).abs() < 1e-9);
        assert!((first[1] - last[1]).abs() < 1e-9);
    }
}
