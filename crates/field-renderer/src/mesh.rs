use field_core::Color;
use glam::Vec2;

/// Canvas vertex: logical pixel position and linear RGBA color
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(pos: Vec2, color: Color) -> Self {
        Self {
            pos: pos.to_array(),
            color: [color.r, color.g, color.b, color.a],
        }
    }
}

/// Indexed triangle list built up over one frame
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn with_capacity(vertex_capacity: usize, index_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(index_capacity),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn next_index(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Convex quad as two triangles sharing the 0-2 diagonal
    pub fn push_quad(&mut self, corners: [Vec2; 4], color: Color) {
        let first = self.next_index();
        self.vertices
            .extend(corners.iter().map(|&corner| Vertex::new(corner, color)));
        self.indices
            .extend([0, 1, 2, 0, 2, 3].map(|offset| first + offset));
    }

    /// Triangle fan around `center` closing back onto the first rim point
    pub fn push_fan(&mut self, center: Vec2, rim: impl IntoIterator<Item = Vec2>, color: Color) {
        let hub = self.next_index();
        self.vertices.push(Vertex::new(center, color));
        self.vertices
            .extend(rim.into_iter().map(|point| Vertex::new(point, color)));

        let spokes = self.next_index() - hub - 1;
        for i in 0..spokes {
            let current = hub + 1 + i;
            let next = hub + 1 + (i + 1) % spokes;
            self.indices.extend([hub, current, next]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quads_index_their_own_vertices() {
        let mut mesh = Mesh::default();
        let square = [
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            Vec2::ONE,
            Vec2::new(0.0, 1.0),
        ];
        mesh.push_quad(square, Color::rgb(1.0, 0.0, 0.0));
        mesh.push_quad(square, Color::rgb(0.0, 1.0, 0.0));

        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(&mesh.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_fan_wraps_around() {
        let mut mesh = Mesh::default();
        let rim = [Vec2::X, Vec2::Y, -Vec2::X, -Vec2::Y];
        mesh.push_fan(Vec2::ZERO, rim, Color::rgb(1.0, 1.0, 1.0));

        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(&mesh.indices[9..], &[0, 4, 1]);
    }
}
