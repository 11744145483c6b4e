//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use super::Rect;

/// Simple 2D vertex with position (NDC) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Map arena pixels (origin top-left, y down) to normalized device coordinates
pub fn pixel_to_ndc(x: f32, y: f32, viewport: (f32, f32)) -> (f32, f32) {
    let (w, h) = viewport;
    (x / w * 2.0 - 1.0, 1.0 - y / h * 2.0)
}

/// Two triangles covering `rect`
pub fn rect_vertices(rect: Rect, color: [f32; 4], viewport: (f32, f32)) -> [Vertex; 6] {
    let left = rect.x as f32;
    let top = rect.y as f32;
    let right = left + rect.w as f32;
    let bottom = top + rect.h as f32;

    let (l, t) = pixel_to_ndc(left, top, viewport);
    let (r, b) = pixel_to_ndc(right, bottom, viewport);

    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: (f32, f32) = (1024.0, 768.0);

    #[test]
    fn test_pixel_to_ndc_corners() {
        assert_eq!(pixel_to_ndc(0.0, 0.0, VIEWPORT), (-1.0, 1.0));
        assert_eq!(pixel_to_ndc(1024.0, 768.0, VIEWPORT), (1.0, -1.0));
        assert_eq!(pixel_to_ndc(512.0, 384.0, VIEWPORT), (0.0, 0.0));
    }

    #[test]
    fn test_full_screen_rect() {
        let verts = rect_vertices(Rect::new(0, 0, 1024, 768), [1.0; 4], VIEWPORT);
        assert_eq!(verts[0].position, [-1.0, 1.0]);
        assert_eq!(verts[5].position, [1.0, -1.0]);
        assert!(verts.iter().all(|v| v.color == [1.0; 4]));
    }
}
