//! Shape primitives - vertices for landmark dots and bone lines

/// Vertex structure for rendering colored shapes
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x4
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Convert a normalized landmark (0-1) to clip space (-1 to 1).
///
/// The preview is a selfie view, so x is mirrored as well as y flipped.
pub fn to_clip_space(x: f32, y: f32) -> (f32, f32) {
    (1.0 - x * 2.0, 1.0 - y * 2.0)
}

/// Append a filled circle (triangle fan) to `out`
pub fn push_dot(out: &mut Vec<Vertex>, center: (f32, f32), radius: f32, color: [f32; 4], segments: u32) {
    let (cx, cy) = center;
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let angle1 = (i as f32 / segments as f32) * std::f32::consts::TAU;
        let angle2 = ((i + 1) as f32 / segments as f32) * std::f32::consts::TAU;

        out.push(Vertex { position: [cx, cy], color });
        out.push(Vertex {
            position: [cx + radius * angle1.cos(), cy + radius * angle1.sin()],
            color,
        });
        out.push(Vertex {
            position: [cx + radius * angle2.cos(), cy + radius * angle2.sin()],
            color,
        });
    }
}

/// Append a line segment (thin quad) to `out`. Degenerate segments add nothing.
pub fn push_line(out: &mut Vec<Vertex>, from: (f32, f32), to: (f32, f32), width: f32, color: [f32; 4]) {
    let (x1, y1) = from;
    let (x2, y2) = to;
    let dx = x2 - x1;
    let dy = y2 - y1;
    let len = (dx * dx + dy * dy).sqrt();

    if len < 0.001 || !len.is_finite() {
        return;
    }

    // Perpendicular direction for line thickness
    let px = -dy / len * width;
    let py = dx / len * width;

    out.extend_from_slice(&[
        Vertex { position: [x1 - px, y1 - py], color },
        Vertex { position: [x1 + px, y1 + py], color },
        Vertex { position: [x2 + px, y2 + py], color },

        Vertex { position: [x1 - px, y1 - py], color },
        Vertex { position: [x2 + px, y2 + py], color },
        Vertex { position: [x2 - px, y2 - py], color },
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_clip_space_corners() {
        assert_eq!(to_clip_space(0.0, 0.0), (1.0, 1.0));
        assert_eq!(to_clip_space(1.0, 1.0), (-1.0, -1.0));
        assert_eq!(to_clip_space(0.5, 0.5), (0.0, 0.0));
    }

    #[test]
    fn test_dot_vertex_count() {
        let mut out = Vec::new();
        push_dot(&mut out, (0.0, 0.0), 0.1, WHITE, 12);
        assert_eq!(out.len(), 36);
    }

    #[test]
    fn test_degenerate_line_is_skipped() {
        let mut out = Vec::new();
        push_line(&mut out, (0.2, 0.2), (0.2, 0.2), 0.01, WHITE);
        push_line(&mut out, (0.0, 0.0), (f32::NAN, 0.0), 0.01, WHITE);
        assert!(out.is_empty());

        push_line(&mut out, (0.0, 0.0), (0.5, 0.0), 0.01, WHITE);
        assert_eq!(out.len(), 6);
    }
}
