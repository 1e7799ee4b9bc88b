//! Skeleton rendering - draws each tracked hand's bones and joints

use super::shapes::{push_dot, push_line, to_clip_space, Vertex};
use super::state::{GPU_STATE, MAX_VERTICES};
use crate::classifier::{HandDetection, HAND_SKELETON};

/// Colors for different visualization elements
mod colors {
    /// Bones
    pub const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    /// Joints
    pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    /// Background
    pub const BACKGROUND: wgpu::Color = wgpu::Color::BLACK;
}

/// Append one hand's bones and joint dots
fn build_hand_vertices(hand: &HandDetection, out: &mut Vec<Vertex>) {
    for (start_idx, end_idx) in HAND_SKELETON.iter() {
        let start = hand.landmark(*start_idx);
        let end = hand.landmark(*end_idx);
        push_line(
            out,
            to_clip_space(start.x, start.y),
            to_clip_space(end.x, end.y),
            0.008,
            colors::GREEN,
        );
    }

    for lm in hand.landmarks.iter().filter(|lm| lm.is_finite()) {
        push_dot(out, to_clip_space(lm.x, lm.y), 0.015, colors::RED, 8);
    }
}

/// Render the hands of the latest frame. No-op until the preview is up.
pub fn render_hands(hands: &[HandDetection]) {
    GPU_STATE.with(|state_cell| {
        let state_ref = state_cell.borrow();
        let state = match state_ref.as_ref() {
            Some(preview) => &preview.state,
            None => return,
        };

        let mut vertices: Vec<Vertex> = Vec::new();
        for hand in hands {
            build_hand_vertices(hand, &mut vertices);
        }
        vertices.truncate(MAX_VERTICES);

        // Get surface and render
        let output = match state.surface.get_current_texture() {
            Ok(t) => t,
            Err(_) => return,
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = state.device.create_command_encoder(
            &wgpu::CommandEncoderDescriptor { label: Some("Preview Encoder") }
        );

        if !vertices.is_empty() {
            state.queue.write_buffer(
                &state.vertex_buffer,
                0,
                bytemuck::cast_slice(&vertices),
            );
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Hand Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(colors::BACKGROUND),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !vertices.is_empty() {
                pass.set_pipeline(&state.render_pipeline);
                pass.set_vertex_buffer(0, state.vertex_buffer.slice(..));
                pass.draw(0..vertices.len() as u32, 0..1);
            }
        }

        state.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Handedness, Landmark, LANDMARK_COUNT};

    fn spread_hand() -> HandDetection {
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (i, lm) in landmarks.iter_mut().enumerate() {
            *lm = Landmark::new(i as f32 * 0.04, i as f32 * 0.03, 0.0);
        }
        HandDetection::new(landmarks, Handedness::Left)
    }

    #[test]
    fn test_hand_vertex_budget() {
        let mut out = Vec::new();
        build_hand_vertices(&spread_hand(), &mut out);
        // 23 bones as quads, 21 dots as 8-segment fans
        assert_eq!(out.len(), 23 * 6 + 21 * 8 * 3);
        assert!(out.len() * 2 <= MAX_VERTICES);
    }

    #[test]
    fn test_render_without_gpu_is_noop() {
        render_hands(&[spread_hand()]);
    }
}
