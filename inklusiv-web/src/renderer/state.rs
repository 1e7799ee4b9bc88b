//! GPU State management - WebGPU device, queue, surface for the preview canvas

use std::cell::RefCell;

use super::shapes::Vertex;
use crate::capture::SessionId;

/// Vertex capacity of the preview buffer (two hands need well under half)
pub(crate) const MAX_VERTICES: usize = 4096;

/// Errors that can occur while bringing up the preview
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("WebGPU canvas surfaces are not available on this target")]
    Unsupported,
    #[error("surface creation failed: {0}")]
    SurfaceCreationFailed(String),
    #[error("failed to find a suitable GPU adapter")]
    NoAdapter,
    #[error("device creation failed: {0}")]
    DeviceCreationFailed(String),
}

/// Holds all WebGPU state for rendering
pub(crate) struct GpuState {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub render_pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
}

/// The installed preview and the capture session it was built for
pub(crate) struct Preview<T> {
    pub owner: SessionId,
    pub state: T,
}

// Thread-local storage for GPU state (WASM is single-threaded)
thread_local! {
    pub(crate) static GPU_STATE: RefCell<Option<Preview<GpuState>>> = const { RefCell::new(None) };
}

#[cfg(target_arch = "wasm32")]
fn surface_target(
    canvas: web_sys::HtmlCanvasElement,
) -> Result<wgpu::SurfaceTarget<'static>, PreviewError> {
    Ok(wgpu::SurfaceTarget::Canvas(canvas))
}

#[cfg(not(target_arch = "wasm32"))]
fn surface_target(
    _canvas: web_sys::HtmlCanvasElement,
) -> Result<wgpu::SurfaceTarget<'static>, PreviewError> {
    Err(PreviewError::Unsupported)
}

/// Build WebGPU state for the preview canvas: adapter, device, surface, pipeline.
///
/// Nothing is installed; see [`install_preview`].
pub(crate) async fn initialize_preview(
    canvas: web_sys::HtmlCanvasElement,
) -> Result<GpuState, PreviewError> {
    let width = canvas.width().max(1);
    let height = canvas.height().max(1);

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU,
        ..Default::default()
    });

    let surface = instance
        .create_surface(surface_target(canvas)?)
        .map_err(|e| PreviewError::SurfaceCreationFailed(format!("{:?}", e)))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or(PreviewError::NoAdapter)?;

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Gesture Preview Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
            },
            None,
        )
        .await
        .map_err(|e| PreviewError::DeviceCreationFailed(format!("{:?}", e)))?;

    // Configure surface
    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| surface_caps.formats.first())
        .copied()
        .ok_or(PreviewError::Unsupported)?;
    let alpha_mode = surface_caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width,
        height,
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(&device, &config);

    // Create shader and pipeline
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Hand Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("../shader.wgsl").into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Preview Pipeline Layout"),
        bind_group_layouts: &[],
        push_constant_ranges: &[],
    });

    let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Hand Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Hand Vertex Buffer"),
        size: (MAX_VERTICES * std::mem::size_of::<Vertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    Ok(GpuState {
        device,
        queue,
        surface,
        render_pipeline,
        vertex_buffer,
    })
}

/// Install the preview built for `owner` if that session is still `live`.
///
/// Returns false (and drops `state`) for a session that ended while its
/// preview was being built.
pub(crate) fn install_preview(owner: SessionId, state: GpuState, live: bool) -> bool {
    GPU_STATE.with(|slot| install(&mut slot.borrow_mut(), owner, state, live))
}

/// Drop the GPU state if it belongs to `owner`.
pub(crate) fn release_preview(owner: SessionId) {
    GPU_STATE.with(|slot| {
        release(&mut slot.borrow_mut(), owner);
    });
}

fn install<T>(slot: &mut Option<Preview<T>>, owner: SessionId, state: T, live: bool) -> bool {
    if !live {
        return false;
    }
    *slot = Some(Preview { owner, state });
    true
}

fn release<T>(slot: &mut Option<Preview<T>>, owner: SessionId) -> bool {
    if slot.as_ref().is_some_and(|preview| preview.owner == owner) {
        *slot = None;
        true
    } else {
        false
    }
}
