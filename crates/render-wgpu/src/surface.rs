use crate::gpu::SceneRenderer;
use lightlab_kernel::SceneRegistry;
use lightlab_render::{CameraView, RenderTarget};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("no compatible GPU adapter")]
    NoAdapter,
    #[error(transparent)]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error(transparent)]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface frame unavailable: {0}")]
    Frame(#[from] wgpu::SurfaceError),
}

/// Window surface render target.
///
/// `set_size` takes the window size in logical pixels and `set_pixel_ratio`
/// the capped device pixel ratio; the scene is drawn at their product and
/// scaled onto the swapchain, which always matches the window's physical
/// size. After [`RenderTarget::render`] the frame is held so overlays can be
/// drawn into it before [`SurfaceTarget::present`].
pub struct SurfaceTarget {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: SceneRenderer,
    logical: (u32, u32),
    pixel_ratio: f32,
    frame: Option<wgpu::SurfaceTexture>,
    backend: wgpu::Backend,
}

impl SurfaceTarget {
    /// Create a device and configure a surface for `window` at its current
    /// physical size.
    pub fn new<W>(window: Arc<W>, physical: (u32, u32)) -> Result<Self, SurfaceError>
    where
        W: wgpu::WindowHandle + 'static,
    {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(SurfaceError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("lightlab_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(caps.formats.first())
            .copied()
            .ok_or(SurfaceError::NoAdapter)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: physical.0.max(1),
            height: physical.1.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = SceneRenderer::new(&device, format, config.width, config.height);
        let backend = adapter.get_info().backend;
        tracing::info!("GPU initialized with {} backend", backend.to_str());

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
            logical: physical,
            pixel_ratio: 1.0,
            frame: None,
            backend,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn backend(&self) -> wgpu::Backend {
        self.backend
    }

    /// Swapchain size in physical pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Scene resolution: logical size times pixel ratio.
    pub fn render_size(&self) -> (u32, u32) {
        self.renderer.render_size()
    }

    /// Match the swapchain to a new physical window size.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    /// The frame drawn by the last `render`, if not yet presented.
    pub fn frame_view(&self) -> Option<wgpu::TextureView> {
        self.frame
            .as_ref()
            .map(|f| f.texture.create_view(&wgpu::TextureViewDescriptor::default()))
    }

    pub fn present(&mut self) {
        if let Some(frame) = self.frame.take() {
            frame.present();
        }
    }

    fn update_resolution(&mut self) {
        let w = (self.logical.0 as f32 * self.pixel_ratio).round() as u32;
        let h = (self.logical.1 as f32 * self.pixel_ratio).round() as u32;
        self.renderer.resize(&self.device, w, h);
    }

    fn acquire(&mut self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        match self.surface.get_current_texture() {
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                self.surface.get_current_texture()
            }
            other => other,
        }
    }
}

impl RenderTarget for SurfaceTarget {
    type Error = SurfaceError;

    fn set_size(&mut self, width: u32, height: u32) {
        self.logical = (width.max(1), height.max(1));
        self.update_resolution();
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
        self.update_resolution();
    }

    fn render(&mut self, scene: &SceneRegistry, camera: &CameraView) -> Result<(), SurfaceError> {
        // a frame that was never presented is dropped and replaced
        self.frame = None;
        let frame = self.acquire()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer
            .render(&self.device, &self.queue, &view, scene, camera);
        self.frame = Some(frame);
        Ok(())
    }
}
