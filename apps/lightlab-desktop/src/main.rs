use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use lightlab_bindings::BindingTable;
use lightlab_bindings::preset::showcase_bindings;
use lightlab_input::{Action, Button, PointerTracker};
use lightlab_kernel::preset::showcase;
use lightlab_kernel::{SceneRegistry, SystemClock};
use lightlab_render::{
    AnimationDriver, CameraControl, FailurePolicy, OrbitControls, StepOutcome, Viewport,
};
use lightlab_render_wgpu::SurfaceTarget;
use lightlab_tools::{ParameterPanel, SceneInspector};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Pixels of trackpad scroll that count as one wheel line.
const PIXELS_PER_LINE: f32 = 50.0;

#[derive(Parser)]
#[command(name = "lightlab-desktop", about = "Interactive light lab")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in logical pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value = "720")]
    height: u32,

    /// Start with the parameter panel hidden (F1 toggles it)
    #[arg(long)]
    hide_panel: bool,
}

/// Application state.
struct AppState {
    registry: SceneRegistry,
    table: BindingTable,
    driver: AnimationDriver<SystemClock>,
    camera: OrbitControls,
    pointer: PointerTracker,
    viewport: Viewport,
    panel: ParameterPanel,
}

impl AppState {
    fn new(cli: &Cli) -> Result<Self> {
        let (registry, animator) = showcase()?;
        let table = showcase_bindings();
        for finding in table.audit(&registry) {
            tracing::warn!("control range: {finding}");
        }

        let driver = AnimationDriver::new(SystemClock::new(), animator)
            .with_policy(FailurePolicy::LogAndContinue);

        let mut panel = ParameterPanel::new();
        panel.visible = !cli.hide_panel;

        Ok(Self {
            registry,
            table,
            driver,
            camera: OrbitControls::default(),
            pointer: PointerTracker::new(),
            viewport: Viewport::new(cli.width, cli.height, 1.0),
            panel,
        })
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::F1 => self.panel.toggle(),
            KeyCode::Escape => self.driver.stop_signal().stop(),
            _ => {}
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        let edits = self.panel.show(ctx, &self.table, &self.registry);
        if !edits.is_empty() {
            if let Err(e) = self.panel.apply(&edits, &self.table, &mut self.registry) {
                tracing::warn!("no edit applied: {e}");
            }
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let summary = SceneInspector::summary(&self.registry, self.driver.animator());
            ui.horizontal(|ui| {
                ui.small(format!(
                    "lights {}  meshes {}  helpers {}",
                    summary.lights, summary.meshes, summary.helpers
                ));
                ui.separator();
                ui.small(format!(
                    "frames {}  failures {}",
                    self.driver.frames(),
                    self.driver.failures()
                ));
                ui.separator();
                ui.small("Drag: orbit | Wheel: zoom | F1: panel | Esc: quit");
            });
        });
    }
}

struct GpuApp {
    state: AppState,
    initial_size: LogicalSize<u32>,
    window: Option<Arc<Window>>,
    target: Option<SurfaceTarget>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    fatal: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(state: AppState, initial_size: LogicalSize<u32>) -> Self {
        Self {
            state,
            initial_size,
            window: None,
            target: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
            fatal: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Light Lab")
            .with_inner_size(self.initial_size);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let mut target = SurfaceTarget::new(window.clone(), (size.width, size.height))?;
        self.resize(&mut target, size, window.scale_factor());

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(target.device(), target.format(), None, 1, false);

        self.window = Some(window);
        self.target = Some(target);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    fn resize(&mut self, target: &mut SurfaceTarget, physical: PhysicalSize<u32>, scale: f64) {
        target.resize_surface(physical.width, physical.height);
        let logical: LogicalSize<u32> = physical.to_logical(scale);
        let state = &mut self.state;
        state.viewport.resize(
            logical.width,
            logical.height,
            scale as f32,
            target,
            &mut state.camera,
        );
        state.camera.handle(&Action::Resize {
            width: logical.width,
            height: logical.height,
            scale_factor: scale as f32,
        });
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(target), Some(egui_winit), Some(egui_renderer)) = (
            &self.window,
            &mut self.target,
            &mut self.egui_winit,
            &mut self.egui_renderer,
        ) else {
            return;
        };

        // panel edits land before the step so this frame shows them
        let raw_input = egui_winit.take_egui_input(window);
        let state = &mut self.state;
        let full_output = self.egui_ctx.run(raw_input, |ctx| state.draw_ui(ctx));
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let outcome = state
            .driver
            .step(&mut state.registry, &mut state.camera, target);
        match outcome {
            Ok(StepOutcome::Rendered { .. }) => {}
            Ok(StepOutcome::Failed) => {
                window.request_redraw();
                return;
            }
            Ok(StepOutcome::Stopped) => {
                event_loop.exit();
                return;
            }
            Err(e) => {
                tracing::error!("frame failed: {e}");
                event_loop.exit();
                return;
            }
        }

        let Some(view) = target.frame_view() else {
            return;
        };
        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = target.surface_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let (device, queue) = (target.device(), target.queue());
        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        egui_renderer.update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        target.present();
        window.request_redraw();
    }
}

fn button(button: MouseButton) -> Option<Button> {
    match button {
        MouseButton::Left => Some(Button::Primary),
        MouseButton::Right => Some(Button::Secondary),
        MouseButton::Middle => Some(Button::Middle),
        _ => None,
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                self.state.driver.stop_signal().stop();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                if let Some(mut target) = self.target.take() {
                    self.resize(&mut target, new_size, scale);
                    self.target = Some(target);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.state.handle_key(key);
            }
            WindowEvent::MouseInput {
                button: b,
                state: btn_state,
                ..
            } => {
                if let Some(b) = button(b) {
                    match btn_state {
                        ElementState::Pressed => self.state.pointer.press(b),
                        ElementState::Released => self.state.pointer.release(b),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let action = self
                    .state
                    .pointer
                    .moved(Vec2::new(position.x as f32, position.y as f32));
                self.state.camera.handle(&action);
            }
            WindowEvent::CursorLeft { .. } => self.state.pointer.left(),
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                let action = self.state.pointer.scroll(lines);
                self.state.camera.handle(&action);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    tracing::info!("lightlab-desktop starting");

    let state = AppState::new(&cli)?;
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state, LogicalSize::new(cli.width, cli.height));
    event_loop.run_app(&mut app)?;

    match app.fatal {
        Some(e) => Err(e.context("window setup failed")),
        None => Ok(()),
    }
}
