//! Interactive spiral galaxy.

use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use super::{create_window, scroll_lines, MouseDrag};
use crate::camera::OrbitCamera;
use crate::clock::FrameClock;
use crate::error::DemoError;
use crate::gpu::{EguiIntegration, GpuContext, PointsRenderer, SurfaceAction, CLEAR_COLOR};
use crate::panel::ControlPanel;
use crate::params::GalaxyParams;
use crate::scene::GalaxyScene;
use crate::shader::PointUniforms;
use crate::textures::{AlphaMask, DEFAULT_MASK_PATH};
use crate::visuals::PointStyle;

/// Galaxy demo builder.
///
/// Use method chaining to configure, then call `.run()` to start.
pub struct GalaxyDemo {
    params: GalaxyParams,
    mask_path: PathBuf,
    window_size: (u32, u32),
    style: PointStyle,
    seed: Option<u64>,
}

impl GalaxyDemo {
    pub fn new() -> Self {
        Self {
            params: GalaxyParams::default(),
            mask_path: PathBuf::from(DEFAULT_MASK_PATH),
            window_size: (1280, 720),
            style: PointStyle::default(),
            seed: None,
        }
    }

    /// Parameters of the first galaxy.
    pub fn with_params(mut self, params: GalaxyParams) -> Self {
        self.params = params;
        self
    }

    /// Image whose green channel gives each sprite its opacity.
    pub fn with_alpha_mask(mut self, path: impl Into<PathBuf>) -> Self {
        self.mask_path = path.into();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_point_style(mut self, style: PointStyle) -> Self {
        self.style = style;
        self
    }

    /// Seed the generator for a reproducible galaxy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Open the window and run until it is closed.
    pub fn run(self) -> Result<(), DemoError> {
        let scene = match self.seed {
            Some(seed) => GalaxyScene::with_rng(self.params, SmallRng::seed_from_u64(seed))?,
            None => GalaxyScene::new(self.params)?,
        };
        let mask = AlphaMask::load_or_fallback(&self.mask_path);

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = GalaxyApp {
            window: None,
            gpu: None,
            scene,
            mask,
            style: self.style,
            window_size: self.window_size,
            camera: OrbitCamera::new(),
            clock: FrameClock::new(),
            panel: ControlPanel::new(),
            mouse: MouseDrag::default(),
            error: None,
        };
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for GalaxyDemo {
    fn default() -> Self {
        Self::new()
    }
}

struct GalaxyGpu {
    ctx: GpuContext,
    points: PointsRenderer,
    egui: EguiIntegration,
}

struct GalaxyApp {
    window: Option<Arc<Window>>,
    gpu: Option<GalaxyGpu>,
    scene: GalaxyScene,
    mask: AlphaMask,
    style: PointStyle,
    window_size: (u32, u32),
    camera: OrbitCamera,
    clock: FrameClock,
    panel: ControlPanel,
    mouse: MouseDrag,
    error: Option<DemoError>,
}

impl GalaxyApp {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), DemoError> {
        let window = create_window(event_loop, "Galaxy", self.window_size)?;
        let ctx = pollster::block_on(GpuContext::new(window.clone()))?;
        let points = PointsRenderer::new(
            &ctx.device,
            &ctx.queue,
            ctx.format(),
            &self.mask,
            self.style,
            self.scene.particles_mut(),
        );
        let egui = EguiIntegration::new(&ctx.device, ctx.format(), &window);

        self.window = Some(window);
        self.gpu = Some(GalaxyGpu { ctx, points, egui });
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu)) = (self.window.as_ref(), self.gpu.as_mut()) else {
            return;
        };

        let output = match gpu.ctx.acquire() {
            Ok(output) => output,
            Err(e) => {
                match SurfaceAction::for_error(&e) {
                    SurfaceAction::Reconfigure => gpu.ctx.reconfigure(),
                    SurfaceAction::Exit => {
                        log::error!("Surface error: {:?}", e);
                        event_loop.exit();
                    }
                    SurfaceAction::Skip => log::warn!("Surface error: {:?}", e),
                }
                return;
            }
        };

        let frame = self.clock.tick();
        self.camera.update();

        let panel = &self.panel;
        let scene = &mut self.scene;
        let mut commit = false;
        let ui = gpu.egui.run(window, |ctx| {
            commit = panel.show(ctx, scene.store_mut());
        });

        if commit {
            match scene.commit() {
                Ok(true) => gpu.points.replace(&gpu.ctx.device, scene.particles_mut()),
                Ok(false) => {}
                Err(e) => log::warn!("Keeping previous galaxy: {}", e),
            }
        }

        scene.tick(frame);
        gpu.points.sync(&gpu.ctx.queue, scene.particles_mut());

        let (width, height) = (gpu.ctx.config.width, gpu.ctx.config.height);
        let uniforms = PointUniforms::new(
            self.camera.view_proj(gpu.ctx.aspect()),
            width,
            height,
            self.style.size,
        );
        gpu.points.update_uniforms(&gpu.ctx.queue, &uniforms);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Galaxy Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: gpu.ctx.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            gpu.points.draw(&mut render_pass);
        }

        let ui_buffers = gpu.egui.render(
            &gpu.ctx.device,
            &gpu.ctx.queue,
            &mut encoder,
            &view,
            [width, height],
            &ui,
        );

        gpu.ctx
            .queue
            .submit(ui_buffers.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();
        gpu.egui.cleanup(&ui);
    }
}

impl ApplicationHandler for GalaxyApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("{}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let consumed = match (&self.window, &mut self.gpu) {
            (Some(window), Some(gpu)) => gpu.egui.on_window_event(window, &event),
            _ => false,
        };
        let ui_has_pointer = self.gpu.as_ref().is_some_and(|gpu| gpu.egui.wants_pointer());

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                log::debug!("Resized to {}x{}", physical_size.width, physical_size.height);
                if let Some(gpu) = &mut self.gpu {
                    gpu.ctx.resize(physical_size);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                // Releases always reach the camera so a drag never sticks.
                if !consumed || state == winit::event::ElementState::Released {
                    self.mouse.button(button, state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some((dx, dy)) = self.mouse.moved(position) {
                    if !ui_has_pointer {
                        self.camera.drag(dx, dy);
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if !consumed {
                    self.camera.zoom(scroll_lines(delta));
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
