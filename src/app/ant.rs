//! A black marker wandering over a green plane.

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use super::create_window;
use crate::camera::OrthoCamera;
use crate::error::DemoError;
use crate::gpu::{GpuContext, QuadRenderer, SurfaceAction, CLEAR_COLOR};
use crate::scene::AntScene;
use crate::shader::QuadInstance;
use crate::wander::WanderConfig;

const PLANE_SIZE: f32 = 5.0;
const PLANE_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const MARKER_SIZE: f32 = 0.1;
const MARKER_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Ant demo builder.
pub struct AntDemo {
    config: WanderConfig,
    window_size: (u32, u32),
    seed: Option<u64>,
}

impl AntDemo {
    pub fn new() -> Self {
        Self {
            config: WanderConfig::default(),
            window_size: (800, 800),
            seed: None,
        }
    }

    /// Length of the random nudge added to the heading each frame.
    pub fn with_wander_strength(mut self, strength: f32) -> Self {
        self.config.strength = strength;
        self
    }

    /// Distance moved per frame.
    pub fn with_step(mut self, step: f32) -> Self {
        self.config.step = step;
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Open the window and run until it is closed.
    pub fn run(self) -> Result<(), DemoError> {
        let scene = match self.seed {
            Some(seed) => AntScene::with_rng(self.config, SmallRng::seed_from_u64(seed)),
            None => AntScene::new(self.config),
        };

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = AntApp {
            window: None,
            gpu: None,
            scene,
            camera: OrthoCamera::new(),
            window_size: self.window_size,
            error: None,
        };
        event_loop.run_app(&mut app)?;

        if app.scene.skipped_frames() > 0 {
            log::info!("Skipped {} degenerate wander steps", app.scene.skipped_frames());
        }
        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for AntDemo {
    fn default() -> Self {
        Self::new()
    }
}

struct AntGpu {
    ctx: GpuContext,
    quads: QuadRenderer,
}

struct AntApp {
    window: Option<Arc<Window>>,
    gpu: Option<AntGpu>,
    scene: AntScene,
    camera: OrthoCamera,
    window_size: (u32, u32),
    error: Option<DemoError>,
}

impl AntApp {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), DemoError> {
        let window = create_window(event_loop, "Ant", self.window_size)?;
        let ctx = pollster::block_on(GpuContext::new(window.clone()))?;
        let quads = QuadRenderer::new(&ctx.device, ctx.format(), 2);
        quads.update_camera(&ctx.queue, self.camera.view_proj());

        self.window = Some(window);
        self.gpu = Some(AntGpu { ctx, quads });
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
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

        self.scene.tick();

        let plane = QuadInstance::new(glam::Vec3::ZERO, PLANE_SIZE, PLANE_SIZE, PLANE_COLOR);
        let marker = QuadInstance::new(
            self.scene.wander().position(),
            MARKER_SIZE,
            MARKER_SIZE,
            MARKER_COLOR,
        );
        gpu.quads.set_quads(&gpu.ctx.queue, &[plane, marker]);

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
                label: Some("Ant Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            gpu.quads.draw(&mut render_pass);
        }

        gpu.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

impl ApplicationHandler for AntApp {
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
