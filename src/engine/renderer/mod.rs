// Rendering system using wgpu

mod camera;
mod sprite;
pub mod surface;
mod texture;
mod vertex;

use camera::{Camera, CameraUniform};
use sprite::SpriteRenderer;
pub use surface::RenderSurface;
use texture::{TextureHandle, TextureManager};
use vertex::Vertex;

use anyhow::Result;
use glam::{Vec2, Vec4};
use log::info;
use std::sync::Arc;
use winit::window::Window;

use crate::engine::assets::AssetLoader;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.55,
    g: 0.62,
    b: 0.7,
    a: 1.0,
};

/// Initializes wgpu, collects the frame's quads and presents them
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    sprite_renderer: SpriteRenderer,
    texture_manager: TextureManager,
    camera: Camera,
    /// 1x1 white texel tinted by the vertex colour for solid fills
    white: TextureHandle,
}

impl Renderer {
    /// Create a renderer for `window` showing a `logical_size` area of the level
    pub async fn new(window: Arc<Window>, logical_size: Vec2, assets: AssetLoader) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let sprite_renderer = SpriteRenderer::new(&device, &config)?;

        let mut texture_manager = TextureManager::new(assets);
        let white = texture_manager.create_color_texture(
            &device,
            &queue,
            sprite_renderer.texture_layout(),
            [255, 255, 255, 255],
            "white",
        )?;

        let camera = Camera::new(Vec2::ZERO, logical_size.x, logical_size.y);

        info!(
            "Renderer initialized: {}x{} window, {}x{} level view",
            size.width, size.height, logical_size.x, logical_size.y
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            sprite_renderer,
            texture_manager,
            camera,
            white,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Reconfigure the surface at its current size, after it was lost
    pub fn reconfigure(&mut self) {
        self.resize(self.size);
    }

    /// Present everything drawn since the previous call
    pub fn render(&mut self) -> Result<()> {
        let result = self.present_frame();
        self.sprite_renderer.clear();
        result
    }

    fn present_frame(&mut self) -> Result<()> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.sprite_renderer
            .prepare(&self.device, &self.queue, &self.camera);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
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

            self.sprite_renderer
                .render(&mut render_pass, &self.texture_manager);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        log::trace!(
            "Frame presented: {} quads, {} textures",
            self.sprite_renderer.quad_count(),
            self.texture_manager.texture_count()
        );

        Ok(())
    }
}

impl RenderSurface for Renderer {
    fn fill_rect(&mut self, position: Vec2, size: Vec2, color: Vec4) {
        self.sprite_renderer
            .push_quad(self.white, position, size, color, false);
    }

    fn draw_image(&mut self, path: &str, position: Vec2, size: Vec2, flip_horizontal: bool) -> bool {
        let handle = self.texture_manager.get_or_load(
            &self.device,
            &self.queue,
            self.sprite_renderer.texture_layout(),
            path,
        );

        match handle {
            Some(texture) => {
                self.sprite_renderer
                    .push_quad(texture, position, size, Vec4::ONE, flip_horizontal);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_uniform_uploads_level_view() {
        let camera = Camera::new(Vec2::ZERO, 1920.0, 1080.0);
        let uniform = CameraUniform::new(&camera);

        assert_eq!(uniform.view_proj, camera.view_proj_matrix().to_cols_array_2d());
    }
}
