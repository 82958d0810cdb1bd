// Texture loading and caching

use anyhow::Result;
use image::GenericImageView;
use std::collections::{HashMap, HashSet};

use crate::engine::assets::AssetLoader;

/// Handle to a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(super) usize);

/// A loaded texture with its GPU resources and bind group
pub struct Texture {
    #[allow(dead_code)]
    pub texture: wgpu::Texture,
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Upload an image, binding it against `layout`
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        img: &image::DynamicImage,
        label: &str,
    ) -> Self {
        let (width, height) = img.dimensions();
        Self::from_rgba(device, queue, layout, &img.to_rgba8(), width, height, label)
    }

    /// Single texel texture, used for solid colour fills
    pub fn from_color(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        color: [u8; 4],
        label: &str,
    ) -> Self {
        Self::from_rgba(device, queue, layout, &color, 1, 1, label)
    }

    fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        rgba: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Pixel art: no smoothing when scaling 24px frames up
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            texture,
            bind_group,
            width,
            height,
        }
    }
}

/// Caches textures by asset path.
///
/// A path that failed to load is remembered and reported once, later
/// requests for it return `None` without touching the disk.
pub struct TextureManager {
    loader: AssetLoader,
    textures: Vec<Texture>,
    path_to_handle: HashMap<String, TextureHandle>,
    failed: HashSet<String>,
}

impl TextureManager {
    pub fn new(loader: AssetLoader) -> Self {
        Self {
            loader,
            textures: Vec::new(),
            path_to_handle: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    /// Get the texture for `path`, loading it on first use
    pub fn get_or_load(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        path: &str,
    ) -> Option<TextureHandle> {
        if let Some(&handle) = self.path_to_handle.get(path) {
            return Some(handle);
        }
        if self.failed.contains(path) {
            return None;
        }

        match self.loader.load_image(path) {
            Ok(img) => {
                let texture = Texture::from_image(device, queue, layout, &img, path);
                log::debug!("Loaded texture {} ({}x{})", path, texture.width, texture.height);
                Some(self.insert(path, texture))
            }
            Err(e) => {
                log::warn!("Texture unavailable, drawing fallback: {}", e);
                self.failed.insert(path.to_string());
                None
            }
        }
    }

    /// Create a named solid colour texture
    pub fn create_color_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        color: [u8; 4],
        label: &str,
    ) -> Result<TextureHandle> {
        if self.path_to_handle.contains_key(label) {
            anyhow::bail!("Texture {} already exists", label);
        }
        let texture = Texture::from_color(device, queue, layout, color, label);
        Ok(self.insert(label, texture))
    }

    fn insert(&mut self, path: &str, texture: Texture) -> TextureHandle {
        let handle = TextureHandle(self.textures.len());
        self.textures.push(texture);
        self.path_to_handle.insert(path.to_string(), handle);
        handle
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.0)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}
