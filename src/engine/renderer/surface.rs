// Drawing interface shared by the game entities and the GPU renderer

use glam::{Vec2, Vec4};

/// Something entities can draw themselves onto.
///
/// Coordinates are level units with the origin at the top-left corner and
/// y growing downwards.
pub trait RenderSurface {
    /// Fill an axis-aligned rectangle with a solid colour
    fn fill_rect(&mut self, position: Vec2, size: Vec2, color: Vec4);

    /// Draw the image at `path` stretched over the rectangle, mirrored
    /// horizontally around its centre when `flip_horizontal` is set.
    ///
    /// Returns false when the image is not available.
    fn draw_image(&mut self, path: &str, position: Vec2, size: Vec2, flip_horizontal: bool)
        -> bool;

    /// Outline a rectangle with edges `thickness` wide, inside its bounds
    fn stroke_rect(&mut self, position: Vec2, size: Vec2, thickness: f32, color: Vec4) {
        let t = thickness.min(size.x * 0.5).min(size.y * 0.5).max(0.0);
        self.fill_rect(position, Vec2::new(size.x, t), color);
        self.fill_rect(
            Vec2::new(position.x, position.y + size.y - t),
            Vec2::new(size.x, t),
            color,
        );
        self.fill_rect(
            Vec2::new(position.x, position.y + t),
            Vec2::new(t, size.y - 2.0 * t),
            color,
        );
        self.fill_rect(
            Vec2::new(position.x + size.x - t, position.y + t),
            Vec2::new(t, size.y - 2.0 * t),
            color,
        );
    }
}

/// Draw call captured by [`RecordingSurface`]
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        position: Vec2,
        size: Vec2,
        color: Vec4,
    },
    Image {
        path: String,
        position: Vec2,
        size: Vec2,
        flip_horizontal: bool,
    },
}

/// Surface that records draw calls instead of rasterising them
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    /// Image paths reported as available
    pub available_images: Vec<String>,
}

#[cfg(test)]
impl RenderSurface for RecordingSurface {
    fn fill_rect(&mut self, position: Vec2, size: Vec2, color: Vec4) {
        self.commands.push(DrawCommand::Rect {
            position,
            size,
            color,
        });
    }

    fn draw_image(
        &mut self,
        path: &str,
        position: Vec2,
        size: Vec2,
        flip_horizontal: bool,
    ) -> bool {
        if !self.available_images.iter().any(|p| p == path) {
            return false;
        }
        self.commands.push(DrawCommand::Image {
            path: path.to_string(),
            position,
            size,
            flip_horizontal,
        });
        true
    }
}
