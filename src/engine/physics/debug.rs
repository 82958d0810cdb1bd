use glam::Vec4;

use super::body::Body;
use super::wall::Wall;
use crate::core::Aabb;
use crate::engine::renderer::RenderSurface;

/// Outline thickness in level units
const LINE_WIDTH: f32 = 2.0;

const WALL_OUTLINE: Vec4 = Vec4::new(0.5, 0.5, 0.5, 0.8); // Gray for static
const BODY_OUTLINE: Vec4 = Vec4::new(0.0, 1.0, 0.0, 0.8); // Green for the moving body
const PROBE_OUTLINE: Vec4 = Vec4::new(0.0, 0.5, 1.0, 0.8); // Blue for the stand-up probe

/// Debug renderer for physics objects
/// Outlines walls, the player body and the crouch stand-up probe
#[derive(Debug, Default)]
pub struct DebugRenderer {
    enabled: bool,
}

impl DebugRenderer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Enable or disable debug rendering
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if debug rendering is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) {
        self.set_enabled(!self.enabled);
        log::info!(
            "Physics debug overlay {}",
            if self.enabled { "enabled" } else { "disabled" }
        );
    }

    /// Draw collider outlines on top of the frame
    pub fn draw(
        &self,
        surface: &mut dyn RenderSurface,
        walls: &[Wall],
        body: &Body,
        probe: Option<Aabb>,
    ) {
        if !self.is_enabled() {
            return;
        }

        for wall in walls {
            Self::outline(surface, wall.bounds(), WALL_OUTLINE);
        }
        Self::outline(surface, body.bounds(), BODY_OUTLINE);
        if let Some(probe) = probe {
            Self::outline(surface, probe, PROBE_OUTLINE);
        }
    }

    fn outline(surface: &mut dyn RenderSurface, bounds: Aabb, color: Vec4) {
        surface.stroke_rect(bounds.position, bounds.size, LINE_WIDTH, color);
    }
}
