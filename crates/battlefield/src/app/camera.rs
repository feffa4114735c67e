use tracing::debug;

use super::rendering::Viewport;
use crate::geometry::{MapPoint, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisMotion {
    Negative,
    Stopped,
    Positive,
}

/// Legal camera positions, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perimeter {
    pub min: Vec2,
    pub max: Vec2,
}

impl Perimeter {
    pub fn for_sizes(map_size_px: (u32, u32), viewport: Viewport) -> Self {
        let max_x = map_size_px.0.saturating_sub(viewport.width) as f32;
        let max_y = map_size_px.1.saturating_sub(viewport.height) as f32;
        Self {
            min: Vec2::ZERO,
            max: Vec2 { x: max_x, y: max_y },
        }
    }

    pub fn clamp(&self, position: Vec2) -> Vec2 {
        Vec2 {
            x: clamp_axis(position.x, self.min.x, self.max.x),
            y: clamp_axis(position.y, self.min.y, self.max.y),
        }
    }

    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.y >= self.min.y
            && position.y <= self.max.y
    }
}

/// Infinities clamp to the nearer bound; NaN falls back to `min`.
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}

#[derive(Debug, Clone, Copy)]
pub struct Camera2D {
    position: Vec2,
    velocity: Vec2,
    move_speed: f32,
    perimeter: Perimeter,
}

impl Camera2D {
    pub fn new(move_speed: f32, map_size_px: (u32, u32), viewport: Viewport) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            move_speed,
            perimeter: Perimeter::for_sizes(map_size_px, viewport),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whole-pixel camera offset shared by every coordinate transform.
    pub fn position_px(&self) -> MapPoint {
        MapPoint {
            x: self.position.x.floor() as i32,
            y: self.position.y.floor() as i32,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn perimeter(&self) -> Perimeter {
        self.perimeter
    }

    pub fn set_directional(&mut self, axis: Axis, motion: AxisMotion) {
        let speed = match motion {
            AxisMotion::Negative => -self.move_speed,
            AxisMotion::Stopped => 0.0,
            AxisMotion::Positive => self.move_speed,
        };
        match axis {
            Axis::Horizontal => self.velocity.x = speed,
            Axis::Vertical => self.velocity.y = speed,
        }
    }

    pub fn tick(&mut self, delta_seconds: f32) {
        if !delta_seconds.is_finite() {
            return;
        }
        let translation = self.velocity.scale(delta_seconds);
        self.position = self.perimeter.clamp(self.position + translation);
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = self.perimeter.clamp(position);
    }

    pub fn center_on(&mut self, map_point: MapPoint, viewport: Viewport) {
        let half = Vec2 {
            x: viewport.width as f32 * 0.5,
            y: viewport.height as f32 * 0.5,
        };
        self.set_position(map_point.to_vec2() - half);
    }

    /// Only needed when the map or viewport size changes.
    pub fn recompute_perimeter(&mut self, map_size_px: (u32, u32), viewport: Viewport) {
        self.perimeter = Perimeter::for_sizes(map_size_px, viewport);
        self.position = self.perimeter.clamp(self.position);
        debug!(
            max_x = self.perimeter.max.x,
            max_y = self.perimeter.max.y,
            "camera_perimeter_recomputed"
        );
    }
}
