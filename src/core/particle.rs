use super::config::FieldConfig;
use glam::Vec2;
use rand::Rng;

/// One point of the field. Particles have no identity beyond their index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub opacity: f32,
}

impl Particle {
    /// Uniformly random particle inside `[0, bounds.x] × [0, bounds.y]`.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2, config: &FieldConfig) -> Self {
        let speed = config.spawn_speed;
        Self {
            position: Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y),
            velocity: Vec2::new(symmetric(rng, speed), symmetric(rng, speed)),
            size: rng.gen_range(config.size_range.clone()),
            opacity: rng.gen_range(config.opacity_range.clone()),
        }
    }
}

/// Uniform sample from `[-half_width, half_width)`; zero when the width is zero.
#[inline]
pub fn symmetric<R: Rng + ?Sized>(rng: &mut R, half_width: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * 2.0 * half_width
}
