use super::config::FieldConfig;
use super::draw::{DrawCommand, DrawList};
use super::particle::{symmetric, Particle};
use crate::constants::{MAX_LINKS_PER_PARTICLE, MAX_PARTICLE_COUNT};
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;

/// A connection initiated by particle `from` toward a higher-indexed `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub alpha: f32,
}

pub type Links = SmallVec<[Link; MAX_LINKS_PER_PARTICLE]>;

/// The whole simulated particle set plus the bounds it lives in.
///
/// All randomness is drawn from the caller's RNG so tests can run seeded.
pub struct ParticleField {
    config: FieldConfig,
    bounds: Vec2,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(config: FieldConfig, width: f32, height: f32, rng: &mut R) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(config.particle_count().min(MAX_PARTICLE_COUNT)),
            config,
            bounds: Vec2::ZERO,
        };
        field.resize(width, height, rng);
        field
    }

    /// Adopt new bounds and re-randomize every particle inside them.
    ///
    /// Existing positions are discarded rather than rescaled.
    pub fn resize<R: Rng + ?Sized>(&mut self, width: f32, height: f32, rng: &mut R) {
        self.bounds = Vec2::new(width.max(0.0), height.max(0.0));
        let n = self.config.particle_count();
        self.particles.clear();
        for _ in 0..n {
            let p = Particle::spawn(rng, self.bounds, &self.config);
            self.particles.push(p);
        }
        log::debug!(
            "[field] rebuilt {} particles for {}x{}",
            n,
            self.bounds.x,
            self.bounds.y
        );
    }

    /// Advance every particle by one frame. `pointer` is ignored on coarse
    /// devices.
    pub fn step<R: Rng + ?Sized>(&mut self, pointer: Option<Vec2>, rng: &mut R) {
        let pointer = pointer.filter(|_| self.config.capability.tracks_pointer());
        for p in &mut self.particles {
            step_particle(p, pointer, self.bounds, &self.config, rng);
        }
    }

    /// Connections initiated by particle `i`, capped at `max_links`.
    ///
    /// Only higher-indexed partners are considered, so a particle can still be
    /// the target of more links than it initiates.
    pub fn links_from(&self, i: usize) -> Links {
        let mut links = Links::new();
        let Some(a) = self.particles.get(i) else {
            return links;
        };
        let max_dist = self.config.link_distance;
        for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
            if links.len() >= self.config.max_links {
                break;
            }
            let d = a.position.distance(b.position);
            if d < max_dist {
                links.push(Link {
                    from: i,
                    to: j,
                    alpha: (1.0 - d / max_dist) * self.config.link_alpha,
                });
            }
        }
        links
    }

    /// Fill `out` with this frame's drawing: clear, links, then particles.
    pub fn render(&self, out: &mut DrawList) {
        out.clear();
        out.push(DrawCommand::Clear {
            width: self.bounds.x,
            height: self.bounds.y,
        });
        for i in 0..self.particles.len() {
            for link in self.links_from(i) {
                out.push(DrawCommand::Line {
                    from: self.particles[link.from].position,
                    to: self.particles[link.to].position,
                    alpha: link.alpha,
                    width: self.config.link_width,
                });
            }
        }
        for p in &self.particles {
            out.push(DrawCommand::Circle {
                center: p.position,
                radius: p.size,
                alpha: p.opacity,
            });
        }
    }

    /// One whole frame: step every particle, then draw the updated positions
    /// into `out`.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        pointer: Option<Vec2>,
        rng: &mut R,
        out: &mut DrawList,
    ) {
        self.step(pointer, rng);
        self.render(out);
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    #[inline]
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// One frame of motion for a single particle.
///
/// Order matters: integrate, pointer force, reflect, clamp, damp, jitter.
/// Reflection is tested before clamping, so an overshooting particle is
/// pulled back onto the edge with its velocity already flipped.
pub fn step_particle<R: Rng + ?Sized>(
    p: &mut Particle,
    pointer: Option<Vec2>,
    bounds: Vec2,
    config: &FieldConfig,
    rng: &mut R,
) {
    p.position += p.velocity;

    if let Some(target) = pointer {
        p.velocity += pointer_impulse(p.position, target, config);
    }

    if p.position.x < 0.0 || p.position.x > bounds.x {
        p.velocity.x = -p.velocity.x;
    }
    if p.position.y < 0.0 || p.position.y > bounds.y {
        p.velocity.y = -p.velocity.y;
    }
    p.position = p.position.clamp(Vec2::ZERO, bounds);

    p.velocity *= config.damping;

    if p.velocity.x.abs() < config.min_speed {
        p.velocity.x += symmetric(rng, config.jitter);
    }
    if p.velocity.y.abs() < config.min_speed {
        p.velocity.y += symmetric(rng, config.jitter);
    }
}

/// Velocity change caused by the pointer at `target`; zero outside the radius
/// or when the particle sits exactly on the pointer.
#[inline]
pub fn pointer_impulse(position: Vec2, target: Vec2, config: &FieldConfig) -> Vec2 {
    let delta = target - position;
    let d = delta.length();
    if d <= 0.0 || d >= config.pointer_radius {
        return Vec2::ZERO;
    }
    let falloff = (config.pointer_radius - d) / config.pointer_radius;
    delta / d * falloff * config.pointer_strength * config.pointer_force.sign()
}
