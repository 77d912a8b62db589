use crate::constants::*;
use serde::Deserialize;
use std::ops::Range;

/// Primary pointing device class, resolved once when the field is mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerCapability {
    /// Touch-first device: fewer particles, no pointer tracking.
    Coarse,
    /// Mouse or pen.
    Fine,
}

impl PointerCapability {
    #[inline]
    pub fn from_coarse_flag(coarse: bool) -> Self {
        if coarse {
            Self::Coarse
        } else {
            Self::Fine
        }
    }

    #[inline]
    pub fn tracks_pointer(self) -> bool {
        self == Self::Fine
    }
}

/// Direction of the pointer force relative to the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerForce {
    /// Particles gather toward the pointer.
    #[default]
    Attract,
    /// Particles are pushed away from the pointer.
    Repel,
}

impl PointerForce {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::Attract => 1.0,
            Self::Repel => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS colour string with the given alpha, e.g. `rgba(0, 242, 255, 0.35)`.
    pub fn css(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        let [r, g, b] = PARTICLE_RGB;
        Self(r, g, b)
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("particle count for {0:?} pointers must be at least 1")]
    EmptyField(PointerCapability),
    #[error("{name} range is empty or inverted ({start}..{end})")]
    BadRange {
        name: &'static str,
        start: f32,
        end: f32,
    },
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} must be at most {max}, got {value}")]
    TooMany {
        name: &'static str,
        value: usize,
        max: usize,
    },
    #[error("damping must be in (0, 1], got {0}")]
    Damping(f32),
    #[error("{name} must be within 0..=1, got {value}")]
    Alpha { name: &'static str, value: f32 },
}

/// Immutable simulation settings handed to a [`super::field::ParticleField`].
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub capability: PointerCapability,
    pub coarse_count: usize,
    pub fine_count: usize,
    pub spawn_speed: f32,
    pub size_range: Range<f32>,
    pub opacity_range: Range<f32>,
    pub pointer_radius: f32,
    pub pointer_strength: f32,
    pub pointer_force: PointerForce,
    pub damping: f32,
    pub min_speed: f32,
    pub jitter: f32,
    pub link_distance: f32,
    pub link_alpha: f32,
    pub max_links: usize,
    pub link_width: f32,
    pub color: Rgb,
    pub canvas_opacity: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            capability: PointerCapability::Fine,
            coarse_count: COARSE_PARTICLE_COUNT,
            fine_count: FINE_PARTICLE_COUNT,
            spawn_speed: SPAWN_SPEED,
            size_range: SIZE_MIN..SIZE_MAX,
            opacity_range: OPACITY_MIN..OPACITY_MAX,
            pointer_radius: POINTER_RADIUS,
            pointer_strength: POINTER_STRENGTH,
            pointer_force: PointerForce::Attract,
            damping: DAMPING,
            min_speed: MIN_SPEED,
            jitter: JITTER,
            link_distance: LINK_DISTANCE,
            link_alpha: LINK_ALPHA,
            max_links: MAX_LINKS_PER_PARTICLE,
            link_width: LINK_WIDTH,
            color: Rgb::default(),
            canvas_opacity: CANVAS_OPACITY,
        }
    }
}

impl FieldConfig {
    pub fn for_capability(capability: PointerCapability) -> Self {
        Self {
            capability,
            ..Self::default()
        }
    }

    /// Number of particles kept alive for the resolved capability.
    #[inline]
    pub fn particle_count(&self) -> usize {
        match self.capability {
            PointerCapability::Coarse => self.coarse_count,
            PointerCapability::Fine => self.fine_count,
        }
    }

    /// Overwrite every field the host page supplied. The capability is never
    /// overridable; it comes from the device query.
    pub fn apply(&mut self, options: &FieldOptions) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = options.$field { self.$field = v; })*
            };
        }
        take!(
            coarse_count,
            fine_count,
            spawn_speed,
            pointer_radius,
            pointer_strength,
            pointer_force,
            damping,
            min_speed,
            jitter,
            link_distance,
            link_alpha,
            max_links,
            link_width,
            color,
            canvas_opacity,
        );
        if let Some([start, end]) = options.size_range {
            self.size_range = start..end;
        }
        if let Some([start, end]) = options.opacity_range {
            self.opacity_range = start..end;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count() == 0 {
            return Err(ConfigError::EmptyField(self.capability));
        }
        check_at_most("coarse_count", self.coarse_count, MAX_PARTICLE_COUNT)?;
        check_at_most("fine_count", self.fine_count, MAX_PARTICLE_COUNT)?;
        check_at_most("max_links", self.max_links, MAX_LINKS_LIMIT)?;
        check_range("size", &self.size_range)?;
        check_range("opacity", &self.opacity_range)?;
        check_alpha("opacity range end", self.opacity_range.end)?;
        check_non_negative("spawn_speed", self.spawn_speed)?;
        check_positive("pointer_radius", self.pointer_radius)?;
        check_non_negative("pointer_strength", self.pointer_strength)?;
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::Damping(self.damping));
        }
        check_non_negative("min_speed", self.min_speed)?;
        check_non_negative("jitter", self.jitter)?;
        check_positive("link_distance", self.link_distance)?;
        check_alpha("link_alpha", self.link_alpha)?;
        check_positive("link_width", self.link_width)?;
        check_alpha("canvas_opacity", self.canvas_opacity)?;
        Ok(())
    }
}

fn check_range(name: &'static str, r: &Range<f32>) -> Result<(), ConfigError> {
    if r.start.is_finite() && r.end.is_finite() && r.start >= 0.0 && r.start < r.end {
        Ok(())
    } else {
        Err(ConfigError::BadRange {
            name,
            start: r.start,
            end: r.end,
        })
    }
}

fn check_at_most(name: &'static str, value: usize, max: usize) -> Result<(), ConfigError> {
    if value <= max {
        Ok(())
    } else {
        Err(ConfigError::TooMany { name, value, max })
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn check_non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn check_alpha(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Alpha { name, value })
    }
}

/// Host-page overrides for [`FieldConfig`], deserialized from a plain JS object.
///
/// Every field is optional; unknown keys are rejected so typos surface as
/// errors instead of being silently ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FieldOptions {
    pub coarse_count: Option<usize>,
    pub fine_count: Option<usize>,
    pub spawn_speed: Option<f32>,
    pub size_range: Option<[f32; 2]>,
    pub opacity_range: Option<[f32; 2]>,
    pub pointer_radius: Option<f32>,
    pub pointer_strength: Option<f32>,
    pub pointer_force: Option<PointerForce>,
    pub damping: Option<f32>,
    pub min_speed: Option<f32>,
    pub jitter: Option<f32>,
    pub link_distance: Option<f32>,
    pub link_alpha: Option<f32>,
    pub max_links: Option<usize>,
    pub link_width: Option<f32>,
    pub color: Option<Rgb>,
    pub canvas_opacity: Option<f32>,
}
