/// Particle field tuning constants.
///
/// Distances and speeds are in canvas pixels (per frame for speeds); alphas
/// are in the 0..1 range used by `rgba()`.
// Particle count per pointer capability
pub const COARSE_PARTICLE_COUNT: usize = 30;
pub const FINE_PARTICLE_COUNT: usize = 60;
pub const MAX_PARTICLE_COUNT: usize = 2_000; // upper bound accepted from host-page options

// Spawn ranges
pub const SPAWN_SPEED: f32 = 0.25; // each velocity axis drawn from [-SPAWN_SPEED, SPAWN_SPEED]
pub const SIZE_MIN: f32 = 1.0;
pub const SIZE_MAX: f32 = 3.0;
pub const OPACITY_MIN: f32 = 0.2;
pub const OPACITY_MAX: f32 = 0.7;

// Pointer interaction
pub const POINTER_RADIUS: f32 = 200.0;
pub const POINTER_STRENGTH: f32 = 0.02;

// Motion shaping
pub const DAMPING: f32 = 0.99; // velocity multiplier applied every frame
pub const MIN_SPEED: f32 = 0.1; // per-axis speed below which jitter is injected
pub const JITTER: f32 = 0.05; // jitter drawn from [-JITTER, JITTER)

// Connections
pub const LINK_DISTANCE: f32 = 150.0;
pub const LINK_ALPHA: f32 = 0.15; // alpha of a zero-length link
pub const MAX_LINKS_PER_PARTICLE: usize = 3;
pub const MAX_LINKS_LIMIT: usize = 16; // upper bound accepted from host-page options
pub const LINK_WIDTH: f32 = 0.5;

// Appearance
pub const PARTICLE_RGB: [u8; 3] = [0, 242, 255];
pub const CANVAS_OPACITY: f32 = 0.6;

// Mounting
pub const CANVAS_ELEMENT_ID: &str = "particle-canvas";
pub const COARSE_POINTER_QUERY: &str = "(pointer: coarse)";

// Debug frame timing is logged once per this many frames
pub const FRAME_STATS_INTERVAL: u32 = 600;
