pub mod config;
pub mod draw;
pub mod field;
pub mod particle;

pub use config::*;
pub use draw::*;
pub use field::*;
pub use particle::*;
