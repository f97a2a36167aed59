pub mod animation;
pub mod collectible;
pub mod enemy;
pub mod particle;
pub mod platform;
pub mod player;
