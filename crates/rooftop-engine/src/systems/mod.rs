pub mod behavior;
pub mod effects;
pub mod render;
pub mod rng;
