mod aabb;
mod color;

pub use aabb::Aabb;
pub use color::to_rgba8;
