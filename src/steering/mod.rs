//! Simple steering controllers built on the scene graph's rotate/translate primitives.

mod boid;

pub use boid::BoidConfig;
