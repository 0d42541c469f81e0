//! Viewing camera and pointer projection.
//!
//! The particle shader repels points around a world-space mouse position;
//! [`Camera::pointer_to_world`] turns a pixel coordinate into that position.

mod core;

pub use self::core::Camera;
