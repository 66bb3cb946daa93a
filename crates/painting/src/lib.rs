//! Texpaint painting core - raster surfaces painted through pluggable projections
//!
//! This crate provides everything between a host's input events and a
//! persisted drawing:
//! - [`surface`] - CPU RGBA8 surface with background, brush and stroke state
//! - [`stroke`] - Stroke state machine (dot on start, gap-free lines after)
//! - [`brush`] - Disc stamps, line stepping and UV to pixel mapping
//! - [`projection`] - Pointer -> UV strategies (canvas, mesh ray, fingertip ray)
//! - [`raycast`] / [`camera`] - Minimal ray casting against triangle meshes
//! - [`codec`] / [`store`] - JSON RGB payload in an injected key-value store
//! - [`pipeline`] - Complete painting pipeline

pub mod brush;
pub mod camera;
pub mod codec;
pub mod constants;
pub mod pipeline;
pub mod projection;
pub mod raycast;
pub mod store;
pub mod stroke;
pub mod surface;
pub mod types;

pub use brush::*;
pub use camera::*;
pub use codec::*;
pub use constants::*;
pub use pipeline::*;
pub use projection::*;
pub use raycast::*;
pub use store::*;
pub use stroke::*;
pub use surface::*;
pub use types::*;
