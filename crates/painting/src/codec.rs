//! Surface persistence: RGB payload, JSON encoding, key-value storage
//!
//! The stored value is a JSON object with exactly three fields:
//!
//! ```text
//! {"Width": 512, "Height": 512, "Pixels": [255, 255, 255, ...]}
//! ```
//!
//! `Pixels` holds `Width * Height` RGB triplets in buffer order (row 0 first).
//! Alpha is not stored; restored pixels are fully opaque. The shape is kept
//! byte-compatible with drawings saved by earlier hosts.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::{PAYLOAD_BYTES_PER_PIXEL, STORAGE_KEY};
use crate::store::{KeyValueStore, StoreError};
use crate::surface::RasterSurface;
use crate::types::Rgba8;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Surface has no pixel buffer yet")]
    Uninitialized,
    #[error("Failed to serialize payload: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why no payload could be loaded
///
/// Every variant means "nothing to restore"; a missing save is the normal
/// first-run state.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("No saved payload under key {0:?}")]
    Missing(String),
    #[error("Saved payload under key {0:?} is empty")]
    Empty(String),
    #[error("Saved payload is not well-formed: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("Payload declares {width}x{height} but carries {actual} pixel bytes (expected {expected})")]
    PixelCount {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Serializable snapshot of a surface's color channels
///
/// Deserialization goes through the same pixel count check as
/// [`TextureData::from_json`], so a decoded value always matches its
/// declared dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTextureData")]
pub struct TextureData {
    #[serde(rename = "Width")]
    width: u32,
    #[serde(rename = "Height")]
    height: u32,
    /// RGB triplets, 3 bytes per pixel
    #[serde(rename = "Pixels")]
    pixels: Vec<u8>,
}

/// Payload as stored, before the pixel count is checked
#[derive(Deserialize)]
struct RawTextureData {
    #[serde(rename = "Width")]
    width: u32,
    #[serde(rename = "Height")]
    height: u32,
    #[serde(rename = "Pixels")]
    pixels: Vec<u8>,
}

impl TryFrom<RawTextureData> for TextureData {
    type Error = DecodeError;

    fn try_from(raw: RawTextureData) -> Result<Self, Self::Error> {
        let data = Self {
            width: raw.width,
            height: raw.height,
            pixels: raw.pixels,
        };
        data.validate()?;
        Ok(data)
    }
}

impl TextureData {
    /// Snapshot `pixels` (row-major, `width * height` long), dropping alpha
    ///
    /// A short slice leaves the remaining pixels black; extra pixels are
    /// ignored.
    pub fn from_pixels(width: u32, height: u32, pixels: &[Rgba8]) -> Self {
        let count = width as usize * height as usize;
        let mut bytes = vec![0u8; count * PAYLOAD_BYTES_PER_PIXEL];
        for (dst, src) in bytes
            .chunks_exact_mut(PAYLOAD_BYTES_PER_PIXEL)
            .zip(pixels.iter().take(count))
        {
            dst.copy_from_slice(&src.rgb());
        }
        Self {
            width,
            height,
            pixels: bytes,
        }
    }

    /// Snapshot a surface. `None` if it has no buffer yet.
    pub fn from_surface(surface: &RasterSurface) -> Option<Self> {
        surface
            .buffer()
            .map(|pixels| Self::from_pixels(surface.width(), surface.height(), pixels))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB bytes
    pub fn pixel_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Expand back to RGBA with alpha 255
    pub fn to_pixels(&self) -> Vec<Rgba8> {
        self.pixels
            .chunks_exact(PAYLOAD_BYTES_PER_PIXEL)
            .map(|c| Rgba8::opaque(c[0], c[1], c[2]))
            .collect()
    }

    /// Encode as the stored JSON string
    pub fn to_json(&self) -> Result<String, EncodeError> {
        serde_json::to_string(self).map_err(EncodeError::Serialize)
    }

    /// Decode and validate a stored JSON string
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        let raw: RawTextureData = serde_json::from_str(json).map_err(DecodeError::Malformed)?;
        Self::try_from(raw)
    }

    fn validate(&self) -> Result<(), DecodeError> {
        // Dimensions come from stored text and may be arbitrarily large
        let expected = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|count| count.checked_mul(PAYLOAD_BYTES_PER_PIXEL));
        match expected {
            Some(expected) if expected == self.pixels.len() => Ok(()),
            _ => Err(DecodeError::PixelCount {
                width: self.width,
                height: self.height,
                expected: expected.unwrap_or(usize::MAX),
                actual: self.pixels.len(),
            }),
        }
    }
}

/// Saves and restores one surface through a single key of a [`KeyValueStore`]
pub struct SurfaceCodec<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SurfaceCodec<S> {
    /// Codec using the default `"draw"` key
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Persist a surface's RGB channels, returning the stored payload
    pub fn save(&mut self, surface: &RasterSurface) -> Result<TextureData, EncodeError> {
        let data = TextureData::from_surface(surface).ok_or(EncodeError::Uninitialized)?;
        let json = data.to_json()?;
        self.store.set(&self.key, json)?;
        info!(
            "Saved {}x{} surface under key {:?}",
            data.width, data.height, self.key
        );
        Ok(data)
    }

    /// Read back the stored payload
    pub fn load(&self) -> Result<TextureData, DecodeError> {
        let json = self
            .store
            .get(&self.key)?
            .ok_or_else(|| DecodeError::Missing(self.key.clone()))?;
        if json.trim().is_empty() {
            return Err(DecodeError::Empty(self.key.clone()));
        }
        let data = TextureData::from_json(&json)?;
        info!(
            "Loaded {}x{} payload from key {:?}",
            data.width, data.height, self.key
        );
        Ok(data)
    }

    /// Load and apply the stored payload to `surface`
    ///
    /// Returns whether pixels were restored. A missing or unreadable save and a
    /// size mismatch both leave the surface untouched.
    pub fn restore(&self, surface: &mut RasterSurface) -> bool {
        match self.load() {
            Ok(data) => surface.set_buffer(&data),
            Err(e) => {
                debug!("Nothing restored: {}", e);
                false
            }
        }
    }

    /// Remove the stored payload. Succeeds when nothing is stored.
    pub fn delete(&mut self) -> Result<(), StoreError> {
        self.store.delete(&self.key)?;
        info!("Deleted saved surface under key {:?}", self.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use glam::Vec2;

    fn scribbled_surface() -> RasterSurface {
        let mut surface = RasterSurface::new(24, 16).unwrap();
        surface.set_background(Rgba8::new(250, 240, 230, 128));
        surface.set_brush_color(Rgba8::new(12, 34, 56, 200));
        surface.set_brush_size(3);
        surface.start_stroke(Vec2::new(0.1, 0.1));
        surface.continue_stroke(Vec2::new(0.9, 0.6));
        surface.set_brush_color(Rgba8::RED);
        surface.continue_stroke(Vec2::new(0.4, 0.95));
        surface.end_stroke();
        surface
    }

    fn rgb(surface: &RasterSurface) -> Vec<[u8; 3]> {
        surface.buffer().unwrap().iter().map(|p| p.rgb()).collect()
    }

    #[test]
    fn test_json_field_names() {
        let data = TextureData::from_pixels(1, 2, &[Rgba8::new(1, 2, 3, 4), Rgba8::BLUE]);
        let json = data.to_json().unwrap();
        assert_eq!(json, r#"{"Width":1,"Height":2,"Pixels":[1,2,3,0,0,255]}"#);
    }

    #[test]
    fn test_decode_existing_payload() {
        let json = r#"{"Width":2,"Height":1,"Pixels":[255,0,0,0,255,0]}"#;
        let data = TextureData::from_json(json).unwrap();
        assert_eq!(data.width(), 2);
        assert_eq!(data.height(), 1);
        assert_eq!(data.to_pixels(), vec![Rgba8::RED, Rgba8::opaque(0, 255, 0)]);
    }

    #[test]
    fn test_from_pixels_pads_short_input() {
        let data = TextureData::from_pixels(2, 2, &[Rgba8::WHITE]);
        assert_eq!(data.pixel_bytes().len(), 12);
        assert_eq!(&data.pixel_bytes()[..6], &[255, 255, 255, 0, 0, 0]);
    }

    #[test]
    fn test_save_load_restore_roundtrip() {
        let source = scribbled_surface();
        let mut codec = SurfaceCodec::new(MemoryStore::new());
        let saved = codec.save(&source).unwrap();
        assert!(codec.store().contains("draw"));

        let loaded = codec.load().unwrap();
        assert_eq!(loaded, saved);

        let mut target = RasterSurface::new(24, 16).unwrap();
        target.set_background(Rgba8::BLACK);
        assert!(codec.restore(&mut target));
        assert_eq!(rgb(&target), rgb(&source));
        assert!(target.buffer().unwrap().iter().all(|p| p.a == 255));
    }

    #[test]
    fn test_restore_size_mismatch_leaves_buffer() {
        let mut codec = SurfaceCodec::new(MemoryStore::new());
        codec.save(&scribbled_surface()).unwrap();

        let mut target = RasterSurface::new(16, 24).unwrap();
        target.set_background(Rgba8::BLUE);
        let before = target.as_bytes().unwrap().to_vec();

        assert!(!codec.restore(&mut target));
        assert_eq!(target.as_bytes().unwrap(), before.as_slice());
    }

    #[test]
    fn test_load_missing() {
        let codec = SurfaceCodec::new(MemoryStore::new());
        assert!(matches!(codec.load(), Err(DecodeError::Missing(key)) if key == "draw"));
    }

    #[test]
    fn test_load_empty() {
        let mut store = MemoryStore::new();
        store.set("draw", String::new()).unwrap();
        let codec = SurfaceCodec::new(store);
        assert!(matches!(codec.load(), Err(DecodeError::Empty(_))));
    }

    #[test]
    fn test_load_malformed() {
        let mut store = MemoryStore::new();
        store.set("draw", "{\"Width\": 2, \"Height\":".to_string()).unwrap();
        let codec = SurfaceCodec::new(store);
        assert!(matches!(codec.load(), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_load_wrong_pixel_count() {
        let mut store = MemoryStore::new();
        store
            .set("draw", r#"{"Width":2,"Height":2,"Pixels":[1,2,3]}"#.to_string())
            .unwrap();
        let codec = SurfaceCodec::new(store);
        assert!(matches!(
            codec.load(),
            Err(DecodeError::PixelCount {
                expected: 12,
                actual: 3,
                ..
            })
        ));

        let mut surface = RasterSurface::new(2, 2).unwrap();
        assert!(!codec.restore(&mut surface));
    }

    #[test]
    fn test_load_overflowing_dimensions() {
        let mut store = MemoryStore::new();
        store
            .set(
                "draw",
                r#"{"Width":4294967295,"Height":4294967295,"Pixels":[]}"#.to_string(),
            )
            .unwrap();
        let codec = SurfaceCodec::new(store);
        assert!(matches!(
            codec.load(),
            Err(DecodeError::PixelCount { actual: 0, .. })
        ));

        let mut surface = RasterSurface::new(2, 2).unwrap();
        assert!(!codec.restore(&mut surface));
        assert!(surface.buffer().is_none());
    }

    #[test]
    fn test_deserialize_checks_pixel_count() {
        let short = r#"{"Width":2,"Height":2,"Pixels":[1,2,3]}"#;
        assert!(serde_json::from_str::<TextureData>(short).is_err());

        let exact = r#"{"Width":1,"Height":1,"Pixels":[1,2,3]}"#;
        let data: TextureData = serde_json::from_str(exact).unwrap();
        let mut surface = RasterSurface::new(1, 1).unwrap();
        assert!(surface.set_buffer(&data));
        assert_eq!(surface.pixel(0, 0), Some(Rgba8::opaque(1, 2, 3)));
    }

    #[test]
    fn test_save_uninitialized_surface() {
        let mut codec = SurfaceCodec::new(MemoryStore::new());
        let surface = RasterSurface::new(4, 4).unwrap();
        assert!(matches!(codec.save(&surface), Err(EncodeError::Uninitialized)));
        assert!(!codec.store().contains("draw"));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut codec = SurfaceCodec::new(MemoryStore::new());
        codec.delete().unwrap();

        codec.save(&scribbled_surface()).unwrap();
        codec.delete().unwrap();
        assert!(matches!(codec.load(), Err(DecodeError::Missing(_))));
        codec.delete().unwrap();
    }

    #[test]
    fn test_custom_key_and_borrowed_store() {
        let mut store = MemoryStore::new();
        {
            let mut codec = SurfaceCodec::with_key(&mut store, "sketch");
            assert_eq!(codec.key(), "sketch");
            codec.save(&scribbled_surface()).unwrap();
        }
        assert!(store.contains("sketch"));
        assert!(!store.contains("draw"));
    }
}
