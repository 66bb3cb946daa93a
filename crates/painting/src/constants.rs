/// Smallest brush radius in pixels.
pub const MIN_BRUSH_SIZE: i32 = 1;

/// Largest brush radius in pixels.
pub const MAX_BRUSH_SIZE: i32 = 128;

/// Brush radius a fresh surface starts with.
pub const DEFAULT_BRUSH_SIZE: i32 = 16;

/// Key the surface codec stores its payload under.
pub const STORAGE_KEY: &str = "draw";

/// Bytes per pixel in the persisted payload (RGB, alpha dropped).
pub const PAYLOAD_BYTES_PER_PIXEL: usize = 3;
