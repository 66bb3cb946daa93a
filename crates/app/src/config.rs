//! Host options and projection mode selection

use std::path::PathBuf;

/// How pointer samples reach the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    /// Flat canvas region in a UI layout (default)
    #[default]
    Canvas,
    /// Camera ray onto a textured quad
    Mesh,
    /// Tracked fingertip pressed against a quad
    Fingertip,
}

impl ProjectionMode {
    /// Parse from environment variable TEXPAINT_PROJECTION
    pub fn from_env() -> Self {
        Self::parse(std::env::var("TEXPAINT_PROJECTION").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("mesh") => Self::Mesh,
            Some("fingertip") => Self::Fingertip,
            _ => Self::Canvas,
        }
    }
}

/// Command line: `texpaint [settings.json] [out-dir]`
#[derive(Debug, Clone)]
pub struct HostOptions {
    pub settings: PathBuf,
    pub out_dir: PathBuf,
    pub mode: ProjectionMode,
}

impl HostOptions {
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        let settings = args.next().unwrap_or_else(|| "texpaint.json".to_string());
        let out_dir = args.next().unwrap_or_else(|| "texpaint-out".to_string());
        Self {
            settings: PathBuf::from(settings),
            out_dir: PathBuf::from(out_dir),
            mode: ProjectionMode::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(ProjectionMode::parse(None), ProjectionMode::Canvas);
        assert_eq!(ProjectionMode::parse(Some("mesh")), ProjectionMode::Mesh);
        assert_eq!(ProjectionMode::parse(Some("fingertip")), ProjectionMode::Fingertip);
        assert_eq!(ProjectionMode::parse(Some("bogus")), ProjectionMode::Canvas);
    }

    #[test]
    fn test_args_defaults() {
        let options = HostOptions::from_args(std::iter::empty());
        assert_eq!(options.settings, PathBuf::from("texpaint.json"));
        assert_eq!(options.out_dir, PathBuf::from("texpaint-out"));
    }

    #[test]
    fn test_args_positional() {
        let args = ["a.json".to_string(), "out".to_string()];
        let options = HostOptions::from_args(args.into_iter());
        assert_eq!(options.settings, PathBuf::from("a.json"));
        assert_eq!(options.out_dir, PathBuf::from("out"));
    }
}
