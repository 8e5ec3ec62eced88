//! Ground surface configuration.
//!
//! The original tunables for turf behavior lived in mutable globals; here
//! they are an explicit [`SurfaceProperties`] value threaded into the
//! friction and bounce code, so tests can vary surface conditions without
//! shared state.
//!
//! Named presets load from YAML files:
//!
//! ```text
//! materials/
//! └── surfaces/
//!     ├── fairway.yaml
//!     ├── green.yaml
//!     └── firm_links.yaml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Physical properties of the turf the ball lands on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceProperties {
    pub name: String,

    /// Ground firmness constant scaling the effective impact-plane tilt.
    /// Softer ground (larger value) swallows more of the bounce.
    pub firmness: f64,

    /// Coulomb friction coefficient acting through impact
    pub friction: f64,

    /// Rolling friction coefficient.
    /// For a green this is 0.784 divided by the stimpmeter distance in
    /// feet; the default assumes a stimp of 6.
    pub rolling_friction: f64,
}

impl SurfaceProperties {
    /// A typical fairway lie.
    pub fn fairway() -> Self {
        Self {
            name: "Fairway".to_string(),
            firmness: 0.0186477,
            friction: 0.4,
            rolling_friction: 0.131,
        }
    }
}

impl Default for SurfaceProperties {
    fn default() -> Self {
        Self::fairway()
    }
}

/// Error type for surface loading operations.
#[derive(Debug)]
pub enum SurfaceError {
    IoError(std::io::Error),
    ParseError(serde_yaml::Error),
    NotFound(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::IoError(e) => write!(f, "IO error: {}", e),
            SurfaceError::ParseError(e) => write!(f, "YAML parse error: {}", e),
            SurfaceError::NotFound(name) => write!(f, "Surface not found: {}", name),
        }
    }
}

impl std::error::Error for SurfaceError {}

impl From<std::io::Error> for SurfaceError {
    fn from(err: std::io::Error) -> Self {
        SurfaceError::IoError(err)
    }
}

impl From<serde_yaml::Error> for SurfaceError {
    fn from(err: serde_yaml::Error) -> Self {
        SurfaceError::ParseError(err)
    }
}

/// Surface preset loader with a configurable base directory.
pub struct SurfaceLoader {
    base_path: PathBuf,
}

impl SurfaceLoader {
    /// Create a new loader. The base path should contain a `surfaces/`
    /// subdirectory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a surface by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = SurfaceLoader::new("materials");
    /// let links = loader.load("firm_links")?;
    /// ```
    pub fn load(&self, name: &str) -> Result<SurfaceProperties, SurfaceError> {
        let path = self
            .base_path
            .join("surfaces")
            .join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(SurfaceError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let props: SurfaceProperties = serde_yaml::from_str(&contents)?;
        Ok(props)
    }

    /// List all available surface presets.
    pub fn list(&self) -> Result<Vec<String>, SurfaceError> {
        let path = self.base_path.join("surfaces");
        if !path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name.ends_with(".yaml") {
                names.push(name.trim_end_matches(".yaml").to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn get_materials_path() -> PathBuf {
        let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(manifest_dir).join("..").join("materials")
    }

    #[test]
    fn test_default_is_fairway() {
        let surface = SurfaceProperties::default();
        assert_eq!(surface.name, "Fairway");
        assert!((surface.friction - 0.4).abs() < 1e-12);
        assert!((surface.rolling_friction - 0.131).abs() < 1e-12);
    }

    #[test]
    fn test_load_existing_surface() {
        let loader = SurfaceLoader::new(get_materials_path());
        let result = loader.load("fairway");

        assert!(result.is_ok(), "Should load fairway: {:?}", result.err());
        let surface = result.unwrap();
        assert_eq!(surface.name, "Fairway");
        assert!(surface.firmness > 0.0);
        assert!(surface.friction > 0.0);
    }

    #[test]
    fn test_load_nonexistent_surface() {
        let loader = SurfaceLoader::new(get_materials_path());
        let result = loader.load("nonexistent_surface_xyz");

        assert!(result.is_err());
        match result {
            Err(SurfaceError::NotFound(name)) => {
                assert_eq!(name, "nonexistent_surface_xyz");
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_list_surfaces() {
        let loader = SurfaceLoader::new(get_materials_path());
        let result = loader.list();

        assert!(result.is_ok());
        let surfaces = result.unwrap();
        assert!(surfaces.contains(&"fairway".to_string()));
        assert!(surfaces.contains(&"green".to_string()));
    }

    #[test]
    fn test_loaded_green_is_softer_rolling() {
        // Greens are cut shorter but slower turf has more rolling friction
        // than the firm links preset.
        let loader = SurfaceLoader::new(get_materials_path());
        let green = loader.load("green").unwrap();
        let links = loader.load("firm_links").unwrap();
        assert!(green.rolling_friction > links.rolling_friction);
        assert!(links.firmness < green.firmness);
    }
}
