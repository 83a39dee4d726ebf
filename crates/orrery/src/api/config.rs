use serde::{Deserialize, Serialize};

/// Engine configuration, provided by the host alongside the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Fixed timestep in seconds for the animation clock (default: 1/60).
    pub fixed_dt: f32,
    /// Samples per distance unit of semi-major axis when a body gives no
    /// explicit resolution (default: 1.0).
    pub orbit_speed_scale: f64,
    /// Lower bound on derived orbit resolution (default: 64).
    pub min_samples: usize,
    /// Upper bound on any orbit resolution (default: 65536). Derived
    /// resolutions are clamped to it; explicit ones above it are rejected.
    pub max_samples: usize,
    /// Divisor in `spin = radius / spin_scale × spin_speed` (default: 1.0).
    pub spin_scale: f64,
    /// Maximum bodies in the wire buffer (default: 64).
    pub max_bodies: usize,
    /// Maximum orbit-line vertices in the wire buffer (default: 65536).
    pub max_path_vertices: usize,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            orbit_speed_scale: 1.0,
            min_samples: 64,
            max_samples: 65536,
            spin_scale: 1.0,
            max_bodies: 64,
            max_path_vertices: 65536,
        }
    }
}

impl OrreryConfig {
    /// Parse a config from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = OrreryConfig::from_json(r#"{ "orbit_speed_scale": 4.0 }"#).unwrap();
        assert_eq!(config.orbit_speed_scale, 4.0);
        assert_eq!(config.min_samples, 64);
        assert_eq!(config.max_samples, 65536);
        assert_eq!(config, OrreryConfig { orbit_speed_scale: 4.0, ..OrreryConfig::default() });
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(OrreryConfig::from_json("{ orbit_speed_scale: }").is_err());
    }
}
