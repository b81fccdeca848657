use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default)]
    pub bounds: ColumnBounds,
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub noise: Noise,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            bounds: ColumnBounds::default(),
            height: Height::default(),
            noise: Noise::default(),
        }
    }
}

fn default_seed() -> i32 {
    1337
}

/// Half-open rectangle of generated columns: `min_x <= x < max_x`, same for z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct ColumnBounds {
    #[serde(default = "default_min_xz")]
    pub min_x: i32,
    #[serde(default = "default_max_xz")]
    pub max_x: i32,
    #[serde(default = "default_min_xz")]
    pub min_z: i32,
    #[serde(default = "default_max_xz")]
    pub max_z: i32,
}
fn default_min_xz() -> i32 {
    -10
}
fn default_max_xz() -> i32 {
    10
}
impl Default for ColumnBounds {
    fn default() -> Self {
        Self {
            min_x: default_min_xz(),
            max_x: default_max_xz(),
            min_z: default_min_xz(),
            max_z: default_max_xz(),
        }
    }
}

impl ColumnBounds {
    pub const fn new(min_x: i32, max_x: i32, min_z: i32, max_z: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Single column at `(x, z)`.
    pub const fn column(x: i32, z: i32) -> Self {
        Self::new(x, x + 1, z, z + 1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max_x <= self.min_x || self.max_z <= self.min_z
    }

    #[inline]
    pub fn contains(&self, x: i32, z: i32) -> bool {
        x >= self.min_x && x < self.max_x && z >= self.min_z && z < self.max_z
    }

    pub fn column_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.max_x - self.min_x) as usize * (self.max_z - self.min_z) as usize
    }

    /// Columns in x-major order.
    pub fn columns(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (min_z, max_z) = (self.min_z, self.max_z);
        (self.min_x..self.max_x).flat_map(move |x| (min_z..max_z).map(move |z| (x, z)))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    #[serde(default = "default_base")]
    pub base: i32,
    #[serde(default = "default_min")]
    pub min: i32,
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
}
fn default_base() -> i32 {
    5
}
fn default_min() -> i32 {
    0
}
fn default_amplitude() -> f32 {
    4.0
}
fn default_scale() -> f32 {
    0.05
}
impl Default for Height {
    fn default() -> Self {
        Self {
            base: default_base(),
            min: default_min(),
            amplitude: default_amplitude(),
            scale: default_scale(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Noise {
    #[serde(default = "d_oct")]
    pub octaves: u32,
    #[serde(default = "d_pers")]
    pub persistence: f32,
    #[serde(default = "d_lac")]
    pub lacunarity: f32,
}
fn d_oct() -> u32 {
    4
}
fn d_pers() -> f32 {
    0.5
}
fn d_lac() -> f32 {
    2.0
}
impl Default for Noise {
    fn default() -> Self {
        Self {
            octaves: d_oct(),
            persistence: d_pers(),
            lacunarity: d_lac(),
        }
    }
}

// Flattened params used in tight loops (snapshot of config)
#[derive(Clone, Debug, PartialEq)]
pub struct WorldGenParams {
    pub seed: i32,
    pub bounds: ColumnBounds,
    pub base_height: i32,
    pub min_height: i32,
    pub amplitude: f32,
    pub scale: f32,
    pub octaves: u32,
    pub persistence: f32,
    pub lacunarity: f32,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        Self {
            seed: cfg.seed,
            bounds: cfg.bounds,
            base_height: cfg.height.base,
            min_height: cfg.height.min,
            amplitude: cfg.height.amplitude,
            scale: cfg.height.scale,
            octaves: cfg.noise.octaves,
            persistence: cfg.noise.persistence,
            lacunarity: cfg.noise.lacunarity,
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: WorldGenConfig = toml::from_str(s)?;
        Ok(Self::from_config(&cfg))
    }
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    WorldGenParams::from_toml_str(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let p = WorldGenParams::from_toml_str("").unwrap();
        assert_eq!(p, WorldGenParams::default());
        assert_eq!(p.bounds, ColumnBounds::new(-10, 10, -10, 10));
        assert_eq!(p.base_height, 5);
        assert_eq!(p.min_height, 0);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let p = WorldGenParams::from_toml_str(
            r#"
            seed = 42
            [bounds]
            max_x = 3
            [height]
            amplitude = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(p.seed, 42);
        assert_eq!(p.bounds, ColumnBounds::new(-10, 3, -10, 10));
        assert_eq!(p.amplitude, 0.0);
        assert_eq!(p.scale, 0.05);
        assert_eq!(p.octaves, 4);
    }

    #[test]
    fn bad_types_are_reported() {
        assert!(WorldGenParams::from_toml_str("seed = \"abc\"").is_err());
    }

    #[test]
    fn bounds_iterate_every_column_once() {
        let b = ColumnBounds::new(-1, 2, 4, 6);
        let cols: Vec<_> = b.columns().collect();
        assert_eq!(cols.len(), b.column_count());
        assert_eq!(cols.len(), 6);
        assert!(cols.iter().all(|&(x, z)| b.contains(x, z)));
        assert_eq!(ColumnBounds::new(0, 0, 0, 5).column_count(), 0);
        assert_eq!(ColumnBounds::new(3, 1, 0, 5).columns().count(), 0);
    }
}
