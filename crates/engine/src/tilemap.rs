//! Tile-map loading from Tiled-style JSON exports.
//!
//! Only tile layers matter here: each carries `width`, `height` and a row-major
//! `data` array of tile ids. Layers without `data` (object groups, image layers)
//! are skipped, and every other field in the file is ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TilemapError {
    #[error("failed to read tile map {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tile map json at {json_path}: {source}")]
    Parse {
        json_path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("tile layer {layer_index} count mismatch: expected {expected} ids for {width}x{height}, got {actual}")]
    TileCountMismatch {
        layer_index: usize,
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("tile map has no tile layers")]
    NoLayers,
}

#[derive(Debug, Deserialize)]
struct TilemapJson {
    layers: Vec<LayerJson>,
}

#[derive(Debug, Deserialize)]
struct LayerJson {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    data: Option<Vec<u32>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl Layer {
    pub fn new(width: u32, height: u32, data: Vec<u32>) -> Result<Self, TilemapError> {
        Self::validated(0, width, height, data)
    }

    fn validated(
        layer_index: usize,
        width: u32,
        height: u32,
        data: Vec<u32>,
    ) -> Result<Self, TilemapError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(TilemapError::TileCountMismatch {
                layer_index,
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u32] {
        &self.data
    }

    pub fn tile_at(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tilemap {
    layers: Vec<Layer>,
}

impl Tilemap {
    pub fn new(layers: Vec<Layer>) -> Result<Self, TilemapError> {
        if layers.is_empty() {
            return Err(TilemapError::NoLayers);
        }
        Ok(Self { layers })
    }

    pub fn load(path: &Path) -> Result<Self, TilemapError> {
        let raw = fs::read_to_string(path).map_err(|source| TilemapError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, TilemapError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let parsed: TilemapJson = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|error| {
                let json_path = error.path().to_string();
                TilemapError::Parse {
                    json_path,
                    source: error.into_inner(),
                }
            })?;

        let layers = parsed
            .layers
            .into_iter()
            .enumerate()
            .filter_map(|(index, layer)| {
                let data = layer.data?;
                Some(Layer::validated(index, layer.width, layer.height, data))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(layers)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn first_layer(&self) -> &Layer {
        &self.layers[0]
    }

    pub fn pixel_width(&self, tile_size: u32) -> f64 {
        self.first_layer().width() as f64 * tile_size as f64
    }

    pub fn pixel_height(&self, tile_size: u32) -> f64 {
        self.first_layer().height() as f64 * tile_size as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SPAWN_LIKE: &str = r#"{
        "compressionlevel": -1,
        "height": 2,
        "width": 3,
        "tilewidth": 16,
        "layers": [
            { "id": 1, "name": "Ground", "type": "tilelayer", "width": 3, "height": 2,
              "data": [1, 2, 3, 23, 24, 0], "opacity": 1, "visible": true, "x": 0, "y": 0 },
            { "id": 2, "name": "Spawns", "type": "objectgroup", "objects": [] },
            { "id": 3, "name": "Decor", "type": "tilelayer", "width": 3, "height": 2,
              "data": [0, 0, 0, 0, 45, 0] }
        ]
    }"#;

    #[test]
    fn parses_tile_layers_in_order_and_skips_object_layers() {
        let map = Tilemap::from_json_str(SPAWN_LIKE).expect("map");

        assert_eq!(map.layers().len(), 2);
        let ground = map.first_layer();
        assert_eq!((ground.width(), ground.height()), (3, 2));
        assert_eq!(ground.data(), &[1, 2, 3, 23, 24, 0]);
        assert_eq!(ground.tile_at(0, 1), Some(23));
        assert_eq!(ground.tile_at(3, 0), None);
        assert_eq!(map.layers()[1].tile_at(1, 1), Some(45));
    }

    #[test]
    fn pixel_extent_comes_from_first_layer() {
        let map = Tilemap::from_json_str(SPAWN_LIKE).expect("map");
        assert_eq!(map.pixel_width(16), 48.0);
        assert_eq!(map.pixel_height(16), 32.0);
    }

    #[test]
    fn rejects_layer_with_wrong_tile_count() {
        let raw = r#"{ "layers": [
            { "width": 2, "height": 2, "data": [1, 1, 1, 1] },
            { "width": 2, "height": 2, "data": [1, 1, 1] }
        ] }"#;

        let error = Tilemap::from_json_str(raw).unwrap_err();
        assert!(matches!(
            error,
            TilemapError::TileCountMismatch {
                layer_index: 1,
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn rejects_map_without_tile_layers() {
        let error = Tilemap::from_json_str(r#"{ "layers": [ { "objects": [] } ] }"#).unwrap_err();
        assert!(matches!(error, TilemapError::NoLayers));
        assert!(matches!(Tilemap::new(Vec::new()), Err(TilemapError::NoLayers)));
    }

    #[test]
    fn parse_error_reports_json_path() {
        let raw = r#"{ "layers": [ { "width": 1, "height": 1, "data": [-4] } ] }"#;
        let error = Tilemap::from_json_str(raw).unwrap_err();
        match error {
            TilemapError::Parse { json_path, .. } => assert_eq!(json_path, "layers[0].data[0]"),
            other => panic!("unexpected error: {other}"),
        }

        let missing = Tilemap::from_json_str("{}").unwrap_err();
        assert!(matches!(missing, TilemapError::Parse { .. }));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("spawn.json");
        fs::write(&path, SPAWN_LIKE).expect("write");

        let map = Tilemap::load(&path).expect("load");
        assert_eq!(map.first_layer().width(), 3);

        let error = Tilemap::load(&temp.path().join("missing.json")).unwrap_err();
        assert!(matches!(error, TilemapError::ReadFile { .. }));
        assert!(error.to_string().contains("missing.json"));
    }
}
