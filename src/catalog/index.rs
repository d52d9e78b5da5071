//! Persisted catalog index binding each resource to its generated preview
//! image, written by the preview build tool and read back at runtime.

use crate::catalog::{
    LibraryAsset, MaterialLibrary, MaterialRef, MeshLibrary, MeshRef, ResourceKind,
    TextureLibrary, TextureRef,
};
use image::RgbaImage;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// One resource recorded by the preview builder.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IndexEntry {
    pub name: String,
    pub source: PathBuf,
    pub preview: PathBuf,
    /// Hex digest of the source file contents at build time; used to skip
    /// regeneration of unchanged previews.
    pub digest: String,
}

/// A catalog of one resource kind, as persisted on disk.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CatalogIndex {
    pub kind: ResourceKind,
    pub entries: Vec<IndexEntry>,
}

impl CatalogIndex {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn entry(&self, name: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let index: CatalogIndex = serde_json::from_str(&json)?;
        Ok(index)
    }

    /// Build a runtime mesh library from this index. Preview images that
    /// fail to load become absent previews rather than errors.
    pub fn to_mesh_library(&self) -> MeshLibrary {
        self.build_library(|name, path| MeshRef {
            name: name.to_string(),
            path: path.to_path_buf(),
        })
    }

    pub fn to_material_library(&self) -> MaterialLibrary {
        self.build_library(|name, path| MaterialRef {
            name: name.to_string(),
            path: path.to_path_buf(),
        })
    }

    pub fn to_texture_library(&self) -> TextureLibrary {
        self.build_library(|name, path| TextureRef {
            name: name.to_string(),
            path: path.to_path_buf(),
        })
    }

    fn build_library<R: Clone>(&self, make_ref: impl Fn(&str, &Path) -> R) -> LibraryAsset<R> {
        let mut library = LibraryAsset::new();
        for entry in &self.entries {
            let preview = load_preview_image(&entry.preview);
            library.add(&entry.name, make_ref(&entry.name, &entry.source), preview);
        }
        library
    }
}

fn load_preview_image(path: &Path) -> Option<RgbaImage> {
    match image::open(path) {
        Ok(image) => Some(image.to_rgba8()),
        Err(err) => {
            log::warn!("failed to load preview {}: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ResourceLibrary;

    fn sample_index() -> CatalogIndex {
        CatalogIndex {
            kind: ResourceKind::Mesh,
            entries: vec![
                IndexEntry {
                    name: "cube".to_string(),
                    source: PathBuf::from("meshes/cube.glb"),
                    preview: PathBuf::from("previews/mesh/cube.png"),
                    digest: "aa11".to_string(),
                },
                IndexEntry {
                    name: "torus".to_string(),
                    source: PathBuf::from("meshes/torus.glb"),
                    preview: PathBuf::from("previews/mesh/torus.png"),
                    digest: "bb22".to_string(),
                },
            ],
        }
    }

    #[test]
    fn index_json_round_trip() {
        let index = sample_index();
        let json = serde_json::to_string_pretty(&index).unwrap();
        let loaded: CatalogIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, index);
    }

    #[test]
    fn entry_lookup_by_name() {
        let index = sample_index();
        assert_eq!(index.entry("torus").unwrap().digest, "bb22");
        assert!(index.entry("teapot").is_none());
    }

    #[test]
    fn library_from_index_preserves_order_and_paths() {
        let index = sample_index();
        let library = index.to_mesh_library();
        assert_eq!(library.list(), ["cube", "torus"]);
        let cube = library.load("cube").unwrap();
        assert_eq!(cube.path, PathBuf::from("meshes/cube.glb"));
        // Preview files do not exist in this test; absent, not an error.
        assert!(library.load_preview("cube").is_none());
    }

    #[test]
    fn save_and_load_via_file() {
        let dir = std::env::temp_dir().join("vitrine_index_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("meshes.json");
        let index = sample_index();
        index.save_to_file(&path).unwrap();
        let loaded = CatalogIndex::load_from_file(&path).unwrap();
        assert_eq!(loaded, index);
        std::fs::remove_file(&path).ok();
    }
}
