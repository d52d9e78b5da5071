pub mod index;

use image::RgbaImage;
use std::collections::HashMap;
use std::path::PathBuf;

/// The kinds of resources the picker can browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ResourceKind {
    Mesh,
    Material,
    Texture,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Mesh,
        ResourceKind::Material,
        ResourceKind::Texture,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Mesh => "mesh",
            ResourceKind::Material => "material",
            ResourceKind::Texture => "texture",
        }
    }
}

/// Reference to a host-owned mesh resource.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MeshRef {
    pub name: String,
    pub path: PathBuf,
}

/// Reference to a host-owned material resource.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MaterialRef {
    pub name: String,
    pub path: PathBuf,
}

/// Reference to a host-owned texture resource.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextureRef {
    pub name: String,
    pub path: PathBuf,
}

/// Opaque payload carried by a carousel card.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourcePayload {
    Mesh(MeshRef),
    Material(MaterialRef),
    Texture(TextureRef),
}

impl ResourcePayload {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourcePayload::Mesh(_) => ResourceKind::Mesh,
            ResourcePayload::Material(_) => ResourceKind::Material,
            ResourcePayload::Texture(_) => ResourceKind::Texture,
        }
    }
}

/// A single item displayed by the picker carousel.
#[derive(Debug, Clone)]
pub struct CatalogItem {
    pub title: String,
    pub preview: Option<RgbaImage>,
    pub payload: ResourcePayload,
}

/// A named source of selectable resources.
///
/// Lookups return `None` for unknown names; catalog builds skip such entries
/// instead of failing.
pub trait ResourceLibrary<R> {
    /// Resource names in display order.
    fn list(&self) -> Vec<String>;
    fn load(&self, name: &str) -> Option<R>;
    fn load_preview(&self, name: &str) -> Option<RgbaImage>;
}

struct LibraryEntry<R> {
    resource: R,
    preview: Option<RgbaImage>,
}

/// In-memory resource library with insertion-ordered entries and a name
/// lookup cache.
pub struct LibraryAsset<R> {
    entries: Vec<(String, LibraryEntry<R>)>,
    name_lookup: HashMap<String, usize>,
}

pub type MeshLibrary = LibraryAsset<MeshRef>;
pub type MaterialLibrary = LibraryAsset<MaterialRef>;
pub type TextureLibrary = LibraryAsset<TextureRef>;

impl<R: Clone> LibraryAsset<R> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            name_lookup: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a resource under `name`, replacing any entry with the same name.
    pub fn add(&mut self, name: &str, resource: R, preview: Option<RgbaImage>) {
        let entry = LibraryEntry { resource, preview };
        match self.name_lookup.get(name) {
            Some(&index) => self.entries[index].1 = entry,
            None => {
                self.name_lookup.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), entry));
            }
        }
    }

    pub fn remove(&mut self, name: &str) {
        if let Some(index) = self.name_lookup.remove(name) {
            self.entries.remove(index);
            // Reindex everything after the removed slot.
            for (position, (entry_name, _)) in self.entries.iter().enumerate().skip(index) {
                self.name_lookup.insert(entry_name.clone(), position);
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.name_lookup.clear();
    }
}

impl<R: Clone> Default for LibraryAsset<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Clone> ResourceLibrary<R> for LibraryAsset<R> {
    fn list(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    fn load(&self, name: &str) -> Option<R> {
        let index = *self.name_lookup.get(name)?;
        Some(self.entries[index].1.resource.clone())
    }

    fn load_preview(&self, name: &str) -> Option<RgbaImage> {
        let index = *self.name_lookup.get(name)?;
        self.entries[index].1.preview.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh(name: &str) -> MeshRef {
        MeshRef {
            name: name.to_string(),
            path: PathBuf::from(format!("meshes/{name}.glb")),
        }
    }

    #[test]
    fn library_lists_in_insertion_order() {
        let mut library = MeshLibrary::new();
        library.add("torus", mesh("torus"), None);
        library.add("cube", mesh("cube"), None);
        library.add("sphere", mesh("sphere"), None);
        assert_eq!(library.list(), ["torus", "cube", "sphere"]);
    }

    #[test]
    fn load_by_name_and_missing_name() {
        let mut library = MeshLibrary::new();
        library.add("cube", mesh("cube"), None);
        assert_eq!(library.load("cube"), Some(mesh("cube")));
        assert_eq!(library.load("teapot"), None);
        assert!(library.load_preview("teapot").is_none());
    }

    #[test]
    fn add_with_same_name_replaces() {
        let mut library = MeshLibrary::new();
        library.add("cube", mesh("cube"), None);
        library.add(
            "cube",
            MeshRef {
                name: "cube".to_string(),
                path: PathBuf::from("meshes/cube_v2.glb"),
            },
            None,
        );
        assert_eq!(library.len(), 1);
        assert_eq!(
            library.load("cube").unwrap().path,
            PathBuf::from("meshes/cube_v2.glb")
        );
    }

    #[test]
    fn remove_keeps_lookup_consistent() {
        let mut library = MeshLibrary::new();
        library.add("a", mesh("a"), None);
        library.add("b", mesh("b"), None);
        library.add("c", mesh("c"), None);
        library.remove("b");
        assert_eq!(library.list(), ["a", "c"]);
        assert_eq!(library.load("c"), Some(mesh("c")));
        assert_eq!(library.load("b"), None);
    }

    #[test]
    fn preview_round_trip() {
        let mut library = TextureLibrary::new();
        let preview = RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 255]));
        library.add(
            "bricks",
            TextureRef {
                name: "bricks".to_string(),
                path: PathBuf::from("textures/bricks.png"),
            },
            Some(preview.clone()),
        );
        assert_eq!(library.load_preview("bricks"), Some(preview));
    }
}
