use crate::catalog::{
    CatalogItem, MaterialRef, MeshRef, ResourceKind, ResourceLibrary, ResourcePayload, TextureRef,
};
use crate::ui::carousel::Carousel;

/// A resource chosen through the picker.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Mesh(MeshRef),
    Material(MaterialRef),
    Texture(TextureRef),
}

/// Catalog-backed picker over the carousel engine.
///
/// Libraries are pluggable per resource kind; several libraries of one kind
/// may be registered and their items are concatenated in registration order.
/// Resources that fail to load are skipped rather than failing the whole
/// catalog build.
pub struct Picker {
    carousel: Carousel,
    items: Vec<CatalogItem>,
    visible: bool,
    title: String,
    mesh_libraries: Vec<Box<dyn ResourceLibrary<MeshRef>>>,
    material_libraries: Vec<Box<dyn ResourceLibrary<MaterialRef>>>,
    texture_libraries: Vec<Box<dyn ResourceLibrary<TextureRef>>>,
}

impl Picker {
    pub fn new() -> Self {
        Self {
            carousel: Carousel::new(),
            items: Vec::new(),
            visible: false,
            title: String::new(),
            mesh_libraries: Vec::new(),
            material_libraries: Vec::new(),
            texture_libraries: Vec::new(),
        }
    }

    pub fn add_mesh_library(&mut self, library: Box<dyn ResourceLibrary<MeshRef>>) {
        self.mesh_libraries.push(library);
    }

    pub fn add_material_library(&mut self, library: Box<dyn ResourceLibrary<MaterialRef>>) {
        self.material_libraries.push(library);
    }

    pub fn add_texture_library(&mut self, library: Box<dyn ResourceLibrary<TextureRef>>) {
        self.texture_libraries.push(library);
    }

    pub fn clear_libraries(&mut self) {
        self.mesh_libraries.clear();
        self.material_libraries.clear();
        self.texture_libraries.clear();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    /// Build the item list for `kind` from all registered libraries, feed it
    /// to the carousel and show the picker.
    pub fn open(&mut self, kind: ResourceKind) {
        self.title = match kind {
            ResourceKind::Mesh => "Select Mesh",
            ResourceKind::Material => "Select Material",
            ResourceKind::Texture => "Select Texture",
        }
        .to_string();

        self.items.clear();
        match kind {
            ResourceKind::Mesh => {
                for library in &self.mesh_libraries {
                    collect_items(library.as_ref(), ResourcePayload::Mesh, &mut self.items);
                }
            }
            ResourceKind::Material => {
                for library in &self.material_libraries {
                    collect_items(library.as_ref(), ResourcePayload::Material, &mut self.items);
                }
            }
            ResourceKind::Texture => {
                for library in &self.texture_libraries {
                    collect_items(library.as_ref(), ResourcePayload::Texture, &mut self.items);
                }
            }
        }

        log::debug!("picker opened with {} {} items", self.items.len(), kind.label());
        self.carousel.set_slots(self.items.len());
        self.visible = true;
    }

    /// Look a mesh up by name across registered libraries, in registration
    /// order.
    pub fn load_mesh(&self, name: &str) -> Option<MeshRef> {
        self.mesh_libraries.iter().find_map(|l| l.load(name))
    }

    pub fn load_material(&self, name: &str) -> Option<MaterialRef> {
        self.material_libraries.iter().find_map(|l| l.load(name))
    }

    pub fn load_texture(&self, name: &str) -> Option<TextureRef> {
        self.texture_libraries.iter().find_map(|l| l.load(name))
    }

    /// Hide the picker without emitting a selection.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// A tap landed on `slot`: resolve the payload into a typed selection
    /// and hide the picker. Out-of-range slots resolve to no selection.
    pub fn tap_slot(&mut self, slot: usize) -> Option<Selection> {
        let item = self.items.get(slot)?;
        let selection = match &item.payload {
            ResourcePayload::Mesh(mesh) => Selection::Mesh(mesh.clone()),
            ResourcePayload::Material(material) => Selection::Material(material.clone()),
            ResourcePayload::Texture(texture) => Selection::Texture(texture.clone()),
        };
        self.visible = false;
        Some(selection)
    }

    /// Advance the carousel settle animation.
    pub fn tick(&mut self, dt: f32) {
        self.carousel.tick(dt);
    }
}

impl Default for Picker {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_items<R: Clone>(
    library: &dyn ResourceLibrary<R>,
    wrap: impl Fn(R) -> ResourcePayload,
    items: &mut Vec<CatalogItem>,
) {
    for name in library.list() {
        let Some(resource) = library.load(&name) else {
            // Library listed a name it cannot load; skip the entry.
            log::warn!("catalog entry {name:?} failed to load, skipping");
            continue;
        };
        let preview = library.load_preview(&name);
        items.push(CatalogItem {
            title: name,
            preview,
            payload: wrap(resource),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MeshLibrary, TextureLibrary};
    use crate::ui::carousel::CarouselGeometry;
    use image::RgbaImage;
    use std::path::PathBuf;

    fn mesh_library(names: &[&str]) -> Box<MeshLibrary> {
        let mut library = MeshLibrary::new();
        for name in names {
            library.add(
                name,
                MeshRef {
                    name: name.to_string(),
                    path: PathBuf::from(format!("meshes/{name}.glb")),
                },
                None,
            );
        }
        Box::new(library)
    }

    /// Library that lists names it cannot load, to exercise the skip path.
    struct BrokenLibrary;

    impl ResourceLibrary<MeshRef> for BrokenLibrary {
        fn list(&self) -> Vec<String> {
            vec!["ghost".to_string()]
        }

        fn load(&self, _name: &str) -> Option<MeshRef> {
            None
        }

        fn load_preview(&self, _name: &str) -> Option<RgbaImage> {
            None
        }
    }

    #[test]
    fn open_concatenates_libraries_in_registration_order() {
        let mut picker = Picker::new();
        picker.add_mesh_library(mesh_library(&["cube", "torus"]));
        picker.add_mesh_library(mesh_library(&["sphere"]));
        picker.open(ResourceKind::Mesh);

        assert!(picker.is_visible());
        assert_eq!(picker.title(), "Select Mesh");
        let titles: Vec<&str> = picker.items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["cube", "torus", "sphere"]);
        assert_eq!(picker.carousel().slot_count(), 3);
    }

    #[test]
    fn unloadable_entries_are_skipped_silently() {
        let mut picker = Picker::new();
        picker.add_mesh_library(Box::new(BrokenLibrary));
        picker.add_mesh_library(mesh_library(&["cube"]));
        picker.open(ResourceKind::Mesh);
        assert_eq!(picker.items().len(), 1);
        assert_eq!(picker.items()[0].title, "cube");
    }

    #[test]
    fn tap_resolves_typed_selection_and_hides() {
        let mut picker = Picker::new();
        picker.add_mesh_library(mesh_library(&["cube", "torus"]));
        picker.open(ResourceKind::Mesh);

        let selection = picker.tap_slot(1).expect("expected a selection");
        match selection {
            Selection::Mesh(mesh) => assert_eq!(mesh.name, "torus"),
            other => panic!("unexpected selection {other:?}"),
        }
        assert!(!picker.is_visible());
    }

    #[test]
    fn tap_out_of_range_is_no_selection() {
        let mut picker = Picker::new();
        picker.add_mesh_library(mesh_library(&["cube"]));
        picker.open(ResourceKind::Mesh);
        assert_eq!(picker.tap_slot(5), None);
        // An out-of-range tap does not close the picker either.
        assert!(picker.is_visible());
    }

    #[test]
    fn close_hides_without_selection() {
        let mut picker = Picker::new();
        picker.add_mesh_library(mesh_library(&["cube"]));
        picker.open(ResourceKind::Mesh);
        picker.close();
        assert!(!picker.is_visible());
    }

    #[test]
    fn open_with_no_libraries_yields_empty_carousel() {
        let mut picker = Picker::new();
        picker.open(ResourceKind::Texture);
        assert!(picker.is_visible());
        assert!(picker.items().is_empty());
        picker.carousel_mut().set_geometry(CarouselGeometry {
            panel_width: 300.0,
            slot_width: 100.0,
        });
        assert_eq!(picker.carousel().active_index(), None);
    }

    #[test]
    fn reopening_reseeds_the_carousel() {
        let mut picker = Picker::new();
        picker.add_mesh_library(mesh_library(&["a", "b", "c", "d", "e"]));
        let mut texture_library = TextureLibrary::new();
        texture_library.add(
            "bricks",
            TextureRef {
                name: "bricks".to_string(),
                path: PathBuf::from("textures/bricks.png"),
            },
            None,
        );
        picker.add_texture_library(Box::new(texture_library));

        picker.open(ResourceKind::Mesh);
        picker.carousel_mut().set_geometry(CarouselGeometry {
            panel_width: 300.0,
            slot_width: 100.0,
        });
        assert_eq!(picker.carousel().active_index(), Some(2));

        picker.open(ResourceKind::Texture);
        assert_eq!(picker.carousel().slot_count(), 1);
        assert_eq!(picker.carousel().active_index(), Some(0));
    }
}
