//! Interaction widgets: gesture classification, the carousel and slider
//! engines, the resource picker built on top of them, and the egui view
//! that draws it all.

pub mod carousel;
pub mod egui_view;
pub mod gesture;
pub mod picker;
pub mod slider;

pub use carousel::{Carousel, CarouselGeometry};
pub use egui_view::{PreviewTextureCache, VisualizerView};
pub use gesture::{GestureClassifier, Tap};
pub use picker::{Picker, Selection};
pub use slider::{SliderGeometry, VerticalSlider};
