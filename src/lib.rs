//! Interactive 3D asset visualizer core.
//!
//! The crate splits along the host boundary: [`host`] defines the traits a
//! rendering host implements (mesh surface, key light, post-effect stack),
//! [`scene`] forwards user intent to those traits, [`ui`] owns the gesture,
//! carousel, slider, and picker widgets plus the egui view, and [`app`]
//! ties them together behind the [`app::Visualizer`] command façade.
//! [`catalog`] and [`preview`] cover the resource libraries and the offline
//! thumbnail build tool that feeds them.

pub mod app;
pub mod catalog;
pub mod host;
pub mod preview;
pub mod scene;
pub mod ui;

pub use app::{UiCommand, UiEvent, Visualizer};
pub use catalog::{CatalogItem, ResourceKind, ResourceLibrary};
pub use ui::VisualizerView;
