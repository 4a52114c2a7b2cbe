#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod element;
pub mod error;
pub mod file_handler;
pub mod image_import;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod selection;
pub mod surface;

pub use app::SketchApp;
pub use config::SurfaceConfig;
pub use element::{Element, ElementId, ElementType, ShapeKind};
pub use error::ImageLoadError;
pub use image_import::{DecodedImage, ImageUploader};
pub use input::{InputEvent, InputLocation, InputRouter};
pub use panels::{ToolbarAction, ToolbarState};
pub use renderer::Renderer;
pub use selection::Selection;
pub use surface::{Brush, DrawingSurface};
