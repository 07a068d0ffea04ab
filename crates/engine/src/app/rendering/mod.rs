mod image_handle;
mod renderer;
mod surface;
mod transform;

pub use image_handle::{Image, ImageLoadError, Rect};
pub use renderer::{Renderer, RendererError};
pub use surface::{Color, DrawTarget, Surface};
pub use transform::GeoM;
