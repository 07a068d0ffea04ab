mod game;
mod input;
mod loop_runner;
mod metrics;
mod rendering;

pub use game::Game;
pub use input::{InputSnapshot, Key};
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use rendering::{
    Color, DrawTarget, GeoM, Image, ImageLoadError, Rect, Renderer, RendererError, Surface,
};
