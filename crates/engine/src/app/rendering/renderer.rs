use std::sync::Arc;

use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;
use winit::window::Window;

use super::Surface;
use crate::app::Game;

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("failed to create pixel buffer: {0}")]
    Create(#[source] pixels::Error),
    #[error("failed to resize {what}: {source}")]
    Resize {
        what: &'static str,
        #[source]
        source: pixels::TextureError,
    },
    #[error("failed to present frame: {0}")]
    Present(#[source] pixels::Error),
}

pub struct Renderer {
    pixels: Pixels<'static>,
    window_size: (u32, u32),
    logical_size: (u32, u32),
}

impl Renderer {
    pub fn new(window: Arc<Window>, logical_size: (u32, u32)) -> Result<Self, RendererError> {
        let size = window.inner_size();
        let window_size = (size.width.max(1), size.height.max(1));
        let logical_size = (logical_size.0.max(1), logical_size.1.max(1));
        let surface = SurfaceTexture::new(window_size.0, window_size.1, window);
        let pixels =
            Pixels::new(logical_size.0, logical_size.1, surface).map_err(RendererError::Create)?;
        Ok(Self {
            pixels,
            window_size,
            logical_size,
        })
    }

    pub fn logical_size(&self) -> (u32, u32) {
        self.logical_size
    }

    pub fn resize_window(&mut self, width: u32, height: u32) -> Result<(), RendererError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels
            .resize_surface(width, height)
            .map_err(|source| RendererError::Resize {
                what: "surface",
                source,
            })?;
        self.window_size = (width, height);
        Ok(())
    }

    fn apply_layout(&mut self, layout: (u32, u32)) -> Result<(), RendererError> {
        if layout.0 == 0 || layout.1 == 0 || layout == self.logical_size {
            return Ok(());
        }
        self.pixels
            .resize_buffer(layout.0, layout.1)
            .map_err(|source| RendererError::Resize {
                what: "buffer",
                source,
            })?;
        self.logical_size = layout;
        Ok(())
    }

    pub fn render_game(&mut self, game: &dyn Game) -> Result<(), RendererError> {
        let layout = game.layout(self.window_size.0, self.window_size.1);
        self.apply_layout(layout)?;

        let (width, height) = self.logical_size;
        {
            let mut surface = Surface::new(self.pixels.frame_mut(), width, height);
            game.draw(&mut surface);
        }
        self.pixels.render().map_err(RendererError::Present)
    }
}
