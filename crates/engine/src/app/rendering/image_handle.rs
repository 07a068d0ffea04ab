use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageReader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("failed to open image {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("rgba buffer size mismatch for {width}x{height} image: expected {expected} bytes, got {actual}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn intersect(&self, other: &Rect) -> Rect {
        let left = (self.x as i64).max(other.x as i64);
        let top = (self.y as i64).max(other.y as i64);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if left >= right || top >= bottom {
            return Rect::new(left as i32, top as i32, 0, 0);
        }
        Rect::new(
            left as i32,
            top as i32,
            (right - left) as u32,
            (bottom - top) as u32,
        )
    }
}

#[derive(Debug)]
struct PixelStore {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct Image {
    store: Arc<PixelStore>,
    bounds: Rect,
}

impl Image {
    pub fn load(path: &Path) -> Result<Self, ImageLoadError> {
        let reader = ImageReader::open(path).map_err(|source| ImageLoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let decoded = reader.decode().map_err(|source| ImageLoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ImageLoadError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ImageLoadError::BufferSize {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            store: Arc::new(PixelStore {
                width,
                height,
                rgba,
            }),
            bounds: Rect::new(0, 0, width, height),
        })
    }

    pub fn sub_image(&self, rect: Rect) -> Image {
        Image {
            store: Arc::clone(&self.store),
            bounds: self.bounds.intersect(&rect),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn shares_pixels_with(&self, other: &Image) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.bounds.width || y >= self.bounds.height {
            return None;
        }
        let store_x = (self.bounds.x as i64 + x as i64) as usize;
        let store_y = (self.bounds.y as i64 + y as i64) as usize;
        if store_x >= self.store.width as usize || store_y >= self.store.height as usize {
            return None;
        }
        let offset = (store_y * self.store.width as usize + store_x) * 4;
        let bytes = self.store.rgba.get(offset..offset + 4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}
