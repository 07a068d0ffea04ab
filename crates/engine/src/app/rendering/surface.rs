use super::{GeoM, Image};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

pub trait DrawTarget {
    fn size(&self) -> (u32, u32);
    fn fill(&mut self, color: Color);
    fn draw_image(&mut self, image: &Image, geom: &GeoM);
}

pub struct Surface<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Surface<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        let row_bytes = width as usize * 4;
        let available_rows = if row_bytes == 0 {
            0
        } else {
            (frame.len() / row_bytes).min(height as usize) as u32
        };
        Self {
            frame,
            width,
            height: available_rows,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let offset = self.byte_offset(x, y)?;
        let bytes = self.frame.get(offset..offset + 4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    fn byte_offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        (y as usize)
            .checked_mul(self.width as usize)?
            .checked_add(x as usize)?
            .checked_mul(4)
    }
}

impl DrawTarget for Surface<'_> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Color) {
        let bytes = color.to_bytes();
        let used = self.width as usize * self.height as usize * 4;
        for chunk in self.frame[..used].chunks_exact_mut(4) {
            chunk.copy_from_slice(&bytes);
        }
    }

    fn draw_image(&mut self, image: &Image, geom: &GeoM) {
        if image.is_empty() || self.width == 0 || self.height == 0 {
            return;
        }
        let Some(inverse) = geom.invert() else {
            return;
        };

        let src_w = image.width() as f64;
        let src_h = image.height() as f64;
        let corners = [
            geom.apply(0.0, 0.0),
            geom.apply(src_w, 0.0),
            geom.apply(0.0, src_h),
            geom.apply(src_w, src_h),
        ];
        let min_x = corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max);
        let min_y = corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
        let max_y = corners.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max);
        if !(min_x.is_finite() && max_x.is_finite() && min_y.is_finite() && max_y.is_finite()) {
            return;
        }

        let left = min_x.floor().max(0.0) as i64;
        let top = min_y.floor().max(0.0) as i64;
        let right = max_x.ceil().min(self.width as f64) as i64;
        let bottom = max_y.ceil().min(self.height as f64) as i64;
        if left >= right || top >= bottom {
            return;
        }

        for y in top..bottom {
            for x in left..right {
                let (u, v) = inverse.apply(x as f64 + 0.5, y as f64 + 0.5);
                if u < 0.0 || v < 0.0 || u >= src_w || v >= src_h {
                    continue;
                }
                let Some(src) = image.pixel(u.floor() as u32, v.floor() as u32) else {
                    continue;
                };
                if src[3] == 0 {
                    continue;
                }
                let Some(offset) = self.byte_offset(x as u32, y as u32) else {
                    continue;
                };
                blend_over(&mut self.frame[offset..offset + 4], src);
            }
        }
    }
}

fn blend_over(dst: &mut [u8], src: [u8; 4]) {
    if src[3] == 255 {
        dst.copy_from_slice(&src);
        return;
    }
    let alpha = src[3] as u32;
    let inv_alpha = 255 - alpha;
    for channel in 0..3 {
        dst[channel] =
            ((src[channel] as u32 * alpha + dst[channel] as u32 * inv_alpha + 127) / 255) as u8;
    }
    dst[3] = (alpha + dst[3] as u32 * inv_alpha / 255).min(255) as u8;
}
