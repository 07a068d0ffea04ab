#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoM {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    tx: f64,
    ty: f64,
}

impl Default for GeoM {
    fn default() -> Self {
        Self::identity()
    }
}

impl GeoM {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        let mut geom = Self::identity();
        geom.translate(dx, dy);
        geom
    }

    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.tx += dx;
        self.ty += dy;
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.a *= sx;
        self.b *= sx;
        self.tx *= sx;
        self.c *= sy;
        self.d *= sy;
        self.ty *= sy;
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.b * y + self.tx,
            self.c * x + self.d * y + self.ty,
        )
    }

    pub fn translation_part(&self) -> (f64, f64) {
        (self.tx, self.ty)
    }

    pub fn is_translation_only(&self) -> bool {
        self.a == 1.0 && self.b == 0.0 && self.c == 0.0 && self.d == 1.0
    }

    pub fn invert(&self) -> Option<GeoM> {
        let det = self.a * self.d - self.b * self.c;
        if !det.is_finite() || det.abs() < f64::EPSILON {
            return None;
        }
        let inv_det = det.recip();
        let a = self.d * inv_det;
        let b = -self.b * inv_det;
        let c = -self.c * inv_det;
        let d = self.a * inv_det;
        Some(GeoM {
            a,
            b,
            c,
            d,
            tx: -(a * self.tx + b * self.ty),
            ty: -(c * self.tx + d * self.ty),
        })
    }
}
