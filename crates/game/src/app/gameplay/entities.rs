use topdown_engine::{Image, Rect};

pub(crate) const ENTITY_SIZE: f64 = 16.0;
pub(crate) const MAX_HEALTH: u16 = 100;
pub(crate) const CONSUMED_POTION_POSITION: (f64, f64) = (-100.0, -100.0);

#[derive(Debug, Clone)]
pub(crate) struct Sprite {
    pub(crate) image: Image,
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) health: u16,
}

impl Sprite {
    pub(crate) fn new(image: Image, x: f64, y: f64) -> Self {
        Self {
            image,
            x,
            y,
            health: 0,
        }
    }

    pub(crate) fn with_health(mut self, health: u16) -> Self {
        self.health = health.min(MAX_HEALTH);
        self
    }

    pub(crate) fn overlaps(&self, other: &Sprite) -> bool {
        self.x < other.x + ENTITY_SIZE
            && self.x + ENTITY_SIZE > other.x
            && self.y < other.y + ENTITY_SIZE
            && self.y + ENTITY_SIZE > other.y
    }

    pub(crate) fn frame(&self) -> Image {
        self.image
            .sub_image(Rect::new(0, 0, ENTITY_SIZE as u32, ENTITY_SIZE as u32))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Enemy {
    pub(crate) sprite: Sprite,
    pub(crate) follows_player: bool,
}

impl Enemy {
    pub(crate) fn new(sprite: Sprite, follows_player: bool) -> Self {
        Self {
            sprite,
            follows_player,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Potion {
    pub(crate) sprite: Sprite,
    pub(crate) heal_amount: u16,
    consumed: bool,
}

impl Potion {
    pub(crate) fn new(sprite: Sprite, heal_amount: u16) -> Self {
        Self {
            sprite,
            heal_amount,
            consumed: false,
        }
    }

    pub(crate) fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub(crate) fn consume(&mut self) {
        self.consumed = true;
        self.sprite.x = CONSUMED_POTION_POSITION.0;
        self.sprite.y = CONSUMED_POTION_POSITION.1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> Image {
        Image::from_rgba(16, 16, vec![0; 16 * 16 * 4]).expect("image")
    }

    #[test]
    fn overlap_excludes_touching_edges() {
        let a = Sprite::new(blank(), 0.0, 0.0);
        let touching = Sprite::new(blank(), 16.0, 0.0);
        let inside = Sprite::new(blank(), 15.9, 15.9);
        let diagonal = Sprite::new(blank(), 16.0, 16.0);

        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
        assert!(!a.overlaps(&diagonal));
    }

    #[test]
    fn health_is_capped_on_construction() {
        let sprite = Sprite::new(blank(), 0.0, 0.0).with_health(250);
        assert_eq!(sprite.health, MAX_HEALTH);
    }

    #[test]
    fn consuming_a_potion_parks_it_off_map() {
        let mut potion = Potion::new(Sprite::new(blank(), 200.0, 200.0), 20);
        assert!(!potion.is_consumed());

        potion.consume();
        assert!(potion.is_consumed());
        assert_eq!(
            (potion.sprite.x, potion.sprite.y),
            CONSUMED_POTION_POSITION
        );
    }

    #[test]
    fn frame_is_top_left_cell_of_sheet() {
        let sheet = Image::from_rgba(64, 32, vec![0; 64 * 32 * 4]).expect("sheet");
        let sprite = Sprite::new(sheet.clone(), 0.0, 0.0);
        let frame = sprite.frame();
        assert_eq!(frame.bounds(), Rect::new(0, 0, 16, 16));
        assert!(frame.shares_pixels_with(&sheet));
    }
}
