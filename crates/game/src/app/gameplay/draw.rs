use topdown_engine::{Color, DrawTarget, GeoM, Image, Layer, Rect, Tilemap};

use super::camera::Camera;
use super::entities::Sprite;
use super::{GameplayState, PlayerDrawSpace};

pub(crate) const CLEAR_COLOR: Color = Color::rgb(120, 180, 255);
pub(crate) const TILE_SIZE: u32 = 16;
pub(crate) const ATLAS_COLUMNS: u32 = 22;

pub(crate) fn draw_frame(state: &GameplayState, target: &mut dyn DrawTarget) {
    let camera = state.camera();
    target.fill(CLEAR_COLOR);
    draw_tilemap(target, &state.tilemap, &state.tileset, &camera);

    let player_camera = match state.player_draw_space {
        PlayerDrawSpace::World => camera,
        PlayerDrawSpace::Screen => Camera::default(),
    };
    draw_sprite(target, state.player(), &player_camera);

    for enemy in state.enemies() {
        draw_sprite(target, &enemy.sprite, &camera);
    }
    for potion in state.potions() {
        draw_sprite(target, &potion.sprite, &camera);
    }
}

fn draw_tilemap(target: &mut dyn DrawTarget, tilemap: &Tilemap, tileset: &Image, camera: &Camera) {
    for layer in tilemap.layers() {
        draw_layer(target, layer, tileset, camera);
    }
}

fn draw_layer(target: &mut dyn DrawTarget, layer: &Layer, tileset: &Image, camera: &Camera) {
    for (index, &tile_id) in layer.data().iter().enumerate() {
        let Some(source) = tile_source_rect(tile_id) else {
            continue;
        };
        let (tile_x, tile_y) = tile_destination(index, layer.width());
        target.draw_image(
            &tileset.sub_image(source),
            &world_geom(tile_x, tile_y, camera),
        );
    }
}

fn draw_sprite(target: &mut dyn DrawTarget, sprite: &Sprite, camera: &Camera) {
    target.draw_image(&sprite.frame(), &world_geom(sprite.x, sprite.y, camera));
}

fn world_geom(x: f64, y: f64, camera: &Camera) -> GeoM {
    let (offset_x, offset_y) = camera.offset();
    let mut geom = GeoM::translation(x, y);
    geom.translate(offset_x, offset_y);
    geom
}

pub(crate) fn tile_source_rect(tile_id: u32) -> Option<Rect> {
    let atlas_index = tile_id.checked_sub(1)? as u64;
    let src_x = (atlas_index % ATLAS_COLUMNS as u64) * TILE_SIZE as u64;
    let src_y = (atlas_index / ATLAS_COLUMNS as u64) * TILE_SIZE as u64;
    Some(Rect::new(
        i32::try_from(src_x).ok()?,
        i32::try_from(src_y).ok()?,
        TILE_SIZE,
        TILE_SIZE,
    ))
}

pub(crate) fn tile_destination(index: usize, width: u32) -> (f64, f64) {
    let width = width.max(1) as usize;
    let column = index % width;
    let row = index / width;
    (
        (column * TILE_SIZE as usize) as f64,
        (row * TILE_SIZE as usize) as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_zero_is_empty() {
        assert_eq!(tile_source_rect(0), None);
    }

    #[test]
    fn tile_ids_map_into_22_column_atlas() {
        assert_eq!(tile_source_rect(1), Some(Rect::new(0, 0, 16, 16)));
        assert_eq!(tile_source_rect(22), Some(Rect::new(21 * 16, 0, 16, 16)));
        assert_eq!(tile_source_rect(23), Some(Rect::new(0, 16, 16, 16)));
        assert_eq!(tile_source_rect(50), Some(Rect::new(5 * 16, 2 * 16, 16, 16)));
    }

    #[test]
    fn huge_tile_id_does_not_overflow() {
        assert_eq!(tile_source_rect(u32::MAX), None);
    }

    #[test]
    fn tile_destination_is_row_major() {
        assert_eq!(tile_destination(0, 30), (0.0, 0.0));
        assert_eq!(tile_destination(29, 30), (464.0, 0.0));
        assert_eq!(tile_destination(30, 30), (0.0, 16.0));
        assert_eq!(tile_destination(65, 30), (80.0, 32.0));
    }

    #[test]
    fn world_geom_applies_camera_after_position() {
        let geom = world_geom(50.0, 60.0, &Camera::new(-20.0, -5.0));
        assert!(geom.is_translation_only());
        assert_eq!(geom.translation_part(), (30.0, 55.0));
    }
}
