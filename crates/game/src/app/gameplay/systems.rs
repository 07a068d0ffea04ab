use topdown_engine::{InputSnapshot, Key};
use tracing::debug;

use super::camera::Camera;
use super::entities::{Enemy, Potion, Sprite, ENTITY_SIZE, MAX_HEALTH};

pub(crate) const PLAYER_SPEED: f64 = 2.0;
pub(crate) const ENEMY_SPEED: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UpdateStage {
    Input,
    EnemyAi,
    PotionPickup,
    Camera,
}

pub(crate) const UPDATE_ORDER: [UpdateStage; 4] = [
    UpdateStage::Input,
    UpdateStage::EnemyAi,
    UpdateStage::PotionPickup,
    UpdateStage::Camera,
];

pub(crate) fn apply_input(player: &mut Sprite, input: &InputSnapshot) {
    if input.is_key_pressed(Key::Right) {
        player.x += PLAYER_SPEED;
    }
    if input.is_key_pressed(Key::Left) {
        player.x -= PLAYER_SPEED;
    }
    if input.is_key_pressed(Key::Up) {
        player.y -= PLAYER_SPEED;
    }
    if input.is_key_pressed(Key::Down) {
        player.y += PLAYER_SPEED;
    }
}

pub(crate) fn step_enemies(enemies: &mut [Enemy], player: &Sprite) {
    for enemy in enemies.iter_mut().filter(|enemy| enemy.follows_player) {
        enemy.sprite.x = step_toward(enemy.sprite.x, player.x, ENEMY_SPEED);
        enemy.sprite.y = step_toward(enemy.sprite.y, player.y, ENEMY_SPEED);
    }
}

fn step_toward(from: f64, to: f64, speed: f64) -> f64 {
    if to > from {
        from + speed
    } else if to < from {
        from - speed
    } else {
        from
    }
}

pub(crate) fn resolve_potion_pickups(player: &mut Sprite, potions: &mut [Potion]) -> usize {
    let mut consumed = 0;
    for (index, potion) in potions.iter_mut().enumerate() {
        if potion.is_consumed() || !player.overlaps(&potion.sprite) {
            continue;
        }
        let health_before = player.health;
        player.health = player
            .health
            .saturating_add(potion.heal_amount)
            .min(MAX_HEALTH);
        potion.consume();
        consumed += 1;
        debug!(
            potion_index = index,
            heal_amount = potion.heal_amount,
            health_before,
            health_after = player.health,
            "potion_consumed"
        );
    }
    consumed
}

pub(crate) fn follow_player(
    camera: &mut Camera,
    player: &Sprite,
    world_size: (f64, f64),
    screen_size: (f64, f64),
) {
    let half = ENTITY_SIZE / 2.0;
    camera.center_on(player.x + half, player.y + half, screen_size.0, screen_size.1);
    camera.constrain(world_size.0, world_size.1, screen_size.0, screen_size.1);
}
