mod camera;
mod draw;
mod entities;
mod systems;

use topdown_engine::{DrawTarget, Game, Image, InputSnapshot, Tilemap};

use camera::Camera;
pub(crate) use entities::{Enemy, Potion, Sprite};
use systems::{UpdateStage, UPDATE_ORDER};

pub(crate) const SCREEN_WIDTH: u32 = 320;
pub(crate) const SCREEN_HEIGHT: u32 = 240;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum PlayerDrawSpace {
    #[default]
    World,
    Screen,
}

pub(crate) struct GameplayState {
    player: Sprite,
    enemies: Vec<Enemy>,
    potions: Vec<Potion>,
    tilemap: Tilemap,
    tileset: Image,
    camera: Camera,
    player_draw_space: PlayerDrawSpace,
}

impl GameplayState {
    pub(crate) fn new(
        player: Sprite,
        enemies: Vec<Enemy>,
        potions: Vec<Potion>,
        tilemap: Tilemap,
        tileset: Image,
    ) -> Self {
        Self {
            player,
            enemies,
            potions,
            tilemap,
            tileset,
            camera: Camera::new(0.0, 0.0),
            player_draw_space: PlayerDrawSpace::default(),
        }
    }

    pub(crate) fn with_player_draw_space(mut self, player_draw_space: PlayerDrawSpace) -> Self {
        self.player_draw_space = player_draw_space;
        self
    }

    pub(crate) fn player(&self) -> &Sprite {
        &self.player
    }

    pub(crate) fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub(crate) fn potions(&self) -> &[Potion] {
        &self.potions
    }

    pub(crate) fn camera(&self) -> Camera {
        self.camera
    }

    pub(crate) fn world_size(&self) -> (f64, f64) {
        // Square: the height follows the first layer's width.
        let width = self.tilemap.pixel_width(draw::TILE_SIZE);
        (width, width)
    }

    pub(crate) fn tick(&mut self, input: &InputSnapshot) {
        for stage in UPDATE_ORDER {
            self.run_stage(stage, input);
        }
    }

    fn run_stage(&mut self, stage: UpdateStage, input: &InputSnapshot) {
        match stage {
            UpdateStage::Input => systems::apply_input(&mut self.player, input),
            UpdateStage::EnemyAi => systems::step_enemies(&mut self.enemies, &self.player),
            UpdateStage::PotionPickup => {
                systems::resolve_potion_pickups(&mut self.player, &mut self.potions);
            }
            UpdateStage::Camera => {
                let world_size = self.world_size();
                systems::follow_player(
                    &mut self.camera,
                    &self.player,
                    world_size,
                    (SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64),
                );
            }
        }
    }
}

impl Game for GameplayState {
    fn update(&mut self, input: &InputSnapshot) {
        self.tick(input);
    }

    fn draw(&self, target: &mut dyn DrawTarget) {
        draw::draw_frame(self, target);
    }

    fn layout(&self, _outside_width: u32, _outside_height: u32) -> (u32, u32) {
        (SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}
