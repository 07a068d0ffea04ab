use std::path::{Path, PathBuf};

use thiserror::Error;
use topdown_engine::{
    resolve_asset_root, Game, Image, ImageLoadError, LoopConfig, StartupError, Tilemap,
    TilemapError,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::gameplay::{Enemy, GameplayState, PlayerDrawSpace, Potion, Sprite};

const PLAYER_DRAW_SPACE_ENV_VAR: &str = "TOPDOWN_PLAYER_SCREEN_SPACE";

const PLAYER_IMAGE: &str = "assets/images/ninja.png";
const ENEMY_IMAGE: &str = "assets/images/skeleton.png";
const POTION_IMAGE: &str = "assets/images/Heart.png";
const TILESET_IMAGE: &str = "assets/images/TilesetFloor.png";
const TILEMAP_JSON: &str = "assets/maps/tilesets/spawn.json";

const PLAYER_START: (f64, f64) = (50.0, 50.0);
const PLAYER_START_HEALTH: u16 = 100;
const ENEMY_STARTS: [(f64, f64, bool); 3] = [
    (100.4, 100.4, true),
    (200.4, 200.4, true),
    (300.4, 300.4, false),
];
const POTION_START: (f64, f64) = (200.0, 200.0);
const POTION_HEAL_AMOUNT: u16 = 20;

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("failed to load {asset} image: {source}")]
    Image {
        asset: &'static str,
        #[source]
        source: ImageLoadError,
    },
    #[error("failed to load tile map: {0}")]
    Tilemap(#[source] TilemapError),
}

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) game: Box<dyn Game>,
}

pub(crate) struct GameAssets {
    pub(crate) player: Image,
    pub(crate) enemy: Image,
    pub(crate) potion: Image,
    pub(crate) tileset: Image,
    pub(crate) tilemap: Tilemap,
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();
    info!("=== Top-down Startup ===");

    let root = resolve_asset_root()?;
    info!(root = %root.display(), "asset_root_resolved");

    let assets = load_assets(&root)?;
    let draw_space =
        parse_player_draw_space(std::env::var(PLAYER_DRAW_SPACE_ENV_VAR).ok().as_deref());
    let state = initial_state(assets).with_player_draw_space(draw_space);
    info!(
        enemies = state.enemies().len(),
        potions = state.potions().len(),
        ?draw_space,
        "gameplay_ready"
    );

    Ok(AppWiring {
        config: LoopConfig::default(),
        game: Box::new(state),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

pub(crate) fn load_assets(root: &Path) -> Result<GameAssets, BootstrapError> {
    let load_image = |asset: &'static str, relative: &str| -> Result<Image, BootstrapError> {
        let path = root.join(relative);
        let image =
            Image::load(&path).map_err(|source| BootstrapError::Image { asset, source })?;
        info!(
            asset,
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "image_loaded"
        );
        Ok(image)
    };

    let player = load_image("player", PLAYER_IMAGE)?;
    let enemy = load_image("enemy", ENEMY_IMAGE)?;
    let potion = load_image("potion", POTION_IMAGE)?;
    let tileset = load_image("tileset", TILESET_IMAGE)?;
    let tilemap_path: PathBuf = root.join(TILEMAP_JSON);
    let tilemap = Tilemap::load(&tilemap_path).map_err(BootstrapError::Tilemap)?;
    info!(
        path = %tilemap_path.display(),
        layers = tilemap.layers().len(),
        "tilemap_loaded"
    );

    Ok(GameAssets {
        player,
        enemy,
        potion,
        tileset,
        tilemap,
    })
}

pub(crate) fn initial_state(assets: GameAssets) -> GameplayState {
    let player = Sprite::new(assets.player, PLAYER_START.0, PLAYER_START.1)
        .with_health(PLAYER_START_HEALTH);
    let enemies = ENEMY_STARTS
        .iter()
        .map(|&(x, y, follows_player)| {
            Enemy::new(Sprite::new(assets.enemy.clone(), x, y), follows_player)
        })
        .collect();
    let potions = vec![Potion::new(
        Sprite::new(assets.potion, POTION_START.0, POTION_START.1),
        POTION_HEAL_AMOUNT,
    )];

    GameplayState::new(player, enemies, potions, assets.tilemap, assets.tileset)
}

fn parse_player_draw_space(raw: Option<&str>) -> PlayerDrawSpace {
    match raw.map(str::trim) {
        Some(value) if value == "1" || value.eq_ignore_ascii_case("true") => {
            PlayerDrawSpace::Screen
        }
        _ => PlayerDrawSpace::World,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use topdown_engine::Layer;

    use super::*;

    fn write_png(path: &Path, width: u32, height: u32) {
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        image::RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]))
            .save(path)
            .expect("write png");
    }

    fn write_map(root: &Path, json: &str) {
        let path = root.join(TILEMAP_JSON);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, json).expect("write map");
    }

    fn seed_assets(root: &Path) {
        write_png(&root.join(PLAYER_IMAGE), 16, 16);
        write_png(&root.join(ENEMY_IMAGE), 16, 16);
        write_png(&root.join(POTION_IMAGE), 16, 16);
        write_png(&root.join(TILESET_IMAGE), 352, 16);
        write_map(
            root,
            r#"{"layers":[{"width":2,"height":2,"data":[1,2,3,4]},{"type":"objectgroup"}]}"#,
        );
    }

    #[test]
    fn loads_full_asset_set_into_starting_state() {
        let temp = TempDir::new().expect("temp");
        seed_assets(temp.path());

        let assets = load_assets(temp.path()).expect("assets");
        assert_eq!(assets.tilemap.layers().len(), 1);
        assert_eq!(assets.tileset.width(), 352);

        let state = initial_state(assets);
        assert_eq!(state.player().x, 50.0);
        assert_eq!(state.player().y, 50.0);
        assert_eq!(state.player().health, 100);
        assert_eq!(state.enemies().len(), 3);
        assert!(state.enemies()[0].follows_player);
        assert!(state.enemies()[1].follows_player);
        assert!(!state.enemies()[2].follows_player);
        assert!(state.enemies()[0]
            .sprite
            .image
            .shares_pixels_with(&state.enemies()[2].sprite.image));
        assert_eq!(state.potions().len(), 1);
        assert_eq!(state.potions()[0].heal_amount, 20);
        assert_eq!(state.world_size(), (32.0, 32.0));
    }

    #[test]
    fn missing_player_image_names_the_asset() {
        let temp = TempDir::new().expect("temp");
        seed_assets(temp.path());
        fs::remove_file(temp.path().join(PLAYER_IMAGE)).expect("remove");

        let err = load_assets(temp.path())
            .err()
            .expect("missing image should fail");
        assert!(matches!(
            err,
            BootstrapError::Image {
                asset: "player",
                source: ImageLoadError::Open { .. }
            }
        ));
        assert!(err.to_string().contains("player"));
    }

    #[test]
    fn corrupt_tileset_is_a_decode_error() {
        let temp = TempDir::new().expect("temp");
        seed_assets(temp.path());
        fs::write(temp.path().join(TILESET_IMAGE), b"not a png").expect("write");

        let err = load_assets(temp.path())
            .err()
            .expect("corrupt image should fail");
        assert!(matches!(
            err,
            BootstrapError::Image {
                asset: "tileset",
                source: ImageLoadError::Decode { .. }
            }
        ));
    }

    #[test]
    fn malformed_map_surfaces_tilemap_error() {
        let temp = TempDir::new().expect("temp");
        seed_assets(temp.path());
        write_map(temp.path(), r#"{"layers":[{"width":3,"height":1,"data":[1,2]}]}"#);

        let err = load_assets(temp.path())
            .err()
            .expect("mismatched layer should fail");
        assert!(matches!(
            err,
            BootstrapError::Tilemap(TilemapError::TileCountMismatch { .. })
        ));
    }

    #[test]
    fn initial_state_uses_first_layer_for_world_size() {
        let tile = Image::from_rgba(16, 16, vec![0; 16 * 16 * 4]).expect("image");
        let assets = GameAssets {
            player: tile.clone(),
            enemy: tile.clone(),
            potion: tile.clone(),
            tileset: tile,
            tilemap: Tilemap::new(vec![Layer::new(40, 2, vec![1; 80]).expect("layer")])
                .expect("map"),
        };
        assert_eq!(initial_state(assets).world_size(), (640.0, 640.0));
    }

    #[test]
    fn player_draw_space_env_parsing() {
        assert_eq!(parse_player_draw_space(None), PlayerDrawSpace::World);
        assert_eq!(parse_player_draw_space(Some("")), PlayerDrawSpace::World);
        assert_eq!(parse_player_draw_space(Some("0")), PlayerDrawSpace::World);
        assert_eq!(parse_player_draw_space(Some("1")), PlayerDrawSpace::Screen);
        assert_eq!(parse_player_draw_space(Some(" TRUE ")), PlayerDrawSpace::Screen);
    }
}
