use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod app;
pub mod tilemap;

pub use app::{
    run_app, AppError, Color, DrawTarget, Game, GeoM, Image, ImageLoadError, InputSnapshot, Key,
    LoopConfig, Rect, Renderer, RendererError, Surface,
};
pub use tilemap::{Layer, Tilemap, TilemapError};

pub const ROOT_ENV_VAR: &str = "TOPDOWN_ROOT";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to resolve current working directory: {0}")]
    CurrentDir(#[source] std::io::Error),
    #[error(
        "{env_var} is set but does not point to a directory: {path}\n\
Asset paths such as assets/images/ninja.png are resolved against this directory."
    )]
    InvalidEnvRoot {
        path: PathBuf,
        env_var: &'static str,
    },
}

/// `TOPDOWN_ROOT` when set, otherwise the current working directory.
pub fn resolve_asset_root() -> Result<PathBuf, StartupError> {
    match env::var(ROOT_ENV_VAR) {
        Ok(value) => root_from_env_value(&value),
        Err(env::VarError::NotPresent) => {
            let cwd = env::current_dir().map_err(StartupError::CurrentDir)?;
            Ok(normalize_path(&cwd))
        }
        Err(source) => Err(StartupError::EnvVar {
            var: ROOT_ENV_VAR,
            source,
        }),
    }
}

fn root_from_env_value(value: &str) -> Result<PathBuf, StartupError> {
    let normalized = normalize_path(Path::new(value));
    if normalized.is_dir() {
        Ok(normalized)
    } else {
        Err(StartupError::InvalidEnvRoot {
            path: normalized,
            env_var: ROOT_ENV_VAR,
        })
    }
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
