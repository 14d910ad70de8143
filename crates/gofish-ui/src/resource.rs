use crate::assets::AssetError;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::Path;
use tracing::{Level, event};

pub const MANIFEST_ENV: &str = "GOFISH_ASSET_MANIFEST";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CardSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AssetManifest {
    pub back_image: String,
    pub card_size: CardSize,
    #[serde(default = "default_padding")]
    pub padding: u32,
    #[serde(default = "default_max_window")]
    pub max_window: CardSize,
}

fn default_padding() -> u32 {
    20
}

fn default_max_window() -> CardSize {
    CardSize {
        width: 1200,
        height: 800,
    }
}

static MANIFEST: Lazy<AssetManifest> = Lazy::new(load_manifest);

fn load_manifest() -> AssetManifest {
    if let Ok(path) = std::env::var(MANIFEST_ENV) {
        match AssetManifest::from_path(&path) {
            Ok(manifest) => return manifest,
            Err(err) => event!(
                target: "gofish_ui::resource",
                Level::WARN,
                path = %path,
                error = %err,
                "falling back to placeholder asset manifest"
            ),
        }
    }

    AssetManifest::placeholder()
}

impl AssetManifest {
    pub fn placeholder() -> Self {
        Self {
            back_image: "back.png".into(),
            card_size: CardSize {
                width: 100,
                height: 145,
            },
            padding: default_padding(),
            max_window: default_max_window(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| AssetError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn current() -> &'static AssetManifest {
        &MANIFEST
    }
}
