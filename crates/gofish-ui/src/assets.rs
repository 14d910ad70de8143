use crate::resource::AssetManifest;
use gofish_core::model::card::Card;
use gofish_core::model::deck::Deck;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("card back image {} is missing; cannot start the table", .0.display())]
    MissingBack(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse asset manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// File stem for a card face, e.g. `10_hearts` or `q_spades`.
pub fn asset_key(card: Card) -> String {
    format!(
        "{}_{}",
        card.rank.symbol().to_ascii_lowercase(),
        card.suit.name()
    )
}

/// Resolved image paths for every face plus the shared back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardAssets {
    back: PathBuf,
    faces: BTreeMap<String, PathBuf>,
    missing: Vec<String>,
}

impl CardAssets {
    /// Maps `<dir>/<rank>_<suit>.png` for all 52 cards. The back image is
    /// required; a missing face falls back to the back with a warning.
    pub fn load(dir: impl AsRef<Path>, manifest: &AssetManifest) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        let back = dir.join(&manifest.back_image);
        if !back.is_file() {
            return Err(AssetError::MissingBack(back));
        }

        let mut faces = BTreeMap::new();
        let mut missing = Vec::new();
        for &card in Deck::standard().cards() {
            let key = asset_key(card);
            let path = dir.join(format!("{key}.png"));
            if path.is_file() {
                faces.insert(key, path);
            } else {
                missing.push(key);
            }
        }

        if !missing.is_empty() {
            event!(
                target: "gofish_ui::assets",
                Level::WARN,
                dir = %dir.display(),
                missing = missing.len(),
                "card faces missing; using the back image instead"
            );
        }

        Ok(Self {
            back,
            faces,
            missing,
        })
    }

    pub fn back(&self) -> &Path {
        &self.back
    }

    pub fn image_for(&self, card: Card) -> &Path {
        self.faces
            .get(&asset_key(card))
            .map(PathBuf::as_path)
            .unwrap_or(self.back.as_path())
    }

    pub fn missing_faces(&self) -> &[String] {
        &self.missing
    }
}
