use gofish_core::GameError;
use gofish_ui::AssetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("input closed before the game finished")]
    InputClosed,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Engine(#[from] GameError),
    #[error(transparent)]
    Asset(#[from] AssetError),
}
