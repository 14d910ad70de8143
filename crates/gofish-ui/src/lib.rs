pub mod assets;
pub mod layout;
pub mod resource;
pub mod selection;

pub use assets::{AssetError, CardAssets, asset_key};
pub use layout::{Action, ElementId, Rect, TableLayout, WindowSize, window_size};
pub use resource::AssetManifest;
pub use selection::Selection;
