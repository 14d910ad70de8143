#![deny(warnings)]
pub mod belief;
pub mod error;
pub mod game;
pub mod model;
pub mod policy;

pub use error::GameError;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "gofish"
    }

    pub const fn tagline() -> &'static str {
        "Ask for a rank, or go fish"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "gofish");
        assert!(AppInfo::tagline().contains("go fish"));
        assert!(!AppInfo::version().is_empty());
    }
}
