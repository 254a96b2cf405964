use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] glyphtree_core::Error),

    #[error("unknown setting {name:?}")]
    UnknownSetting { name: String },

    #[error("setting {name:?} holds a {found}, not a {expected}")]
    SettingType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("an overlay registered under a parent needs a location")]
    MissingOverlayLocation,

    #[error("an idle callback needs realtime mode")]
    IdleRequiresRealtime,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
