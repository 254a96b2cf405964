use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{what} needs extended glyphs, which are not enabled")]
    UnsupportedGlyphs { what: String },

    #[error("invalid {kind}: {value:?}")]
    InvalidOption { kind: &'static str, value: String },
}

impl Error {
    pub fn invalid_option(kind: &'static str, value: impl Into<String>) -> Self {
        Error::InvalidOption {
            kind,
            value: value.into(),
        }
    }

    /// True for errors raised while configuring a widget, as opposed to driver setup.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedGlyphs { .. } | Error::InvalidOption { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
