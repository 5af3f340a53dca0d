//! Catalogue of supported shortening services

use strum::{Display, EnumIter, EnumString};

/// A public URL shortening service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ShortenerService {
    /// tinyurl.com
    #[default]
    #[strum(serialize = "tinyurl")]
    #[cfg_attr(feature = "clap", value(name = "tinyurl"))]
    TinyUrl,
    /// is.gd
    #[strum(serialize = "isgd")]
    #[cfg_attr(feature = "clap", value(name = "isgd"))]
    IsGd,
    /// v.gd
    #[strum(serialize = "vgd")]
    #[cfg_attr(feature = "clap", value(name = "vgd"))]
    VGd,
    /// 1pt.co
    #[strum(serialize = "1ptco")]
    #[cfg_attr(feature = "clap", value(name = "1ptco"))]
    OnePtCo,
}

impl ShortenerService {
    /// Public base URL of the service
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::TinyUrl => "https://tinyurl.com",
            Self::IsGd => "https://is.gd",
            Self::VGd => "https://v.gd",
            Self::OnePtCo => "https://1pt.co",
        }
    }

    /// Path of the create endpoint, relative to the base URL
    #[must_use]
    pub const fn create_path(self) -> &'static str {
        match self {
            Self::TinyUrl => "/api-create.php",
            Self::IsGd | Self::VGd => "/create.php",
            Self::OnePtCo => "/addURL",
        }
    }

    /// Upper-case label used in progress messages
    #[must_use]
    pub fn label(self) -> String {
        self.to_string().to_uppercase()
    }
}
