//! Format registry
//!
//! The closed whitelist of output formats and input extension classes.
//! Unknown formats are rejected here, before any filesystem or process
//! interaction.

use crate::error::ConvertError;
use std::fmt;
use std::str::FromStr;

/// Output formats the converter will produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pdf,
    Txt,
    Png,
    Jpg,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Pdf, Format::Txt, Format::Png, Format::Jpg];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Txt => "txt",
            Format::Png => "png",
            Format::Jpg => "jpg",
        }
    }

    /// Extension classes accepted as input for this target format
    pub fn accepted_input_classes(&self) -> &'static [ExtensionClass] {
        match self {
            Format::Pdf => &[ExtensionClass::Image, ExtensionClass::Text, ExtensionClass::Pdf],
            Format::Txt => &[ExtensionClass::Text],
            Format::Png | Format::Jpg => &[ExtensionClass::Image],
        }
    }

    pub fn is_supported(format: &str) -> bool {
        Format::from_str(format).is_ok()
    }
}

impl FromStr for Format {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Format::Pdf),
            "txt" => Ok(Format::Txt),
            "png" => Ok(Format::Png),
            "jpg" => Ok(Format::Jpg),
            _ => Err(ConvertError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Grouping of input file extensions used to select a conversion routine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionClass {
    Image,
    Text,
    Pdf,
}

impl ExtensionClass {
    /// Classify an input extension (case-insensitive). Unknown extensions
    /// belong to no class and are never converted.
    pub fn from_extension(ext: &str) -> Option<ExtensionClass> {
        match ext.to_ascii_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "bmp" => Some(ExtensionClass::Image),
            "txt" | "md" | "csv" => Some(ExtensionClass::Text),
            "pdf" => Some(ExtensionClass::Pdf),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtensionClass::Image => "image",
            ExtensionClass::Text => "text",
            ExtensionClass::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExtensionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
