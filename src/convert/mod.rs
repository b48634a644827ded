//! File conversion
//!
//! Format whitelist, conversion dispatch, and the rendering routines.

pub mod dispatcher;
pub mod formats;
pub mod results;
pub mod routines;

pub use dispatcher::Converter;
pub use formats::{ExtensionClass, Format};
pub use results::ConversionResult;
