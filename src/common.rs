pub mod error;
pub use error::AppError;
pub mod i18n;
pub use i18n::Locale;
pub mod parse;
