mod language;
mod translations;

pub use language::Language;
pub use translations::Translator;
