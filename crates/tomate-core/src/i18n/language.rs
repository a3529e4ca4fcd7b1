use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_language_is_english() {
        assert_eq!(Language::default(), Language::En);
        assert_eq!(Language::default().code(), "en");
    }

    #[test]
    fn language_deserializes_from_lowercase_code() {
        #[derive(Deserialize)]
        struct Holder {
            language: Language,
        }

        let parsed: Holder = toml::from_str(r#"language = "fr""#).unwrap();
        assert_eq!(parsed.language, Language::Fr);

        assert!(toml::from_str::<Holder>(r#"language = "de""#).is_err());
    }
}
