use super::Language;
use std::collections::HashMap;

const EN_TRANSLATIONS: &str = include_str!("locales/en.toml");
const FR_TRANSLATIONS: &str = include_str!("locales/fr.toml");

/// Flat `section.key` lookup over the embedded locale files.
#[derive(Debug, Clone)]
pub struct Translator {
    language: Language,
    entries: HashMap<String, String>,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        let content = match language {
            Language::En => EN_TRANSLATIONS,
            Language::Fr => FR_TRANSLATIONS,
        };

        Self {
            language,
            entries: flatten_sections(content),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Missing keys come back unchanged.
    pub fn get(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.get(key), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

fn flatten_sections(content: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();
    let table: toml::Table = toml::from_str(content).unwrap_or_default();

    for (section, values) in table {
        if let toml::Value::Table(keys) = values {
            for (key, value) in keys {
                if let toml::Value::String(text) = value {
                    entries.insert(format!("{}.{}", section, key), text);
                }
            }
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_reminder_texts() {
        let translator = Translator::new(Language::En);

        assert_eq!(translator.get("reminder.title"), "Pomodoro");
        assert_eq!(translator.get("reminder.task_next"), "Time to do your task");
        assert_eq!(translator.get("reminder.break_next"), "Time to have a break");
    }

    #[test]
    fn french_reminder_texts() {
        let translator = Translator::new(Language::Fr);

        assert_eq!(translator.language(), Language::Fr);
        assert_eq!(translator.get("reminder.task_next"), "C'est l'heure de reprendre votre tâche");
    }

    #[test]
    fn missing_key_is_returned_as_is() {
        let translator = Translator::default();

        assert_eq!(translator.get("nothing.here"), "nothing.here");
    }

    #[test]
    fn formats_placeholders() {
        let translator = Translator::new(Language::En);

        let text = translator.format("view.sprint", &[("current", "2"), ("total", "4")]);

        assert_eq!(text, "Sprint 2/4");
    }

    #[test]
    fn every_english_key_exists_in_french() {
        let english = flatten_sections(EN_TRANSLATIONS);
        let french = flatten_sections(FR_TRANSLATIONS);

        let missing: Vec<_> = english
            .keys()
            .filter(|key| !french.contains_key(*key))
            .collect();

        assert!(missing.is_empty(), "missing french keys: {:?}", missing);
    }
}
