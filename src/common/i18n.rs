// src/common/i18n.rs

use std::collections::HashMap;

pub const FALLBACK_LANG: &str = "pt";

// Mensagens embutidas: (chave, pt, en)
const MESSAGES: &[(&str, &str, &str)] = &[
    ("error.validation", "Um ou mais campos são inválidos.", "One or more fields are invalid."),
    ("error.invalid_input", "Os dados enviados não são válidos.", "The submitted data is not valid."),
    ("error.not_found", "Registro não encontrado.", "Record not found."),
    (
        "error.store_unavailable",
        "Falha ao acessar o banco de dados. Tente novamente.",
        "Could not reach the data store. Please try again.",
    ),
    ("error.internal", "Ocorreu um erro inesperado.", "An unexpected error occurred."),
];

/// Tabela de traduções carregada uma vez no `AppState`.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<String, HashMap<&'static str, String>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages: HashMap<String, HashMap<&'static str, String>> = HashMap::new();
        for &(key, pt, en) in MESSAGES {
            messages.entry("pt".to_string()).or_default().insert(key, pt.to_string());
            messages.entry("en".to_string()).or_default().insert(key, en.to_string());
        }
        Self { messages }
    }

    // Idioma desconhecido cai para o português; chave desconhecida volta a própria chave.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .or_else(|| self.messages.get(FALLBACK_LANG))
            .and_then(|table| table.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_known_keys_per_language() {
        let store = I18nStore::new();
        assert_eq!(store.translate("en", "error.not_found"), "Record not found.");
        assert_eq!(store.translate("pt", "error.not_found"), "Registro não encontrado.");
    }

    #[test]
    fn unknown_language_falls_back_to_portuguese() {
        let store = I18nStore::new();
        assert_eq!(store.translate("de", "error.internal"), "Ocorreu um erro inesperado.");
    }

    #[test]
    fn unknown_key_is_returned_verbatim() {
        let store = I18nStore::new();
        assert_eq!(store.translate("en", "error.nope"), "error.nope");
    }
}
