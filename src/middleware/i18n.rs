// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

// Idiomas que sabemos responder. Qualquer outro cai no padrão (pt).
const SUPPORTED: [&str; 2] = ["pt", "en"];
const DEFAULT_LANG: &str = "pt";

/// Idioma preferido do cliente, lido do cabeçalho `Accept-Language`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl Locale {
    /// Resolve o idioma a partir do valor bruto do cabeçalho.
    pub fn from_header(header_str: &str) -> Self {
        // "pt-BR" -> "pt", "en-US" -> "en"; a lista já vem ordenada por qualidade
        let lang = accept_language::parse(header_str)
            .into_iter()
            .map(|tag| tag.split('-').next().unwrap_or_default().to_lowercase())
            .find(|primary| SUPPORTED.contains(&primary.as_str()))
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        Locale(lang)
    }

    pub fn is_english(&self) -> bool {
        self.0 == "en"
    }

    /// Escolhe entre o texto em português e o texto em inglês.
    pub fn pick(&self, pt: &'static str, en: &'static str) -> &'static str {
        if self.is_english() { en } else { pt }
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .map(Locale::from_header)
            .unwrap_or_default();

        Ok(locale)
    }
}
