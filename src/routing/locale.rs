use axum::http::{header, HeaderMap};
use serde::Serialize;

/// Cookie that pins a visitor's locale choice.
pub const LOCALE_COOKIE: &str = "NEXT_LOCALE";

/// Locale chosen for a page request and the path it should be served under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocale {
    pub locale: String,
    pub rewritten_path: String,
}

impl ResolvedLocale {
    pub fn was_rewritten(&self, original: &str) -> bool {
        self.rewritten_path != original
    }
}

#[derive(Debug, Clone)]
pub struct LocaleResolver {
    locales: Vec<String>,
    default_locale: String,
}

impl LocaleResolver {
    /// The default locale is always supported, even if missing from `locales`.
    pub fn new(locales: Vec<String>, default_locale: impl Into<String>) -> Self {
        let default_locale = default_locale.into();
        let mut locales = locales;
        if !locales.contains(&default_locale) {
            locales.push(default_locale.clone());
        }
        Self { locales, default_locale }
    }

    pub fn from_config(config: &crate::config::I18nConfig) -> Self {
        Self::new(config.locales.clone(), config.default_locale.clone())
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn supports(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }

    /// Locale carried by the first path segment, if it is a supported one.
    pub fn locale_in_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        let first = path.trim_start_matches('/').split('/').next()?;
        self.supports(first).then_some(first)
    }

    pub fn resolve(&self, path: &str, headers: &HeaderMap) -> ResolvedLocale {
        if let Some(locale) = self.locale_in_path(path) {
            return ResolvedLocale {
                locale: locale.to_string(),
                rewritten_path: path.to_string(),
            };
        }

        let locale = self
            .from_cookie(headers)
            .or_else(|| self.from_accept_language(headers))
            .unwrap_or_else(|| self.default_locale.clone());

        let rewritten_path = if path == "/" || path.is_empty() {
            format!("/{locale}")
        } else {
            format!("/{locale}{path}")
        };

        ResolvedLocale { locale, rewritten_path }
    }

    fn from_cookie(&self, headers: &HeaderMap) -> Option<String> {
        cookie_value(headers, LOCALE_COOKIE).filter(|l| self.supports(l))
    }

    fn from_accept_language(&self, headers: &HeaderMap) -> Option<String> {
        let value = headers.get(header::ACCEPT_LANGUAGE)?.to_str().ok()?;
        value
            .split(',')
            .filter_map(|entry| entry.split(';').next())
            .map(|tag| tag.trim().split('-').next().unwrap_or_default().to_ascii_lowercase())
            .find(|primary| self.supports(primary))
    }
}

/// Value of a named cookie from the `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
