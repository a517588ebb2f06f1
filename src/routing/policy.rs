use once_cell::sync::Lazy;
use serde::Serialize;

use super::pattern::{PatternError, RoutePattern};

/// Routes reachable without a session. Locale-prefixed pages use `:locale`.
pub const PUBLIC_ROUTES: &[&str] = &[
    "/:locale/map(.*)",
    "/:locale/events(.*)",
    "/:locale/campus-guide(.*)",
    "/:locale/social(.*)",
    "/:locale/log-in(.*)",
    "/:locale/sign-up(.*)",
    "/:locale/forgot-password(.*)",
    "/:locale/reset-password(.*)",
    "/:locale/verify-email(.*)",
    // Auth for API routes is decided per handler
    "/api/(.*)",
    "/:locale",
    "/",
];

/// Leading segments of auth-flow links that arrive without a locale prefix.
const UNGATED_PREFIXES: &[&str] = &["sign-in", "sign-up", "forgot-password", "reset-password", "verify-email"];

/// File extensions served as static assets, never gated.
const STATIC_EXTENSIONS: &[&str] = &[
    "html", "htm", "css", "js", "jpg", "jpeg", "webp", "png", "gif", "svg", "ttf", "woff", "woff2",
    "ico", "csv", "doc", "docx", "xls", "xlsx", "zip", "webmanifest",
];

/// What the gate must do for one request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDecision {
    pub requires_auth: bool,
    pub apply_locale_routing: bool,
}

/// Classifies request paths against a static allow-list of public patterns.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    public: Vec<RoutePattern>,
}

static DEFAULT_POLICY: Lazy<RoutePolicy> = Lazy::new(|| {
    RoutePolicy::new(PUBLIC_ROUTES).unwrap_or_else(|e| panic!("built-in public routes are invalid: {e}"))
});

impl RoutePolicy {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, PatternError> {
        let public = patterns
            .iter()
            .map(|p| RoutePattern::compile(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { public })
    }

    /// Process-wide policy over [`PUBLIC_ROUTES`], compiled on first use.
    pub fn global() -> &'static RoutePolicy {
        &DEFAULT_POLICY
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.public.iter().map(RoutePattern::as_str)
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public.iter().any(|p| p.matches(path))
    }

    /// The pattern that makes `path` public, if any.
    pub fn matching_pattern(&self, path: &str) -> Option<&str> {
        self.public.iter().find(|p| p.matches(path)).map(RoutePattern::as_str)
    }

    pub fn evaluate(&self, path: &str) -> AccessDecision {
        AccessDecision {
            requires_auth: !self.is_public(path),
            apply_locale_routing: !is_api_path(path),
        }
    }

    /// Framework internals, unprefixed auth-flow links and static files skip
    /// the gate entirely.
    pub fn bypasses(&self, path: &str) -> bool {
        let first = path.trim_start_matches('/').split('/').next().unwrap_or_default();
        if first == "_next" || UNGATED_PREFIXES.contains(&first) {
            return true;
        }

        let last = path.rsplit('/').next().unwrap_or_default();
        match last.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => {
                STATIC_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known))
            }
            _ => false,
        }
    }
}

pub fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}
