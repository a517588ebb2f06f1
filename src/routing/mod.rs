//! Request path classification: which paths are public, which get a locale
//! prefix, and how that locale is chosen.

pub mod locale;
pub mod pattern;
pub mod policy;

pub use locale::{cookie_value, LocaleResolver, ResolvedLocale};
pub use pattern::{PatternError, RoutePattern};
pub use policy::{is_api_path, AccessDecision, RoutePolicy, PUBLIC_ROUTES};
