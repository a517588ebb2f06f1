// handlers/protected/mod.rs - Handlers that require a session
//
// These sit under /api/* like the public ones, so the gate lets them through;
// the AuthUser extractor enforces the session per route and answers 401.

pub mod events;
