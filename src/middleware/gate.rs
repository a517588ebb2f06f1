//! Request gate: the ordered policy stages every request passes before routing.
//!
//! The access decision is computed once from the path the client sent. Stages
//! then run in order (session lookup, locale routing, auth enforcement) and any
//! stage may answer the request itself instead of passing it on.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{uri::PathAndQuery, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::SessionKeys;
use crate::config;
use crate::error::ApiError;
use crate::routing::{is_api_path, AccessDecision, LocaleResolver, ResolvedLocale, RoutePolicy};

use super::auth::{authenticate, AuthUser};

/// Per-request state shared by the stages.
pub struct GateContext<'a> {
    pub request: &'a mut Request,
    pub original_path: String,
    pub original_query: Option<String>,
    pub decision: AccessDecision,
}

impl GateContext<'_> {
    /// Path and query as the client sent them.
    pub fn original_target(&self) -> String {
        match &self.original_query {
            Some(q) => format!("{}?{}", self.original_path, q),
            None => self.original_path.clone(),
        }
    }
}

pub enum StageOutcome {
    Continue,
    Respond(Response),
}

pub trait GateStage: Send + Sync {
    fn name(&self) -> &'static str;

    fn applies(&self, decision: &AccessDecision) -> bool;

    fn run(&self, ctx: &mut GateContext<'_>) -> StageOutcome;
}

/// Attaches the caller's identity when a valid session token is present.
pub struct SessionStage {
    keys: SessionKeys,
    cookie_name: String,
}

impl GateStage for SessionStage {
    fn name(&self) -> &'static str {
        "session"
    }

    fn applies(&self, _decision: &AccessDecision) -> bool {
        true
    }

    fn run(&self, ctx: &mut GateContext<'_>) -> StageOutcome {
        if let Some(user) = authenticate(ctx.request.headers(), &self.keys, &self.cookie_name) {
            ctx.request.extensions_mut().insert(user);
        }
        StageOutcome::Continue
    }
}

/// Rewrites page requests onto a locale-prefixed path.
pub struct LocaleStage {
    resolver: LocaleResolver,
}

impl GateStage for LocaleStage {
    fn name(&self) -> &'static str {
        "locale"
    }

    fn applies(&self, decision: &AccessDecision) -> bool {
        decision.apply_locale_routing
    }

    fn run(&self, ctx: &mut GateContext<'_>) -> StageOutcome {
        let resolved = self.resolver.resolve(&ctx.original_path, ctx.request.headers());

        if resolved.was_rewritten(&ctx.original_path) {
            match rewrite_uri(ctx.request.uri(), &resolved.rewritten_path, ctx.original_query.as_deref()) {
                Ok(uri) => {
                    tracing::debug!("Locale rewrite {} -> {}", ctx.original_path, resolved.rewritten_path);
                    *ctx.request.uri_mut() = uri;
                }
                Err(e) => {
                    tracing::warn!("Could not rewrite {} for locale {}: {}", ctx.original_path, resolved.locale, e);
                }
            }
        }

        ctx.request.extensions_mut().insert(resolved);
        StageOutcome::Continue
    }
}

fn rewrite_uri(uri: &Uri, path: &str, query: Option<&str>) -> Result<Uri, axum::http::Error> {
    let target = match query {
        Some(q) => format!("{path}?{q}"),
        None => path.to_string(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(target)?);
    Ok(Uri::from_parts(parts)?)
}

/// Turns away requests to non-public paths that carry no session.
pub struct AuthStage {
    default_locale: String,
    sign_in_path: String,
}

impl AuthStage {
    fn sign_in_redirect(&self, ctx: &GateContext<'_>) -> Response {
        let locale = ctx
            .request
            .extensions()
            .get::<ResolvedLocale>()
            .map(|r| r.locale.as_str())
            .unwrap_or(&self.default_locale);
        let return_to: String = url::form_urlencoded::byte_serialize(ctx.original_target().as_bytes()).collect();

        Redirect::temporary(&format!("/{}{}?redirect_url={}", locale, self.sign_in_path, return_to)).into_response()
    }
}

impl GateStage for AuthStage {
    fn name(&self) -> &'static str {
        "auth"
    }

    fn applies(&self, decision: &AccessDecision) -> bool {
        decision.requires_auth
    }

    fn run(&self, ctx: &mut GateContext<'_>) -> StageOutcome {
        if ctx.request.extensions().get::<AuthUser>().is_some() {
            return StageOutcome::Continue;
        }

        tracing::warn!("Unauthenticated request to protected path {}", ctx.original_path);
        if is_api_path(&ctx.original_path) {
            StageOutcome::Respond(ApiError::unauthorized("Authentication required").into_response())
        } else {
            StageOutcome::Respond(self.sign_in_redirect(ctx))
        }
    }
}

/// Route policy plus its ordered stages.
pub struct Gate {
    policy: RoutePolicy,
    stages: Vec<Box<dyn GateStage>>,
}

impl Gate {
    pub fn new(
        policy: RoutePolicy,
        resolver: LocaleResolver,
        keys: SessionKeys,
        cookie_name: impl Into<String>,
        sign_in_path: impl Into<String>,
    ) -> Self {
        let default_locale = resolver.default_locale().to_string();
        let stages: Vec<Box<dyn GateStage>> = vec![
            Box::new(SessionStage {
                keys,
                cookie_name: cookie_name.into(),
            }),
            Box::new(LocaleStage { resolver }),
            Box::new(AuthStage {
                default_locale,
                sign_in_path: sign_in_path.into(),
            }),
        ];
        Self { policy, stages }
    }

    pub fn from_config() -> Self {
        let config = config::config();
        Self::new(
            RoutePolicy::global().clone(),
            LocaleResolver::from_config(&config.i18n),
            SessionKeys::from_config(),
            config.security.session_cookie.clone(),
            config.i18n.sign_in_path.clone(),
        )
    }

    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run the stages; `Some` means a stage answered and routing must not happen.
    pub fn apply(&self, request: &mut Request) -> Option<Response> {
        let original_path = request.uri().path().to_string();
        if self.policy.bypasses(&original_path) {
            return None;
        }

        let decision = self.policy.evaluate(&original_path);
        tracing::debug!(
            "Gate {} requires_auth={} locale={}",
            original_path,
            decision.requires_auth,
            decision.apply_locale_routing
        );

        let original_query = request.uri().query().map(str::to_string);
        let mut ctx = GateContext {
            request,
            original_path,
            original_query,
            decision,
        };

        for stage in &self.stages {
            if !stage.applies(&decision) {
                continue;
            }
            if let StageOutcome::Respond(response) = stage.run(&mut ctx) {
                tracing::debug!("Gate stage '{}' answered {}", stage.name(), ctx.original_path);
                return Some(response);
            }
        }

        None
    }
}

pub async fn gate_middleware(State(gate): State<Arc<Gate>>, mut request: Request, next: Next) -> Response {
    match gate.apply(&mut request) {
        Some(response) => response,
        None => next.run(request).await,
    }
}
