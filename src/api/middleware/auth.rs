use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::LOCATION,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, trace};

use crate::api::constants::{LOGIN_URL, REDIRECT_FIELD_NAME, SESSION_COOKIE_NAME};
use crate::api::jwt::{SessionClaims, get_jwt_service};

/// The logged-in user, stored in request extensions by [`LoginRequired`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
    pub is_staff: bool,
}

impl AuthenticatedUser {
    fn from_claims(claims: SessionClaims) -> Option<Self> {
        Some(Self {
            id: claims.user_id()?,
            username: claims.username,
            is_staff: claims.is_staff,
        })
    }
}

/// `/accounts/login/?next=<url-encoded next>`
pub fn login_redirect_url(next: &str) -> String {
    format!(
        "{}?{}={}",
        LOGIN_URL,
        REDIRECT_FIELD_NAME,
        urlencoding::encode(next)
    )
}

/// Login-required guard
///
/// Requests without a valid session are redirected to the login page with
/// the original path in `?next=`.
#[derive(Clone)]
pub struct LoginRequired;

impl<S, B> Transform<S, ServiceRequest> for LoginRequired
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = LoginRequiredMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoginRequiredMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct LoginRequiredMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> LoginRequiredMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    fn handle_unauthenticated(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        let next = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let location = login_redirect_url(next);
        debug!("Unauthenticated request to {} - redirecting", req.path());
        req.into_response(
            HttpResponse::Found()
                .insert_header((LOCATION, location))
                .finish()
                .map_into_right_body(),
        )
    }

    /// 从 Authorization header 提取 Bearer token
    fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
        req.headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string())
    }

    fn extract_session_cookie(req: &ServiceRequest) -> Option<String> {
        req.cookie(SESSION_COOKIE_NAME)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }

    fn authenticate(req: &ServiceRequest) -> Option<AuthenticatedUser> {
        let token = Self::extract_session_cookie(req).or_else(|| Self::extract_bearer_token(req))?;

        match get_jwt_service().validate_session_token(&token) {
            Ok(claims) => AuthenticatedUser::from_claims(claims),
            Err(e) => {
                debug!("Session token rejected: {}", e);
                None
            }
        }
    }
}

impl<S, B> Service<ServiceRequest> for LoginRequiredMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            let Some(user) = Self::authenticate(&req) else {
                return Ok(Self::handle_unauthenticated(req));
            };

            trace!("Request authenticated as {}", user.username);
            req.extensions_mut().insert(user);
            let response = srv.call(req).await?.map_into_left_body();
            Ok(response)
        })
    }
}
