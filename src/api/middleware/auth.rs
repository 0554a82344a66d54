//! Bearer token authentication for the API scope
//!
//! Active only when `api.token` is configured; otherwise every request passes.

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, header::AUTHORIZATION},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use subtle::ConstantTimeEq;
use tracing::{info, trace};

use crate::api::services::school::{ApiResponse, ErrorCode};

/// Constant-time token comparison
pub fn token_matches(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

#[derive(Clone)]
pub struct ApiAuth {
    token: Option<Rc<str>>,
}

impl ApiAuth {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(Rc::from),
        }
    }

    /// Token from the global configuration
    pub fn from_config() -> Self {
        let config = crate::config::get_config();
        Self::new(config.api.auth_token())
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiAuthMiddleware {
            service: Rc::new(service),
            token: self.token.clone(),
        }))
    }
}

pub struct ApiAuthMiddleware<S> {
    service: Rc<S>,
    token: Option<Rc<str>>,
}

impl<S> ApiAuthMiddleware<S> {
    fn extract_bearer_token(req: &ServiceRequest) -> Option<&str> {
        req.headers()
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::trim)
    }

    fn handle_unauthorized<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        info!("API authentication failed - invalid or missing token");
        req.into_response(
            HttpResponse::Unauthorized()
                .json(ApiResponse::<()> {
                    code: ErrorCode::Unauthorized as i32,
                    message: "Unauthorized: invalid or missing token".to_string(),
                    data: None,
                })
                .map_into_right_body(),
        )
    }
}

impl<S, B> Service<ServiceRequest> for ApiAuthMiddleware<S>
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

        let authorized = match self.token.as_deref() {
            None => true,
            // CORS 预检请求不带 Authorization
            Some(_) if req.method() == Method::OPTIONS => true,
            Some(expected) => Self::extract_bearer_token(&req)
                .is_some_and(|provided| token_matches(expected, provided)),
        };

        Box::pin(async move {
            if !authorized {
                return Ok(Self::handle_unauthorized(req));
            }
            trace!("API request authorized");
            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}
