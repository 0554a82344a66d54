//! HTTP timing middleware
//!
//! Logs request latency at debug level, and at warn level for slow requests.

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const SLOW_REQUEST: Duration = Duration::from_secs(2);

#[derive(Clone, Default)]
pub struct TimingMiddleware;

impl<S, B> Transform<S, ServiceRequest> for TimingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TimingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimingService {
            service: Rc::new(service),
        }))
    }
}

pub struct TimingService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TimingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
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
        let start = Instant::now();
        let endpoint = classify_endpoint(req.path());

        Box::pin(async move {
            let result = srv.call(req).await;
            let elapsed = start.elapsed();
            let status = match &result {
                Ok(response) => response.status().as_u16(),
                Err(e) => e.as_response_error().status_code().as_u16(),
            };

            if elapsed >= SLOW_REQUEST {
                warn!(
                    endpoint,
                    status,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Slow request"
                );
            } else {
                debug!(
                    endpoint,
                    status,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Request completed"
                );
            }

            result
        })
    }
}

/// Group request paths by resource for log fields
fn classify_endpoint(path: &str) -> &'static str {
    const RESOURCES: [&str; 8] = [
        "settings",
        "classes",
        "students",
        "teachers",
        "attendance",
        "dashboard",
        "reports",
        "health",
    ];

    path.split('/')
        .find_map(|segment| RESOURCES.iter().find(|r| **r == segment).copied())
        .unwrap_or("other")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_endpoint() {
        assert_eq!(classify_endpoint("/api/v1/classes/abc"), "classes");
        assert_eq!(classify_endpoint("/api/v1/attendance/students"), "attendance");
        assert_eq!(classify_endpoint("/health/ready"), "health");
        assert_eq!(classify_endpoint("/favicon.ico"), "other");
    }
}
