//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    http::{Method, header},
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::{error, warn};

use crate::api::middleware::{ApiAuth, RequestIdMiddleware, TimingMiddleware};
use crate::api::services::school::json_config;
use crate::api::services::{AppStartTime, health_routes, school_v1_routes};
use crate::runtime::lifetime;

/// Build CORS middleware from the allowed origin list
///
/// - empty: same-origin only
/// - contains `*`: any origin
/// - otherwise: exactly the listed origins
pub fn build_cors_middleware(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ])
        .allowed_header("X-Request-ID")
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .max_age(3600);

    if allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| {
            error!("Server startup failed: {}", e);
            e
        })?;

    let storage = startup.storage.clone();
    let services = startup.services.clone();
    let api_prefix = startup.route_config.api_prefix.clone();
    let health_prefix = startup.route_config.health_prefix.clone();

    let config = crate::config::get_config();
    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let cors_origins = config.api.cors_allowed_origins.clone();
    if cors_origins.is_empty() {
        warn!("CORS allowed origins is empty, cross-origin requests will be rejected");
    }
    let payload_limit = config.api.payload_limit;

    // HttpServer 闭包会拿走 storage，提前克隆连接用于关闭
    let db_for_shutdown = storage.get_db().clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware) // 最外层，记录请求延迟
            .wrap(RequestIdMiddleware) // 为每个请求生成 request_id
            .wrap(build_cors_middleware(&cors_origins))
            .wrap(Compress::default())
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(services.settings.clone()))
            .app_data(web::Data::new(services.classes.clone()))
            .app_data(web::Data::new(services.students.clone()))
            .app_data(web::Data::new(services.teachers.clone()))
            .app_data(web::Data::new(services.attendance.clone()))
            .app_data(web::Data::new(services.teacher_attendance.clone()))
            .app_data(web::Data::new(services.dashboard.clone()))
            .app_data(web::Data::new(services.reports.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(json_config(payload_limit))
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .service(
                web::scope(&api_prefix)
                    .wrap(ApiAuth::from_config())
                    .service(school_v1_routes()),
            )
            .service(web::scope(&health_prefix).service(health_routes()))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    // 等待服务器退出或关闭信号
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
