use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::services::AppServices;
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub services: AppServices,
    pub route_config: RouteConfig,
}

#[derive(Clone, Debug)]
pub struct RouteConfig {
    pub api_prefix: String,
    pub health_prefix: String,
    pub token_protected: bool,
}

impl RouteConfig {
    pub fn from_config() -> Self {
        let config = crate::config::get_config();
        Self {
            api_prefix: config.api.prefix.clone(),
            health_prefix: config.api.health_prefix.clone(),
            token_protected: config.api.auth_token().is_some(),
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、业务 service 和路由配置
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    // Postgres/MySQL 的 TLS 连接需要默认 crypto provider；重复安装时忽略
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let services = AppServices::new(storage.clone());

    // 预热学校设置缓存
    let settings = services.settings.get_settings().await;
    debug!("School name: {}", settings.school_name);

    let route_config = RouteConfig::from_config();
    log_route_config(&route_config);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        services,
        route_config,
    })
}

fn log_route_config(route_config: &RouteConfig) {
    info!("API available at: {}/v1", route_config.api_prefix);
    info!("Health API available at: {}", route_config.health_prefix);
    if !route_config.token_protected {
        warn!("api.token is not set, the API is open to anyone who can reach it");
    }
}
