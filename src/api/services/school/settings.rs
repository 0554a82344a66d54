//! 学校设置端点

use actix_web::{Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::trace;

use crate::services::SettingsService;

use super::helpers::{api_result, success_response};
use super::types::UpdateSettingsRequest;

pub async fn get_settings(
    service: web::Data<Arc<SettingsService>>,
) -> ActixResult<impl Responder> {
    trace!("API: get settings");
    Ok(success_response(service.get_settings().await))
}

pub async fn update_settings(
    body: web::Json<UpdateSettingsRequest>,
    service: web::Data<Arc<SettingsService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(service.update_settings(&body.school_name).await))
}
