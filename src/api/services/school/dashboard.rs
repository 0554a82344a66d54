//! 仪表盘端点

use actix_web::{Responder, Result as ActixResult, web};
use std::sync::Arc;

use crate::services::DashboardService;

use super::helpers::{api_result, date_or_today, error_from_attendance};
use super::types::DateQuery;

pub async fn get_dashboard(
    query: web::Query<DateQuery>,
    service: web::Data<Arc<DashboardService>>,
) -> ActixResult<impl Responder> {
    let date = match date_or_today(query.date.as_deref()) {
        Ok(d) => d,
        Err(e) => return Ok(error_from_attendance(&e)),
    };
    Ok(api_result(service.dashboard(date).await))
}
