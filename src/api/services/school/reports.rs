//! 报表端点：JSON / PDF / CSV

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{error, info};

use crate::errors::AttendanceError;
use crate::report::{AttendanceReport, ReportQuery, csv::render_csv, pdf::render_pdf};
use crate::services::ReportService;
use crate::utils::school_today;

use super::helpers::{attachment_response, error_from_attendance, success_response};
use super::types::ReportParams;

async fn load_report(
    params: &ReportParams,
    service: &ReportService,
) -> Result<AttendanceReport, AttendanceError> {
    let query = ReportQuery::from_params(
        params.period.as_deref(),
        params.date.as_deref(),
        params.month.as_deref(),
        params.class.as_deref(),
        school_today(),
    )?;
    service.build_report(&query).await
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// GET /reports/attendance
pub async fn get_report(
    params: web::Query<ReportParams>,
    service: web::Data<Arc<ReportService>>,
) -> ActixResult<impl Responder> {
    Ok(match load_report(&params, &service).await {
        Ok(report) => success_response(report),
        Err(e) => error_from_attendance(&e),
    })
}

/// GET /reports/attendance/pdf
pub async fn download_pdf(
    params: web::Query<ReportParams>,
    service: web::Data<Arc<ReportService>>,
) -> ActixResult<HttpResponse> {
    let report = match load_report(&params, &service).await {
        Ok(report) => report,
        Err(e) => return Ok(error_from_attendance(&e)),
    };

    let file_name = report.pdf_file_name(now_millis());
    // printpdf 文档不是 Send，放到阻塞线程池渲染
    let rendered = web::block(move || render_pdf(&report)).await;
    let bytes = match rendered {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => return Ok(error_from_attendance(&e)),
        Err(e) => {
            error!("PDF render task failed: {}", e);
            return Ok(error_from_attendance(&AttendanceError::report_generation(
                "PDF rendering was interrupted",
            )));
        }
    };

    info!("API: PDF report {} ({} bytes)", file_name, bytes.len());
    Ok(attachment_response("application/pdf", &file_name, bytes))
}

/// GET /reports/attendance/csv
pub async fn download_csv(
    params: web::Query<ReportParams>,
    service: web::Data<Arc<ReportService>>,
) -> ActixResult<HttpResponse> {
    let report = match load_report(&params, &service).await {
        Ok(report) => report,
        Err(e) => return Ok(error_from_attendance(&e)),
    };

    match render_csv(&report) {
        Ok(bytes) => Ok(attachment_response(
            "text/csv; charset=utf-8",
            &report.csv_file_name(now_millis()),
            bytes,
        )),
        Err(e) => Ok(error_from_attendance(&e)),
    }
}
