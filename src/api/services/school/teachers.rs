//! 教师 CRUD 端点

use actix_web::{Responder, Result as ActixResult, web};
use std::sync::Arc;

use crate::services::{TeacherForm, TeacherService};

use super::helpers::{api_result, created_result};
use super::types::DeletedResponse;

pub async fn list_teachers(
    service: web::Data<Arc<TeacherService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(service.list_teachers().await))
}

pub async fn get_teacher(
    path: web::Path<String>,
    service: web::Data<Arc<TeacherService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(service.get_teacher(&path).await))
}

pub async fn create_teacher(
    body: web::Json<TeacherForm>,
    service: web::Data<Arc<TeacherService>>,
) -> ActixResult<impl Responder> {
    Ok(created_result(service.create_teacher(body.into_inner()).await))
}

pub async fn update_teacher(
    path: web::Path<String>,
    body: web::Json<TeacherForm>,
    service: web::Data<Arc<TeacherService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        service.update_teacher(&path, body.into_inner()).await,
    ))
}

pub async fn delete_teacher(
    path: web::Path<String>,
    service: web::Data<Arc<TeacherService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    let result = service
        .delete_teacher(&id)
        .await
        .map(|_| DeletedResponse { id });
    Ok(api_result(result))
}
