//! 班级 CRUD 端点

use actix_web::{Responder, Result as ActixResult, web};
use std::sync::Arc;

use crate::services::{ClassForm, ClassService};

use super::helpers::{api_result, created_result};
use super::types::DeletedResponse;

pub async fn list_classes(service: web::Data<Arc<ClassService>>) -> ActixResult<impl Responder> {
    Ok(api_result(service.list_classes().await))
}

pub async fn get_class(
    path: web::Path<String>,
    service: web::Data<Arc<ClassService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(service.get_class(&path).await))
}

pub async fn create_class(
    body: web::Json<ClassForm>,
    service: web::Data<Arc<ClassService>>,
) -> ActixResult<impl Responder> {
    Ok(created_result(service.create_class(body.into_inner()).await))
}

pub async fn update_class(
    path: web::Path<String>,
    body: web::Json<ClassForm>,
    service: web::Data<Arc<ClassService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        service.update_class(&path, body.into_inner()).await,
    ))
}

pub async fn delete_class(
    path: web::Path<String>,
    service: web::Data<Arc<ClassService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    let result = service
        .delete_class(&id)
        .await
        .map(|_| DeletedResponse { id });
    Ok(api_result(result))
}
