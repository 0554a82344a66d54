//! 学生 CRUD 端点

use actix_web::{Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::trace;

use crate::services::{StudentForm, StudentService};
use crate::storage::StudentFilter;
use crate::utils::class_selection;

use super::helpers::{api_result, created_result};
use super::types::{DeletedResponse, StudentListQuery};

pub async fn list_students(
    query: web::Query<StudentListQuery>,
    service: web::Data<Arc<StudentService>>,
) -> ActixResult<impl Responder> {
    trace!("API: list students with {:?}", query);
    let filter = StudentFilter {
        // 搜索词按原样匹配，空串视为不过滤
        search: query.search.clone().filter(|s| !s.is_empty()),
        class_name: class_selection(query.class.as_deref()),
    };
    Ok(api_result(service.list_students(&filter).await))
}

pub async fn get_student(
    path: web::Path<String>,
    service: web::Data<Arc<StudentService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(service.get_student(&path).await))
}

pub async fn create_student(
    body: web::Json<StudentForm>,
    service: web::Data<Arc<StudentService>>,
) -> ActixResult<impl Responder> {
    Ok(created_result(service.create_student(body.into_inner()).await))
}

pub async fn update_student(
    path: web::Path<String>,
    body: web::Json<StudentForm>,
    service: web::Data<Arc<StudentService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        service.update_student(&path, body.into_inner()).await,
    ))
}

pub async fn delete_student(
    path: web::Path<String>,
    service: web::Data<Arc<StudentService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    let result = service
        .delete_student(&id)
        .await
        .map(|_| DeletedResponse { id });
    Ok(api_result(result))
}
