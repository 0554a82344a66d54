//! School API integration tests
//!
//! Every test gets its own SQLite database in a temp dir and talks to the
//! `/api/v1` routes through `actix_web::test`.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use attendance_tracker::api::middleware::{ApiAuth, RequestIdMiddleware};
use attendance_tracker::api::services::school::json_config;
use attendance_tracker::api::services::{AppStartTime, health_routes, school_v1_routes};
use attendance_tracker::services::AppServices;
use attendance_tracker::storage::SeaOrmStorage;

// =============================================================================
// Test Setup
// =============================================================================

async fn setup() -> (TempDir, AppServices) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("api_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite")
            .await
            .expect("Failed to create storage"),
    );
    (temp_dir, AppServices::new(storage))
}

/// Test app with the v1 routes under `/api` and health under `/health`
macro_rules! school_app {
    ($services:expr) => {
        school_app!($services, ApiAuth::new(None))
    };
    ($services:expr, $auth:expr) => {{
        let s = &$services;
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(s.storage.clone()))
                .app_data(web::Data::new(s.settings.clone()))
                .app_data(web::Data::new(s.classes.clone()))
                .app_data(web::Data::new(s.students.clone()))
                .app_data(web::Data::new(s.teachers.clone()))
                .app_data(web::Data::new(s.attendance.clone()))
                .app_data(web::Data::new(s.teacher_attendance.clone()))
                .app_data(web::Data::new(s.dashboard.clone()))
                .app_data(web::Data::new(s.reports.clone()))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .app_data(json_config(64 * 1024))
                .service(web::scope("/api").wrap($auth).service(school_v1_routes()))
                .service(web::scope("/health").service(health_routes())),
        )
        .await
    }};
}

/// Call the app and decode the JSON envelope
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

macro_rules! create_class {
    ($app:expr, $name:expr) => {{
        let req = TestRequest::post()
            .uri("/api/v1/classes")
            .set_json(json!({
                "name": $name,
                "teacher_name": "Bu Sari",
                "teacher_nip": "198001",
                "headmaster_name": "Pak Budi",
                "headmaster_nip": "197002",
            }))
            .to_request();
        let (status, body) = send!($app, req);
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"].clone()
    }};
}

macro_rules! create_student {
    ($app:expr, $nis:expr, $name:expr, $class:expr) => {{
        let req = TestRequest::post()
            .uri("/api/v1/students")
            .set_json(json!({ "nis": $nis, "name": $name, "class_name": $class }))
            .to_request();
        let (status, body) = send!($app, req);
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"].clone()
    }};
}

// =============================================================================
// Settings
// =============================================================================

#[actix_rt::test]
async fn test_settings_default_and_update() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    let req = TestRequest::get().uri("/api/v1/settings").to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["school_name"], "TK DIGITAL INDONESIA");

    let req = TestRequest::put()
        .uri("/api/v1/settings")
        .set_json(json!({ "school_name": "TK Harapan Bangsa" }))
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["school_name"], "TK Harapan Bangsa");
    assert_eq!(body["data"]["id"], "1");

    let req = TestRequest::get().uri("/api/v1/settings").to_request();
    let (_, body) = send!(app, req);
    assert_eq!(body["data"]["school_name"], "TK Harapan Bangsa");
}

#[actix_rt::test]
async fn test_settings_blank_name_rejected() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    let req = TestRequest::put()
        .uri("/api/v1/settings")
        .set_json(json!({ "school_name": "   " }))
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1000);
    assert!(body.get("data").is_none());
}

// =============================================================================
// Classes
// =============================================================================

#[actix_rt::test]
async fn test_class_crud() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    let class = create_class!(app, "TK B");
    create_class!(app, "TK A");
    let id = class["id"].as_str().unwrap().to_string();
    assert_eq!(class["teacher_name"], "Bu Sari");

    // 按名称排序
    let req = TestRequest::get().uri("/api/v1/classes").to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["TK A", "TK B"]);

    let req = TestRequest::put()
        .uri(&format!("/api/v1/classes/{}", id))
        .set_json(json!({ "name": "TK B1", "teacher_name": "Bu Rina" }))
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "TK B1");

    let req = TestRequest::get()
        .uri(&format!("/api/v1/classes/{}", id))
        .to_request();
    let (_, body) = send!(app, req);
    assert_eq!(body["data"]["teacher_name"], "Bu Rina");

    let req = TestRequest::delete()
        .uri(&format!("/api/v1/classes/{}", id))
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);

    let req = TestRequest::get()
        .uri(&format!("/api/v1/classes/{}", id))
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1004);
}

#[actix_rt::test]
async fn test_class_duplicate_name_conflict() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    create_class!(app, "TK A");
    let req = TestRequest::post()
        .uri("/api/v1/classes")
        .set_json(json!({ "name": "TK A" }))
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1009);
}

#[actix_rt::test]
async fn test_class_blank_name_rejected() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    let req = TestRequest::post()
        .uri("/api/v1/classes")
        .set_json(json!({ "name": "" }))
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_class_rename_moves_students() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    let class = create_class!(app, "TK A");
    create_student!(app, "1001", "Andi", "TK A");

    let req = TestRequest::put()
        .uri(&format!("/api/v1/classes/{}", class["id"].as_str().unwrap()))
        .set_json(json!({ "name": "TK A1" }))
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::OK);

    let req = TestRequest::get()
        .uri("/api/v1/students?class=TK%20A1")
        .to_request();
    let (_, body) = send!(app, req);
    let students = body["data"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["class_name"], "TK A1");
}

#[actix_rt::test]
async fn test_delete_class_with_students_conflict() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    let class = create_class!(app, "TK A");
    create_student!(app, "1001", "Andi", "TK A");

    let req = TestRequest::delete()
        .uri(&format!("/api/v1/classes/{}", class["id"].as_str().unwrap()))
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::CONFLICT);
}

// =============================================================================
// Students
// =============================================================================

#[actix_rt::test]
async fn test_student_requires_a_class_first() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    let req = TestRequest::post()
        .uri("/api/v1/students")
        .set_json(json!({ "nis": "1001", "name": "Andi", "class_name": "TK A" }))
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("add a class first")
    );
}

#[actix_rt::test]
async fn test_student_unknown_class_and_duplicate_nis() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    create_class!(app, "TK A");

    let req = TestRequest::post()
        .uri("/api/v1/students")
        .set_json(json!({ "nis": "1001", "name": "Andi", "class_name": "TK Z" }))
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::BAD_REQUEST);

    create_student!(app, "1001", "Andi", "TK A");
    let req = TestRequest::post()
        .uri("/api/v1/students")
        .set_json(json!({ "nis": "1001", "name": "Budi", "class_name": "TK A" }))
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn test_student_search_and_class_filter() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    create_class!(app, "TK A");
    create_class!(app, "TK B");
    create_student!(app, "1001", "Citra Lestari", "TK A");
    create_student!(app, "1002", "Andi Saputra", "TK A");
    create_student!(app, "2001", "Bayu", "TK B");

    // 大小写不敏感的姓名搜索
    let req = TestRequest::get()
        .uri("/api/v1/students?search=andi")
        .to_request();
    let (_, body) = send!(app, req);
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Andi Saputra");

    // NIS 子串
    let req = TestRequest::get().uri("/api/v1/students?search=200").to_request();
    let (_, body) = send!(app, req);
    assert_eq!(body["data"][0]["name"], "Bayu");

    let req = TestRequest::get()
        .uri("/api/v1/students?class=TK%20A")
        .to_request();
    let (_, body) = send!(app, req);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Andi Saputra", "Citra Lestari"]);

    // Semua = 全部班级
    let req = TestRequest::get()
        .uri("/api/v1/students?class=Semua")
        .to_request();
    let (_, body) = send!(app, req);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[actix_rt::test]
async fn test_student_search_is_literal() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    create_class!(app, "TK A");
    create_student!(app, "1001", "Andi Saputra", "TK A");
    create_student!(app, "1002", "Bayu", "TK A");

    // LIKE 通配符按字面匹配
    for term in ["_", "%25", "%5C"] {
        let req = TestRequest::get()
            .uri(&format!("/api/v1/students?search={}", term))
            .to_request();
        let (status, body) = send!(app, req);
        assert_eq!(status, StatusCode::OK);
        assert!(
            body["data"].as_array().unwrap().is_empty(),
            "search {} should match nothing",
            term
        );
    }

    // 搜索词不做 trim
    let req = TestRequest::get()
        .uri("/api/v1/students?search=andi%20")
        .to_request();
    let (_, body) = send!(app, req);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = TestRequest::get()
        .uri("/api/v1/students?search=Bayu%20")
        .to_request();
    let (_, body) = send!(app, req);
    assert!(body["data"].as_array().unwrap().is_empty());

    // 空搜索词不过滤
    let req = TestRequest::get().uri("/api/v1/students?search=").to_request();
    let (_, body) = send!(app, req);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn test_student_update_and_delete() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    create_class!(app, "TK A");
    let student = create_student!(app, "1001", "Andi", "TK A");
    let id = student["id"].as_str().unwrap().to_string();
    assert_eq!(student["status"], "active");

    // 保留自己的 NIS 不算冲突
    let req = TestRequest::put()
        .uri(&format!("/api/v1/students/{}", id))
        .set_json(json!({
            "nis": "1001",
            "name": "Andi Pratama",
            "class_name": "TK A",
            "status": "inactive",
        }))
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["name"], "Andi Pratama");
    assert_eq!(body["data"]["status"], "inactive");

    let req = TestRequest::delete()
        .uri(&format!("/api/v1/students/{}", id))
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::OK);

    let req = TestRequest::delete()
        .uri(&format!("/api/v1/students/{}", id))
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Teachers
// =============================================================================

#[actix_rt::test]
async fn test_teacher_crud() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    let req = TestRequest::post()
        .uri("/api/v1/teachers")
        .set_json(json!({ "name": "Bu Sari", "nip": "198001", "role": "Guru Kelas" }))
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = TestRequest::put()
        .uri(&format!("/api/v1/teachers/{}", id))
        .set_json(json!({ "name": "Bu Sari W.", "nip": "198001", "role": "Kepala Sekolah" }))
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "Kepala Sekolah");

    let req = TestRequest::get().uri("/api/v1/teachers").to_request();
    let (_, body) = send!(app, req);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = TestRequest::post()
        .uri("/api/v1/teachers")
        .set_json(json!({ "name": " " }))
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = TestRequest::delete()
        .uri(&format!("/api/v1/teachers/{}", id))
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Student attendance
// =============================================================================

#[actix_rt::test]
async fn test_roster_defaults_then_save() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    create_class!(app, "TK A");
    let andi = create_student!(app, "1001", "Andi", "TK A");
    let budi = create_student!(app, "1002", "Budi", "TK A");

    let req = TestRequest::get()
        .uri("/api/v1/attendance/students?class=TK%20A&date=2026-10-16")
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::OK);
    let entries = body["data"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(
        entries
            .iter()
            .all(|e| e["status"] == "Hadir" && e["recorded"] == false)
    );

    let req = TestRequest::put()
        .uri("/api/v1/attendance/students")
        .set_json(json!({
            "date": "2026-10-16",
            "entries": [
                { "student_id": andi["id"], "status": "sakit", "note": "Demam" },
                { "student_id": budi["id"], "status": "Hadir" },
            ],
        }))
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["saved"], 2);

    let req = TestRequest::get()
        .uri("/api/v1/attendance/students?class=TK%20A&date=2026-10-16")
        .to_request();
    let (_, body) = send!(app, req);
    let entries = body["data"]["entries"].as_array().unwrap();
    assert_eq!(entries[0]["name"], "Andi");
    assert_eq!(entries[0]["status"], "Sakit");
    assert_eq!(entries[0]["note"], "Demam");
    assert_eq!(entries[0]["recorded"], true);

    // 再次保存同一天是覆盖，不是新增
    let req = TestRequest::put()
        .uri("/api/v1/attendance/students")
        .set_json(json!({
            "date": "2026-10-16",
            "entries": [{ "student_id": andi["id"], "status": "Izin", "note": "Acara keluarga" }],
        }))
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::OK);

    let req = TestRequest::get()
        .uri("/api/v1/dashboard?date=2026-10-16")
        .to_request();
    let (_, body) = send!(app, req);
    assert_eq!(body["data"]["counts"]["total"], 2);
    assert_eq!(body["data"]["counts"]["izin"], 1);
    assert_eq!(body["data"]["counts"]["sakit"], 0);
}

#[actix_rt::test]
async fn test_roster_errors() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    let req = TestRequest::get()
        .uri("/api/v1/attendance/students?class=TK%20Z&date=2026-10-16")
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = TestRequest::get()
        .uri("/api/v1/attendance/students?class=TK%20A&date=16-10-2026")
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1012);

    let req = TestRequest::put()
        .uri("/api/v1/attendance/students")
        .set_json(json!({ "date": "2026-10-16", "entries": [] }))
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = TestRequest::put()
        .uri("/api/v1/attendance/students")
        .set_json(json!({
            "date": "2026-10-16",
            "entries": [{ "student_id": "missing-id", "status": "Hadir" }],
        }))
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("missing-id"));
}

// =============================================================================
// Teacher attendance
// =============================================================================

#[actix_rt::test]
async fn test_teacher_log_lifecycle() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    let req = TestRequest::post()
        .uri("/api/v1/teachers")
        .set_json(json!({ "name": "Bu Sari", "nip": "198001", "role": "Guru" }))
        .to_request();
    let (_, body) = send!(app, req);
    let teacher_id = body["data"]["id"].clone();

    let req = TestRequest::post()
        .uri("/api/v1/attendance/teachers")
        .set_json(json!({
            "teacher_id": teacher_id,
            "status": "Izin",
            "note": "Pelatihan",
            "date": "2026-10-16",
        }))
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["teacher_name"], "Bu Sari");
    let log_id = body["data"]["id"].as_str().unwrap().to_string();

    // 同一天重复记录
    let req = TestRequest::post()
        .uri("/api/v1/attendance/teachers")
        .set_json(json!({ "teacher_id": teacher_id, "date": "2026-10-16" }))
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::CONFLICT);

    let req = TestRequest::post()
        .uri("/api/v1/attendance/teachers")
        .set_json(json!({ "teacher_id": "nobody", "date": "2026-10-16" }))
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = TestRequest::get()
        .uri("/api/v1/attendance/teachers?date=2026-10-16")
        .to_request();
    let (_, body) = send!(app, req);
    let logs = body["data"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["status"], "Izin");
    assert_eq!(logs[0]["note"], "Pelatihan");

    let req = TestRequest::delete()
        .uri(&format!("/api/v1/attendance/teachers/{}", log_id))
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::OK);

    let req = TestRequest::delete()
        .uri(&format!("/api/v1/attendance/teachers/{}", log_id))
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Malformed bodies
// =============================================================================

#[actix_rt::test]
async fn test_malformed_body_uses_error_envelope() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);
    create_class!(app, "TK A");
    let student = create_student!(app, "1001", "Andi", "TK A");

    let bad_requests = vec![
        // 缺少必填字段
        TestRequest::post()
            .uri("/api/v1/classes")
            .set_json(json!({}))
            .to_request(),
        TestRequest::post()
            .uri("/api/v1/students")
            .set_json(json!({ "name": "Budi", "class_name": "TK A" }))
            .to_request(),
        // 未知出勤状态
        TestRequest::put()
            .uri("/api/v1/attendance/students")
            .set_json(json!({
                "date": "2026-10-16",
                "entries": [{ "student_id": student["id"], "status": "Telat" }],
            }))
            .to_request(),
        TestRequest::post()
            .uri("/api/v1/attendance/teachers")
            .set_json(json!({ "teacher_id": "t1", "status": "Telat" }))
            .to_request(),
    ];

    for req in bad_requests {
        let (status, body) = send!(app, req);
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(body["code"], 1000);
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .starts_with("Invalid request body")
        );
        assert!(body.get("data").is_none());
    }

    // 整批被拒绝，没有写入
    let req = TestRequest::get()
        .uri("/api/v1/attendance/students?class=TK%20A&date=2026-10-16")
        .to_request();
    let (_, body) = send!(app, req);
    assert_eq!(body["data"]["entries"][0]["recorded"], false);
}

// =============================================================================
// Dashboard
// =============================================================================

#[actix_rt::test]
async fn test_dashboard_aggregates() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    create_class!(app, "TK A");
    create_class!(app, "TK B");
    let andi = create_student!(app, "1001", "Andi", "TK A");
    let budi = create_student!(app, "1002", "Budi", "TK A");
    let citra = create_student!(app, "2001", "Citra", "TK B");

    // Kamis 15 Oct: 2 hadir; Jumat 16 Oct: 1 hadir, 1 alfa
    for (date, entries) in [
        (
            "2026-10-15",
            json!([
                { "student_id": andi["id"], "status": "Hadir" },
                { "student_id": budi["id"], "status": "Hadir" },
            ]),
        ),
        (
            "2026-10-16",
            json!([
                { "student_id": andi["id"], "status": "Hadir" },
                { "student_id": citra["id"], "status": "Alfa" },
            ]),
        ),
    ] {
        let req = TestRequest::put()
            .uri("/api/v1/attendance/students")
            .set_json(json!({ "date": date, "entries": entries }))
            .to_request();
        let (status, _) = send!(app, req);
        assert_eq!(status, StatusCode::OK);
    }

    let req = TestRequest::get()
        .uri("/api/v1/dashboard?date=2026-10-16")
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];

    assert_eq!(data["date_label"], "Jumat, 16 Oktober 2026");
    assert_eq!(data["counts"]["hadir"], 1);
    assert_eq!(data["counts"]["alfa"], 1);
    assert_eq!(data["counts"]["total"], 2);
    assert_eq!(
        data["pie"],
        json!([{ "name": "Hadir", "value": 1 }, { "name": "Alfa", "value": 1 }])
    );
    assert_eq!(
        data["students_per_class"],
        json!([{ "name": "TK A", "count": 2 }, { "name": "TK B", "count": 1 }])
    );

    let trend = data["weekly_trend"].as_array().unwrap();
    assert_eq!(trend.len(), 6);
    assert_eq!(trend[0]["label"], "Sen");
    assert_eq!(trend[0]["date"], "2026-10-12");
    assert_eq!(trend[3]["hadir"], 2);
    assert_eq!(trend[4]["hadir"], 1);
    assert_eq!(trend[5]["hadir"], 0);
}

// =============================================================================
// Reports
// =============================================================================

/// Two classes, one student each, three school days across two months
macro_rules! seed_report_data {
    ($app:expr) => {{
        create_class!($app, "TK A");
        create_class!($app, "TK B");
        let andi = create_student!($app, "1001", "Andi", "TK A");
        let bayu = create_student!($app, "2001", "Bayu", "TK B");

        for (date, a_status, b_status) in [
            ("2026-10-01", "Hadir", "Sakit"),
            ("2026-10-16", "Izin", "Hadir"),
            ("2026-11-02", "Alfa", "Hadir"),
        ] {
            let req = TestRequest::put()
                .uri("/api/v1/attendance/students")
                .set_json(json!({
                    "date": date,
                    "entries": [
                        { "student_id": andi["id"], "status": a_status },
                        { "student_id": bayu["id"], "status": b_status, "note": "" },
                    ],
                }))
                .to_request();
            let (status, _) = send!($app, req);
            assert_eq!(status, StatusCode::OK);
        }
    }};
}

#[actix_rt::test]
async fn test_report_json_daily_and_monthly() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);
    seed_report_data!(app);

    let req = TestRequest::get()
        .uri("/api/v1/reports/attendance?period=daily&date=2026-10-16")
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::OK);
    let report = &body["data"];
    assert_eq!(report["period_label"], "2026-10-16");
    assert_eq!(report["rows"].as_array().unwrap().len(), 2);
    assert_eq!(report["rows"][0]["no"], 1);
    assert_eq!(report["rows"][0]["class_name"], "TK A");
    assert_eq!(report["rows"][0]["note"], "-");

    let req = TestRequest::get()
        .uri("/api/v1/reports/attendance?period=monthly&month=2026-10&class=TK%20B")
        .to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::OK);
    let report = &body["data"];
    assert_eq!(report["period_label"], "2026-10");
    let rows = report["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["name"] == "Bayu"));
    assert_eq!(report["summary"]["sakit"], 1);
    assert_eq!(report["summary"]["hadir"], 1);
    assert_eq!(report["signatories"]["headmaster_name"], "Pak Budi");
}

#[actix_rt::test]
async fn test_report_invalid_period() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    let req = TestRequest::get()
        .uri("/api/v1/reports/attendance?period=weekly")
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = TestRequest::get()
        .uri("/api/v1/reports/attendance?period=monthly&month=2026-13")
        .to_request();
    let (status, _) = send!(app, req);
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_report_pdf_download() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);
    seed_report_data!(app);

    let req = TestRequest::get()
        .uri("/api/v1/reports/attendance/pdf?period=monthly&month=2026-10")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    let disposition = resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("Laporan_TK DIGITAL INDONESIA_"));
    assert!(disposition.contains(".pdf"));

    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"%PDF"));
}

#[actix_rt::test]
async fn test_report_csv_download() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);
    seed_report_data!(app);

    let req = TestRequest::get()
        .uri("/api/v1/reports/attendance/csv?period=daily&date=2026-11-02")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );

    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "No,NIS,Nama Siswa,Kelas,Status,Tanggal,Keterangan");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("Andi"));
    assert!(lines[1].contains("Alfa"));
}

// =============================================================================
// Auth, request id and health
// =============================================================================

#[actix_rt::test]
async fn test_token_protects_api_but_not_health() {
    let (_dir, services) = setup().await;
    let app = school_app!(services, ApiAuth::new(Some("s3cret")));

    let req = TestRequest::get().uri("/api/v1/classes").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = TestRequest::get()
        .uri("/api/v1/classes")
        .insert_header(("Authorization", "Bearer wrong"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = TestRequest::get()
        .uri("/api/v1/classes")
        .insert_header(("Authorization", "Bearer s3cret"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get().uri("/health/live").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_rt::test]
async fn test_request_id_header_present() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    let req = TestRequest::get().uri("/api/v1/classes").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().contains_key("x-request-id"));
}

#[actix_rt::test]
async fn test_health_check() {
    let (_dir, services) = setup().await;
    let app = school_app!(services);

    let req = TestRequest::get().uri("/health").to_request();
    let (status, body) = send!(app, req);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["storage"]["backend"], "sqlite");
    assert_eq!(body["data"]["storage"]["classes_count"], 0);

    let req = TestRequest::get().uri("/health/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
