pub mod attendance;
pub mod classes;
pub mod exams;
pub mod guardians;
pub mod imports;
pub mod invoices;
pub mod staff;
pub mod students;
pub mod subjects;
pub mod system;
pub mod timetables;

pub use attendance::configure_attendance_routes;
pub use classes::configure_classes_routes;
pub use exams::configure_exams_routes;
pub use guardians::configure_guardians_routes;
pub use imports::configure_imports_routes;
pub use invoices::configure_invoices_routes;
pub use staff::configure_staff_routes;
pub use students::configure_students_routes;
pub use subjects::configure_subjects_routes;
pub use system::configure_system_routes;
pub use timetables::configure_timetables_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_classes_routes)
        .configure(configure_staff_routes)
        .configure(configure_subjects_routes)
        .configure(configure_students_routes)
        .configure(configure_guardians_routes)
        .configure(configure_timetables_routes)
        .configure(configure_invoices_routes)
        .configure(configure_attendance_routes)
        .configure(configure_exams_routes)
        .configure(configure_imports_routes)
        .configure(configure_system_routes);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use super::configure_api_routes;
    use crate::cache::ObjectCache;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::models::AppStartTime;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::utils::{json_error_handler, query_error_handler};

    macro_rules! test_app {
        () => {{
            let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await);
            let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
            test::init_service(
                App::new()
                    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                    .app_data(web::Data::new(storage))
                    .app_data(web::Data::new(cache))
                    .app_data(web::Data::new(AppStartTime {
                        start_datetime: chrono::Utc::now(),
                    }))
                    .configure(configure_api_routes),
            )
            .await
        }};
    }

    macro_rules! call {
        ($app:expr, $method:ident, $uri:expr) => {{
            let req = test::TestRequest::$method().uri($uri).to_request();
            let resp = test::call_service(&$app, req).await;
            let status = resp.status();
            let body: Value = test::read_body_json(resp).await;
            (status, body)
        }};
        ($app:expr, $method:ident, $uri:expr, $body:expr) => {{
            let req = test::TestRequest::$method()
                .uri($uri)
                .set_json($body)
                .to_request();
            let resp = test::call_service(&$app, req).await;
            let status = resp.status();
            let body: Value = test::read_body_json(resp).await;
            (status, body)
        }};
    }

    #[actix_web::test]
    async fn test_timetable_conflict_rejects_unless_forced() {
        let app = test_app!();

        let (_, class) = call!(app, post, "/api/v1/classes", json!({"name": "Form 2B"}));
        let (_, other_class) = call!(app, post, "/api/v1/classes", json!({"name": "Form 3C"}));
        let (_, teacher) = call!(
            app,
            post,
            "/api/v1/staff",
            json!({"staff_no": "T-01", "full_name": "Jane Mwende"})
        );
        let (_, subject) = call!(
            app,
            post,
            "/api/v1/subjects",
            json!({"code": "bio", "name": "Biology"})
        );
        assert_eq!(subject["data"]["code"], "BIO");
        let (status, template) = call!(
            app,
            post,
            "/api/v1/timetables",
            json!({"name": "Term 1", "is_active": true})
        );
        assert_eq!(status, StatusCode::CREATED);
        let template_id = template["data"]["id"].as_i64().unwrap();
        let entries_uri = format!("/api/v1/timetables/{template_id}/entries");

        let entry = json!({
            "class_id": class["data"]["id"],
            "subject_id": subject["data"]["id"],
            "teacher_id": teacher["data"]["id"],
            "day_of_week": 1,
            "slot": 2,
            "room": "Lab 1"
        });
        let (status, _) = call!(app, post, &entries_uri, &entry);
        assert_eq!(status, StatusCode::CREATED);

        // 同一教师、同一教室，不同班级
        let mut clash = entry.clone();
        clash["class_id"] = other_class["data"]["id"].clone();
        clash["room"] = json!(" lab 1 ");
        let (status, body) = call!(app, post, &entries_uri, &clash);
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 2503);
        let kinds: Vec<&str> = body["data"]["conflicts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["kind"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, vec!["teacher_double_booking", "room_double_booking"]);

        let (status, body) = call!(
            app,
            post,
            &format!("/api/v1/timetables/{template_id}/conflicts"),
            &clash
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["has_conflicts"], true);

        clash["force"] = json!(true);
        let (status, _) = call!(app, post, &entries_uri, &clash);
        assert_eq!(status, StatusCode::CREATED);

        let mut bad_day = entry.clone();
        bad_day["day_of_week"] = json!(8);
        let (status, _) = call!(app, post, &entries_uri, &bad_day);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call!(app, get, &format!("/api/v1/timetables/{template_id}"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["entries"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_guardian_link_code_is_single_use() {
        let app = test_app!();

        let (_, student) = call!(
            app,
            post,
            "/api/v1/students",
            json!({"admission_no": "S-100", "first_name": "Wanjiru", "last_name": "Kariuki"})
        );
        let student_id = student["data"]["id"].as_i64().unwrap();
        let (status, guardian) = call!(
            app,
            post,
            "/api/v1/guardians",
            json!({"full_name": "Peter Kariuki", "phone": "+254 722 111222"})
        );
        assert_eq!(status, StatusCode::CREATED);
        let guardian_id = guardian["data"]["id"].as_i64().unwrap();

        let (status, issued) = call!(
            app,
            post,
            &format!("/api/v1/students/{student_id}/link-codes")
        );
        assert_eq!(status, StatusCode::CREATED);
        let code = issued["data"]["code"].as_str().unwrap().to_lowercase();

        let redeem_uri = format!("/api/v1/guardians/{guardian_id}/link");
        let (status, link) = call!(app, post, &redeem_uri, json!({ "code": code }));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(link["data"]["student_id"], student_id);
        assert_eq!(link["data"]["is_primary"], true);

        let (status, body) = call!(app, post, &redeem_uri, json!({ "code": code }));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 2402);

        let (_, linked) = call!(
            app,
            get,
            &format!("/api/v1/students/{student_id}/guardians")
        );
        assert_eq!(linked["data"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_payment_flow_and_statement() {
        let app = test_app!();

        let (_, student) = call!(
            app,
            post,
            "/api/v1/students",
            json!({"admission_no": "S-200", "first_name": "Otieno", "last_name": "Odhiambo"})
        );
        let student_id = student["data"]["id"].as_i64().unwrap();

        let (status, body) = call!(
            app,
            post,
            "/api/v1/invoices",
            json!({"student_id": student_id, "term": "2025-T1", "amount": 0})
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 2606);

        let (status, invoice) = call!(
            app,
            post,
            "/api/v1/invoices",
            json!({"student_id": student_id, "term": "2025-T1", "amount": 10_000})
        );
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(invoice["data"]["status"], "unpaid");
        let invoice_id = invoice["data"]["id"].as_i64().unwrap();
        let payments_uri = format!("/api/v1/invoices/{invoice_id}/payments");

        let (status, receipt) = call!(
            app,
            post,
            &payments_uri,
            json!({"amount": 4_000, "method": "mobile", "reference": "QX12"})
        );
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(receipt["data"]["invoice"]["balance"], 6_000);
        assert_eq!(receipt["data"]["invoice"]["status"], "partial");

        let (status, _) = call!(
            app,
            post,
            &format!("/api/v1/invoices/{invoice_id}/cancel")
        );
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, receipt) = call!(
            app,
            post,
            &payments_uri,
            json!({"amount": 7_000, "method": "cash"})
        );
        assert_eq!(receipt["data"]["invoice"]["balance"], -1_000);
        assert_eq!(receipt["data"]["invoice"]["status"], "paid");

        let (status, statement) = call!(
            app,
            get,
            &format!("/api/v1/students/{student_id}/statement")
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(statement["data"]["total_billed"], 10_000);
        assert_eq!(statement["data"]["total_paid"], 11_000);
        assert_eq!(statement["data"]["outstanding"], -1_000);

        let (status, detail) = call!(app, get, &format!("/api/v1/invoices/{invoice_id}"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["data"]["payments"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_invalid_path_and_query_use_envelope() {
        let app = test_app!();

        let (status, body) = call!(app, get, "/api/v1/students/abc");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().is_some());

        let (status, body) = call!(app, get, "/api/v1/students?page=abc");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 1000);

        let (status, body) = call!(app, get, "/api/v1/invoices/999");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 2600);

        let (status, body) = call!(app, get, "/api/v1/system/info");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["database_backend"], "sqlite");
        assert_eq!(body["data"]["cache_backend"], "moka");
    }
}
