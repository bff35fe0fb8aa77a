use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, config::ApplicationSettings, routes};

pub fn create(app_state: AppState, settings: &ApplicationSettings) -> Router<()> {
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/time-entries", routes::time_entries::router())
        .nest("/projects", routes::projects::router())
        .nest("/users", routes::users::router());

    // Finally, wrap the app with state, timeout, CORS and tracing
    let app_url = settings.app_url.clone();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin.to_str().is_ok_and(|origin| origin == app_url)
        }));

    app.with_state(app_state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            settings.request_timeout_secs,
        )))
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        adapters::outbound::MockStore,
        auth::issue_token,
        domain::models::{Identity, Role},
        factory::mock_app_state,
    };

    const SECRET: &str = "router-test-secret";

    fn settings() -> ApplicationSettings {
        ApplicationSettings {
            port: 8080,
            host: "127.0.0.1".to_string(),
            app_url: "http://localhost:5173".to_string(),
            request_timeout_secs: 5,
        }
    }

    fn app(store: MockStore) -> Router {
        create(mock_app_state(store, SECRET), &settings())
    }

    fn token(user_id: i32, role: Role) -> String {
        let exp = (time::OffsetDateTime::now_utc().unix_timestamp() + 3600) as usize;
        issue_token(SECRET, Identity::new(user_id, role), exp)
    }

    fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn entry(hours: f64) -> Value {
        json!({ "projectId": 1, "date": "2024-03-01", "hours": hours, "description": "work" })
    }

    #[tokio::test]
    async fn health_needs_no_token() {
        let response = app(MockStore::new())
            .oneshot(request(Method::GET, "/health", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_or_invalid_token_is_unauthorized() {
        let app = app(MockStore::new());

        let response = app
            .clone()
            .oneshot(request(Method::POST, "/time-entries", None, Some(entry(8.0))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["code"], "UNAUTHORIZED");

        let response = app
            .oneshot(request(
                Method::GET,
                "/time-entries/monthly-report?year=2024",
                Some("garbage"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn daily_cap_over_http() {
        let store = MockStore::new().with_project(1, "Acme", dec!(100));
        let app = app(store.clone());
        let token = token(1, Role::User);

        for hours in [8.0, 16.0] {
            let response = app
                .clone()
                .oneshot(request(Method::POST, "/time-entries", Some(&token), Some(entry(hours))))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
            let body = json_body(response).await;
            assert!(body["id"].is_i64());
            assert_eq!(body["message"], "Time entry created successfully");
        }

        let response = app
            .oneshot(request(Method::POST, "/time-entries", Some(&token), Some(entry(1.0))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["code"], "DAILY_CAP_EXCEEDED");
        assert!(body["error"].as_str().unwrap().contains("24"));
        assert_eq!(store.all_entries().len(), 2);
    }

    #[tokio::test]
    async fn oversized_hours_are_a_validation_failure() {
        let store = MockStore::new().with_project(1, "Acme", dec!(100));
        let app = app(store.clone());
        let token = token(1, Role::User);

        let response = app
            .clone()
            .oneshot(request(Method::POST, "/time-entries", Some(&token), Some(entry(8.0))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/time-entries",
                Some(&token),
                Some(json!({
                    "projectId": 1,
                    "date": "2024-03-01",
                    "hours": "79228162514264337593543950335"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "VALIDATION_FAILED");

        let response = app
            .oneshot(request(Method::POST, "/time-entries", Some(&token), Some(entry(16.0))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(store.all_entries().len(), 2);
    }

    #[tokio::test]
    async fn monthly_report_and_progress_shapes() {
        let store = MockStore::new().with_project(1, "Acme", dec!(100));
        let app = app(store);
        let token = token(1, Role::User);

        let response = app
            .clone()
            .oneshot(request(Method::POST, "/time-entries", Some(&token), Some(entry(8.0))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(request(
                Method::GET,
                "/time-entries/monthly-report?year=2024",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!([{ "month": 3, "total_hours": 8.0, "total_amount": 800.0 }])
        );

        let response = app
            .clone()
            .oneshot(request(
                Method::GET,
                "/time-entries/monthly-report?year=2024&fill=true",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 12);

        let response = app
            .clone()
            .oneshot(request(
                Method::PUT,
                "/time-entries/yearly-target",
                Some(&token),
                Some(json!({ "year": 2024, "targetAmount": 3200 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(request(
                Method::GET,
                "/time-entries/yearly-target?year=2024",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(
            json_body(response).await,
            json!({ "currentAmount": 800.0, "yearlyTarget": 3200.0, "progressPercentage": 25.0 })
        );
    }

    #[tokio::test]
    async fn other_users_targets_need_admin() {
        let app = app(MockStore::new());

        let response = app
            .clone()
            .oneshot(request(
                Method::GET,
                "/users/2/yearly-target?year=2024",
                Some(&token(1, Role::User)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(json_body(response).await["code"], "FORBIDDEN");

        let response = app
            .oneshot(request(
                Method::GET,
                "/users/2/yearly-target?year=2024",
                Some(&token(1, Role::Admin)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["yearlyTarget"], 150000.0);
    }

    #[tokio::test]
    async fn malformed_requests_are_validation_failures() {
        let app = app(MockStore::new().with_project(1, "Acme", dec!(100)));
        let token = token(1, Role::User);

        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/time-entries",
                Some(&token),
                Some(json!({ "projectId": 1, "date": "03/01/2024", "hours": 8 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "VALIDATION_FAILED");

        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/time-entries",
                Some(&token),
                Some(json!({ "date": "2024-03-01" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "VALIDATION_FAILED");

        let response = app
            .oneshot(request(Method::DELETE, "/time-entries/abc", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_entries_are_not_found() {
        let app = app(MockStore::new());

        let response = app
            .oneshot(request(
                Method::DELETE,
                "/time-entries/42",
                Some(&token(1, Role::User)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["code"], "NOT_FOUND");
    }
}
