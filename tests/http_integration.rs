use std::{net::SocketAddr, sync::Arc};

use reqwest::{Client, StatusCode, header};
use serde_json::{Value, json};
use student_roster::{api, roster::Roster};
use tokio::net::TcpListener;

/// Serve a freshly seeded roster on an ephemeral local port.
struct TestServer {
    addr: SocketAddr,
    client: Client,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind(("127.0.0.1", 0))
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let app = api::create_router(Arc::new(Roster::seeded()));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve roster");
        });
        Self {
            addr,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request")
    }
}

fn ide_course() -> Value {
    json!({
        "id": "DEVE709",
        "name": "IDE",
        "description": "Utilisation des IDE",
        "steps": ["Learn Maven", "NetBeans", "Integration tests", "Coverage"]
    })
}

#[tokio::test]
async fn lists_courses_for_second_student() {
    let server = TestServer::start().await;
    let response = server.get("/students/S-002/courses").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("json body");
    assert_eq!(body, json!([ide_course()]));
}

#[tokio::test]
async fn unknown_student_yields_empty_ok_responses() {
    let server = TestServer::start().await;
    for path in [
        "/students/any",
        "/students/any/courses",
        "/students/any/courses/DEVE709",
        "/students/any/courses/any",
    ] {
        let response = server.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        assert_eq!(response.text().await.expect("text body"), "", "{path}");
    }
}

#[tokio::test]
async fn fetches_single_course_and_full_student() {
    let server = TestServer::start().await;

    let course: Value = server
        .get("/students/S-001/courses/DEVE709")
        .await
        .json()
        .await
        .expect("course json");
    assert_eq!(course, ide_course());

    let student: Value = server
        .get("/students/S-001/")
        .await
        .json()
        .await
        .expect("student json");
    assert_eq!(
        student,
        json!({
            "id": "S-001",
            "name": "Luc Labbé",
            "description": "Senior Developer",
            "courses": [
                ide_course(),
                {
                    "id": "DEVE710",
                    "name": "CI",
                    "description": "Integration Continue",
                    "steps": ["Jenkins", "Coverage", "Tests"]
                },
                {
                    "id": "BDOE571",
                    "name": "SQL",
                    "description": "SQL Sous Oracle",
                    "steps": ["SQL", "PL/SQL", "Triggers"]
                },
                {
                    "id": "DEVE571",
                    "name": "Java",
                    "description": "Les fondamentaux",
                    "steps": ["Variables", "Boucles", "JVM", "Exceptions"]
                }
            ]
        })
    );
}

#[tokio::test]
async fn enroll_then_remove_course() {
    let server = TestServer::start().await;
    let course = json!({
        "id": "Course1",
        "name": "SpringBoot",
        "description": "IT",
        "steps": ["Learn Maven", "Import Project", "First Example", "Second Example"]
    });

    let created = server
        .client
        .post(server.url("/students/S-001/courses"))
        .json(&course)
        .send()
        .await
        .expect("POST course");
    assert_eq!(created.status(), StatusCode::CREATED);
    let location = created
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
        .to_string();
    assert!(location.contains("/students/S-001/courses/Course1"));

    let fetched: Value = server
        .client
        .get(&location)
        .send()
        .await
        .expect("GET location")
        .json()
        .await
        .expect("course json");
    assert_eq!(fetched, course);

    for expected in ["true", "false"] {
        let removed = server
            .client
            .delete(server.url("/students/S-001/courses/Course1"))
            .send()
            .await
            .expect("DELETE course");
        assert_eq!(removed.status(), StatusCode::OK);
        assert_eq!(removed.text().await.expect("text body"), expected);
    }
}

#[tokio::test]
async fn enrolling_for_unknown_student_returns_no_content() {
    let server = TestServer::start().await;
    let response = server
        .client
        .post(server.url("/students/any/courses"))
        .json(&json!({ "id": null, "name": null, "description": null, "courses": [] }))
        .send()
        .await
        .expect("POST course");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn deleting_unknown_course_returns_false() {
    let server = TestServer::start().await;
    let response = server
        .client
        .delete(server.url("/students/any/courses/any"))
        .send()
        .await
        .expect("DELETE course");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.expect("text body"), "false");
}

#[tokio::test]
async fn registers_students_and_rejects_empty_ones() {
    let server = TestServer::start().await;

    let rejected = server
        .client
        .post(server.url("/students"))
        .json(&json!({ "id": null, "name": null, "description": null, "courses": null }))
        .send()
        .await
        .expect("POST student");
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let created = server
        .client
        .post(server.url("/students"))
        .json(&json!({
            "id": "S-003",
            "name": "Aurélien",
            "description": "Senior developer",
            "courses": []
        }))
        .send()
        .await
        .expect("POST student");
    assert_eq!(created.status(), StatusCode::CREATED);
    let location = created
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header");
    assert!(location.ends_with("/students/S-003"));

    let students: Vec<Value> = server
        .get("/students")
        .await
        .json()
        .await
        .expect("students json");
    let ids: Vec<&str> = students
        .iter()
        .filter_map(|student| student["id"].as_str())
        .collect();
    assert_eq!(ids, ["S-001", "S-002", "S-003"]);
}
