//! HTTP surface for the student roster.
//!
//! - `GET /students` – Every student with their courses.
//! - `POST /students` – Register a student; `201` with a `Location` header, `400` when the body
//!   is null, malformed, or carries no identifier.
//! - `GET /students/{student_id}` – One student with their courses.
//! - `GET /students/{student_id}/courses` – Courses of one student.
//! - `POST /students/{student_id}/courses` – Enroll a course; `201` with a `Location` header,
//!   `204` when the student is unknown.
//! - `GET /students/{student_id}/courses/{course_id}` – One course of one student.
//! - `DELETE /students/{student_id}/courses/{course_id}` – Remove a course; the body is the
//!   literal `true` or `false`.
//! - `GET /metrics` – Mutation counters.
//! - `GET /commands` – Machine-readable command catalog.
//!
//! Lookups for unknown students or courses answer `200` with an empty body rather than `404`;
//! existing clients depend on that shape.

use crate::config::CONFIG;
use crate::roster::{Course, Rejection, RosterApi, Student};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Build the HTTP router exposing the roster.
pub fn create_router<S>(roster: Arc<S>) -> Router
where
    S: RosterApi + 'static,
{
    Router::new()
        .route("/students", get(list_students::<S>).post(add_student::<S>))
        .route("/students/:student_id", get(get_student::<S>))
        .route("/students/:student_id/", get(get_student::<S>))
        .route(
            "/students/:student_id/courses",
            get(list_courses::<S>).post(add_course::<S>),
        )
        .route(
            "/students/:student_id/courses/:course_id",
            get(get_course::<S>).delete(delete_course::<S>),
        )
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .with_state(roster)
}

async fn list_students<S>(State(roster): State<Arc<S>>) -> Json<Vec<Student>>
where
    S: RosterApi,
{
    Json(roster.list_students())
}

async fn get_student<S>(State(roster): State<Arc<S>>, Path(student_id): Path<String>) -> Response
where
    S: RosterApi,
{
    json_or_empty(roster.find_student(&student_id))
}

async fn list_courses<S>(State(roster): State<Arc<S>>, Path(student_id): Path<String>) -> Response
where
    S: RosterApi,
{
    json_or_empty(roster.list_courses(&student_id))
}

async fn get_course<S>(
    State(roster): State<Arc<S>>,
    Path((student_id, course_id)): Path<(String, String)>,
) -> Response
where
    S: RosterApi,
{
    json_or_empty(roster.find_course(&student_id, &course_id))
}

/// Enroll a course for a student.
///
/// The `Location` header points at the new course resource. An unknown student yields `204`
/// and nothing is stored. A body that does not decode as a course is answered with `400`.
async fn add_course<S>(
    State(roster): State<Arc<S>>,
    Path(student_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<Course>, JsonRejection>,
) -> Response
where
    S: RosterApi,
{
    let course = match payload {
        Ok(Json(course)) => course,
        Err(rejection) => {
            tracing::info!(student_id, error = %rejection.body_text(), "Malformed course payload");
            return (StatusCode::BAD_REQUEST, rejection.body_text()).into_response();
        }
    };
    let Some(stored) = roster.add_course(&student_id, course) else {
        tracing::info!(student_id, "Enrollment for unknown student ignored");
        return StatusCode::NO_CONTENT.into_response();
    };
    let course_id = stored.id.as_deref().unwrap_or_default();
    tracing::info!(student_id, course_id, "Enrollment request completed");
    created(&headers, &["students", student_id.as_str(), "courses", course_id])
}

async fn delete_course<S>(
    State(roster): State<Arc<S>>,
    Path((student_id, course_id)): Path<(String, String)>,
) -> Json<bool>
where
    S: RosterApi,
{
    let removed = roster.delete_course(&student_id, &course_id);
    tracing::info!(student_id, course_id, removed, "Removal request completed");
    Json(removed)
}

/// Register a student.
///
/// A null body, a body that does not decode as a student, or a student without an identifier
/// is answered with `400`.
async fn add_student<S>(
    State(roster): State<Arc<S>>,
    headers: HeaderMap,
    payload: Result<Json<Option<Student>>, JsonRejection>,
) -> Response
where
    S: RosterApi,
{
    let student = match payload {
        Ok(Json(Some(student))) => student,
        Ok(Json(None)) => return Rejection::MissingStudent.into_response(),
        Err(rejection) => {
            tracing::info!(error = %rejection.body_text(), "Malformed student payload");
            return (StatusCode::BAD_REQUEST, rejection.body_text()).into_response();
        }
    };
    match roster.add_student(student) {
        Ok(stored) => {
            let student_id = stored.id.as_deref().unwrap_or_default();
            tracing::info!(student_id, "Registration request completed");
            created(&headers, &["students", student_id])
        }
        Err(rejection) => {
            tracing::info!(%rejection, "Registration request rejected");
            rejection.into_response()
        }
    }
}

/// Response body for `GET /metrics`.
#[derive(Serialize)]
struct MetricsResponse {
    students: usize,
    students_registered: u64,
    courses_enrolled: u64,
    courses_removed: u64,
}

async fn get_metrics<S>(State(roster): State<Arc<S>>) -> Json<MetricsResponse>
where
    S: RosterApi,
{
    let snapshot = roster.metrics_snapshot();
    Json(MetricsResponse {
        students: roster.list_students().len(),
        students_registered: snapshot.students_registered,
        courses_enrolled: snapshot.courses_enrolled,
        courses_removed: snapshot.courses_removed,
    })
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<serde_json::Value>,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

async fn get_commands() -> Json<CommandsResponse> {
    let course_example = json!({
        "id": "Course1",
        "name": "SpringBoot",
        "description": "IT",
        "steps": ["Learn Maven", "Import Project", "First Example", "Second Example"]
    });
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "list_students",
                method: "GET",
                path: "/students",
                description: "Return every student with their courses, in registration order.",
                request_example: None,
            },
            CommandDescriptor {
                name: "add_student",
                method: "POST",
                path: "/students",
                description: "Register a student. Responds 201 with a Location header, or 400 when the identifier is missing.",
                request_example: Some(json!({
                    "id": "S-003",
                    "name": "Aurélien",
                    "description": "Senior developer",
                    "courses": []
                })),
            },
            CommandDescriptor {
                name: "get_student",
                method: "GET",
                path: "/students/{student_id}",
                description: "Return one student with their courses; empty body when unknown.",
                request_example: None,
            },
            CommandDescriptor {
                name: "list_courses",
                method: "GET",
                path: "/students/{student_id}/courses",
                description: "Return the courses of one student; empty body when the student is unknown.",
                request_example: None,
            },
            CommandDescriptor {
                name: "add_course",
                method: "POST",
                path: "/students/{student_id}/courses",
                description: "Enroll a course. Responds 201 with a Location header, or 204 when the student is unknown.",
                request_example: Some(course_example),
            },
            CommandDescriptor {
                name: "get_course",
                method: "GET",
                path: "/students/{student_id}/courses/{course_id}",
                description: "Return one course of one student; empty body when either is unknown.",
                request_example: None,
            },
            CommandDescriptor {
                name: "delete_course",
                method: "DELETE",
                path: "/students/{student_id}/courses/{course_id}",
                description: "Remove a course from a student. Responds with true when a course was removed, false otherwise.",
                request_example: None,
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return registration and enrollment counters.",
                request_example: None,
            },
        ],
    })
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// Serialize a found value, or answer `200` with an empty body when it is absent.
fn json_or_empty<T: Serialize>(value: Option<T>) -> Response {
    match value {
        Some(value) => Json(value).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

/// `201 Created` with a `Location` header for the given path segments.
fn created(headers: &HeaderMap, segments: &[&str]) -> Response {
    let configured = CONFIG.get().and_then(|config| config.public_base_url.as_deref());
    let location = location_for(request_base(configured, headers).as_deref(), segments);
    match HeaderValue::from_str(&location) {
        Ok(value) => (StatusCode::CREATED, [(header::LOCATION, value)]).into_response(),
        Err(err) => {
            tracing::warn!(location, error = %err, "Dropping unrepresentable Location header");
            StatusCode::CREATED.into_response()
        }
    }
}

/// Configured public base URL, else one derived from the request's `Host` header.
fn request_base(configured: Option<&str>, headers: &HeaderMap) -> Option<String> {
    if let Some(base) = configured {
        return Some(base.to_string());
    }
    headers
        .get(header::HOST)
        .and_then(|host| host.to_str().ok())
        .map(|host| format!("http://{host}"))
}

fn location_for(base: Option<&str>, segments: &[&str]) -> String {
    let mut location = base.unwrap_or_default().to_string();
    for segment in segments {
        location.push('/');
        location.push_str(&encode_segment(segment));
    }
    location
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}
