//! Framework-agnostic request routing
//!
//! Maps `(method, url, body)` onto the API handlers and renders the JSON
//! envelope. HTTP adapters only move bytes in and out.

use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::api::{
    self, ActionFilter, ActionStatusRequest, ApiContext, ApiError, ApiResponse, AssessmentFilter,
    AssignActionRequest, CreateActionRequest, CreateAssessmentRequest, CreateNcrRequest, NcrFilter,
    NcrTransitionRequest, Page, PageRequest, RecordResponseRequest, VerifyActionRequest,
};
use crate::core::models::AssessmentStatus;

/// A rendered response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    /// HTTP status code
    pub status: u16,
    /// JSON body
    pub body: String,
}

impl ApiReply {
    /// Parse the body back into JSON
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

/// Request body for an assessment status change
#[derive(Debug, Clone, Copy, serde::Deserialize)]
struct AssessmentTransitionRequest {
    status: AssessmentStatus,
}

// =============================================================================
// ROUTING
// =============================================================================

/// Route one API request
///
/// `url` may carry a query string. Both `/api/v1/...` and `/api/...` are
/// accepted.
pub fn route(ctx: &ApiContext, method: &str, url: &str, body: &str) -> ApiReply {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let Some(api_path) = path.strip_prefix("/api/v1").or_else(|| path.strip_prefix("/api")) else {
        return not_found(method, path);
    };
    let query = Query::new(query);
    let segments: Vec<&str> = api_path.split('/').filter(|s| !s.is_empty()).collect();

    log::debug!("{method} {api_path}");

    match (method.to_ascii_uppercase().as_str(), segments.as_slice()) {
        // Reference data
        ("GET", ["workflow"]) => success(api::workflow()),
        ("GET", ["standard"]) => success(api::get_standard()),
        ("GET", ["templates"]) => success(api::list_templates()),

        // Assessments
        ("GET", ["assessments"]) => handle_page(
            query.page().and_then(|page| {
                let filter = AssessmentFilter {
                    status: query.parse("status")?,
                };
                api::list_assessments(ctx, filter, page)
            }),
        ),
        ("POST", ["assessments"]) => handle_result(
            parse_body::<CreateAssessmentRequest>(body)
                .and_then(|req| api::create_assessment(ctx, &req)),
        ),
        ("GET", ["assessments", id]) => {
            handle_result(parse_id(id).and_then(|id| api::get_assessment(ctx, id)))
        },
        ("DELETE", ["assessments", id]) => {
            handle_result(parse_id(id).and_then(|id| api::delete_assessment(ctx, id)))
        },
        ("GET", ["assessments", id, "compliance"]) => {
            handle_result(parse_id(id).and_then(|id| api::assessment_compliance(ctx, id)))
        },
        ("POST", ["assessments", id, "responses"]) => handle_result(parse_id(id).and_then(|id| {
            let req = parse_body::<RecordResponseRequest>(body)?;
            api::record_response(ctx, id, &req)
        })),
        ("POST", ["assessments", id, "complete"]) => {
            handle_result(parse_id(id).and_then(|id| api::complete_assessment(ctx, id)))
        },
        ("POST", ["assessments", id, "transition"]) => handle_result(parse_id(id).and_then(|id| {
            let req = parse_body::<AssessmentTransitionRequest>(body)?;
            api::transition_assessment(ctx, id, req.status)
        })),

        // Non-conformities
        ("GET", ["ncrs"]) => handle_page(query.page().and_then(|page| {
            let filter = NcrFilter {
                status: query.parse("status")?,
                severity: query.parse("severity")?,
            };
            api::list_ncrs(ctx, filter, page)
        })),
        ("POST", ["ncrs"]) => handle_result(
            parse_body::<CreateNcrRequest>(body).and_then(|req| api::create_ncr(ctx, &req)),
        ),
        ("GET", ["ncrs", id]) => handle_result(parse_id(id).and_then(|id| api::get_ncr(ctx, id))),
        ("DELETE", ["ncrs", id]) => {
            handle_result(parse_id(id).and_then(|id| api::delete_ncr(ctx, id)))
        },
        ("GET", ["ncrs", id, "summary"]) => {
            handle_result(parse_id(id).and_then(|id| api::ncr_summary(ctx, id)))
        },
        ("POST", ["ncrs", id, "transition"]) => handle_result(parse_id(id).and_then(|id| {
            let req = parse_body::<NcrTransitionRequest>(body)?;
            api::transition_ncr(ctx, id, req)
        })),

        // Corrective actions
        ("GET", ["actions"]) => handle_page(query.page().and_then(|page| {
            let filter = ActionFilter {
                status: query.parse("status")?,
                ncr_id: query.get("ncrId").map(parse_id).transpose()?,
            };
            api::list_actions(ctx, filter, page)
        })),
        ("POST", ["actions"]) => handle_result(
            parse_body::<CreateActionRequest>(body).and_then(|req| api::create_action(ctx, &req)),
        ),
        ("GET", ["actions", id]) => {
            handle_result(parse_id(id).and_then(|id| api::get_action(ctx, id)))
        },
        ("DELETE", ["actions", id]) => {
            handle_result(parse_id(id).and_then(|id| api::delete_action(ctx, id)))
        },
        ("PATCH", ["actions", id, "status"]) => handle_result(parse_id(id).and_then(|id| {
            let req = parse_body::<ActionStatusRequest>(body)?;
            api::update_action_status(ctx, id, req)
        })),
        ("POST", ["actions", id, "verify"]) => handle_result(parse_id(id).and_then(|id| {
            let req = parse_body::<VerifyActionRequest>(body)?;
            api::verify_action(ctx, id, &req)
        })),
        ("POST", ["actions", id, "assign"]) => handle_result(parse_id(id).and_then(|id| {
            let req = parse_body::<AssignActionRequest>(body)?;
            api::assign_action(ctx, id, &req)
        })),

        // Reports
        ("GET", ["dashboard"]) => handle_result(api::get_dashboard(ctx)),
        ("GET", ["trends"]) => handle_result(
            query.parse_number::<u32>("months").and_then(|months| api::get_trends(ctx, months)),
        ),

        _ => not_found(method, api_path),
    }
}

// =============================================================================
// REQUEST PARSING
// =============================================================================

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid id: {raw}")))
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

/// Query-string parameters
#[derive(Debug, Default)]
struct Query<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> Query<'a> {
    fn new(raw: &'a str) -> Self {
        let pairs = raw
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|p| p.split_once('=').unwrap_or((p, "")))
            .collect();
        Self { pairs }
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        self.pairs.iter().find(|(k, v)| *k == key && !v.is_empty()).map(|(_, v)| *v)
    }

    fn parse<T: std::str::FromStr<Err = String>>(&self, key: &str) -> Result<Option<T>, ApiError> {
        self.get(key).map(str::parse::<T>).transpose().map_err(ApiError::bad_request)
    }

    fn parse_number<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>, ApiError> {
        self.get(key)
            .map(|v| {
                v.parse()
                    .map_err(|_| ApiError::bad_request(format!("Invalid {key}: {v}")))
            })
            .transpose()
    }

    fn page(&self) -> Result<PageRequest, ApiError> {
        Ok(PageRequest {
            page: self.parse_number("page")?,
            page_size: match self.parse_number("pageSize")? {
                Some(size) => Some(size),
                None => self.parse_number("limit")?,
            },
        })
    }
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Convert a handler result to a reply
fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> ApiReply {
    match result {
        Ok(data) => success(data),
        Err(e) => error_reply(&e),
    }
}

/// Convert a paginated handler result to a reply
fn handle_page<T: Serialize>(result: Result<Page<T>, ApiError>) -> ApiReply {
    match result {
        Ok(page) => json_reply(&ApiResponse::paginated(page), 200),
        Err(e) => error_reply(&e),
    }
}

fn success<T: Serialize>(data: T) -> ApiReply {
    json_reply(&ApiResponse::success(data), 200)
}

/// Create an error reply with the matching status code
pub fn error_reply(error: &ApiError) -> ApiReply {
    if error.code.is_business_rule() {
        log::debug!("Rejected: {error}");
    }
    json_reply(&ApiResponse::<()>::error(error.code.as_str(), &error.message), error.status_code())
}

fn not_found(method: &str, path: &str) -> ApiReply {
    error_reply(&ApiError::not_found(format!("API endpoint not found: {method} {path}")))
}

fn json_reply<T: Serialize>(data: &T, status: u16) -> ApiReply {
    let body = serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
    ApiReply { status, body }
}
