//! Directory search handler.
//!
//! ```text
//! POST /search {"q":"ali"}   or   q=ali (form)
//! ```
//!
//! The query is validated before it reaches the directory. Rejections are
//! logged as security events with the raw input; the response only names the
//! rule that failed. Bodies that cannot be parsed at all go through the same
//! path as `missing_query` (empty) or `invalid_type` (anything else).

use actix_web::http::header;
use actix_web::{HttpRequest, post, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::{DirectoryMatch, Error, MAX_QUERY_CHARS, QueryRejection, SearchQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::caller::caller_address;
use crate::inbound::http::state::HttpState;

/// JSON search body. `q` is kept loose so wrong shapes can be reported.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SearchRequest {
    #[schema(value_type = String, example = "ali")]
    pub q: Option<Value>,
}

/// Form-encoded search body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub q: Option<String>,
}

/// Search results. Entries never carry e-mail addresses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    /// The accepted query, exactly as submitted.
    pub query: String,
    pub results: Vec<DirectoryMatch>,
}

fn rejection_error(rejection: &QueryRejection) -> Error {
    Error::invalid_request(format!(
        "invalid search query: letters, spaces and hyphens only (max {MAX_QUERY_CHARS} characters)"
    ))
    .with_details(json!({ "field": "q", "code": rejection.code() }))
}

/// Search the employee directory by name.
#[utoipa::path(
    post,
    path = "/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Up to three matching employees", body = SearchResponse),
        (status = 400, description = "Query rejected", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["directory"],
    operation_id = "search"
)]
#[post("/search")]
pub async fn search(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: Option<web::Either<web::Json<SearchRequest>, web::Form<SearchForm>>>,
) -> ApiResult<web::Json<SearchResponse>> {
    let raw = match payload {
        Some(web::Either::Left(body)) => body.into_inner().q,
        Some(web::Either::Right(form)) => form.into_inner().q.map(Value::String),
        None => return Err(reject(&req, None, &unreadable_body(&req))),
    };

    let query = SearchQuery::from_value(raw.as_ref())
        .map_err(|rejection| reject(&req, raw.as_ref(), &rejection))?;

    let results = state.directory.search(&query).await?;
    Ok(web::Json(SearchResponse {
        query: query.as_str().to_owned(),
        results,
    }))
}

/// Classify a body neither extractor could read: nothing sent counts as a
/// missing query, anything else as the wrong shape.
fn unreadable_body(req: &HttpRequest) -> QueryRejection {
    let declared_len = req
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(0);
    if declared_len == 0 && !req.headers().contains_key(header::TRANSFER_ENCODING) {
        QueryRejection::Missing
    } else {
        QueryRejection::NotText
    }
}

/// Log the rejection as a security event and build the client error.
fn reject(req: &HttpRequest, raw: Option<&Value>, rejection: &QueryRejection) -> Error {
    warn!(
        target: "security",
        caller = %caller_address(req),
        raw = ?raw,
        reason = rejection.code(),
        "search query rejected"
    );
    rejection_error(rejection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::default_state;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    async fn post_json(body: Value) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(default_state()))
                .service(search),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/search")
                .set_json(body)
                .to_request(),
        )
        .await;
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    fn names(body: &Value) -> Vec<&str> {
        body["results"]
            .as_array()
            .expect("results array")
            .iter()
            .filter_map(|entry| entry["name"].as_str())
            .collect()
    }

    #[rstest]
    #[case("a", &["Alice", "Charlie"])]
    #[case("ALICE", &["Alice"])]
    #[case("AlIcE", &["Alice"])]
    #[case("li", &["Alice", "Charlie"])]
    #[case("zed", &[])]
    #[case("Bob - B", &[])]
    #[actix_web::test]
    async fn accepted_queries_return_matches(#[case] q: &str, #[case] expected: &[&str]) {
        let (status, body) = post_json(json!({ "q": q })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["query"].as_str(), Some(q));
        assert_eq!(names(&body), expected);
    }

    #[actix_web::test]
    async fn results_omit_email_addresses() {
        let (_, body) = post_json(json!({ "q": "e" })).await;
        for entry in body["results"].as_array().expect("results array") {
            let keys: Vec<&String> = entry.as_object().expect("object").keys().collect();
            assert_eq!(keys.len(), 2, "only id and name: {entry}");
            assert!(entry.get("email").is_none());
        }
    }

    #[rstest]
    #[case(json!({ "q": "xyz123" }), "invalid_characters")]
    #[case(json!({ "q": "<script>" }), "invalid_characters")]
    #[case(json!({ "q": "abcdefghijklmnopqrstu" }), "too_long")]
    #[case(json!({ "q": "" }), "missing_query")]
    #[case(json!({}), "missing_query")]
    #[case(json!({ "q": null }), "missing_query")]
    #[case(json!({ "q": 42 }), "invalid_type")]
    #[case(json!({ "q": ["Alice"] }), "invalid_type")]
    #[actix_web::test]
    async fn rejected_queries_answer_400_without_echo(
        #[case] body: Value,
        #[case] detail_code: &str,
    ) {
        let submitted = body["q"].as_str().map(str::to_owned);
        let (status, payload) = post_json(body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["code"].as_str(), Some("invalid_request"));
        assert_eq!(payload["details"]["field"].as_str(), Some("q"));
        assert_eq!(payload["details"]["code"].as_str(), Some(detail_code));
        if let Some(q) = submitted.filter(|q| !q.is_empty()) {
            assert!(!payload.to_string().contains(&q), "input echoed: {payload}");
        }
    }

    #[actix_web::test]
    async fn form_bodies_are_accepted() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(default_state()))
                .service(search),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/search")
                .insert_header(("content-type", "application/x-www-form-urlencoded"))
                .set_payload("q=bob")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: SearchResponse = test::read_body_json(res).await;
        assert_eq!(body.query, "bob");
        assert_eq!(body.results.len(), 1);
        assert_eq!(body.results[0].name, "Bob");
    }

    async fn post_raw(request: test::TestRequest) -> (StatusCode, String) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(default_state()))
                .service(search),
        )
        .await;
        let res = test::call_service(&app, request.uri("/search").to_request()).await;
        let status = res.status();
        let body = test::read_body(res).await;
        (status, String::from_utf8(body.to_vec()).expect("utf8 body"))
    }

    #[rstest]
    #[case::no_body(test::TestRequest::post(), "missing_query")]
    #[case::duplicate_form_key(
        test::TestRequest::post()
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload("q=a&q=<script>"),
        "invalid_type"
    )]
    #[case::plain_text(
        test::TestRequest::post()
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload("<script>"),
        "invalid_type"
    )]
    #[case::json_scalar_body(test::TestRequest::post().set_json(json!("<script>")), "invalid_type")]
    #[actix_web::test]
    async fn unreadable_bodies_are_rejected_like_bad_queries(
        #[case] request: test::TestRequest,
        #[case] detail_code: &str,
    ) {
        let (status, text) = post_raw(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let payload: Value = serde_json::from_str(&text).expect("domain error JSON");
        assert_eq!(payload["code"].as_str(), Some("invalid_request"));
        assert_eq!(payload["details"]["field"].as_str(), Some("q"));
        assert_eq!(payload["details"]["code"].as_str(), Some(detail_code));
        assert!(!text.contains("<script>"), "input echoed: {text}");
    }
}
