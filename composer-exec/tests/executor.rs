use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use composer_core::{ExecutionMode, PlanStep, RunContext, WorkflowPlan};
use composer_exec::catalog::{OpenApiSpec, SpecCatalog};
use composer_exec::executor::{
    Event, EventSink, HttpClient, HttpError, HttpRequestParts, HttpResponseParts, PlanExecutor,
    StepExecutor,
};
use composer_store::{InMemorySessionStore, SessionStore};
use serde_json::{json, Value as JsonValue};
use tokio::sync::Mutex;

/// Scripted responses keyed by URL path, with request capture.
#[derive(Default)]
struct MockHttpClient {
    responses: BTreeMap<String, Result<(u16, String), HttpError>>,
    delays: BTreeMap<String, Duration>,
    requests: Mutex<Vec<HttpRequestParts>>,
}

impl MockHttpClient {
    fn respond(mut self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(path.to_string(), Ok((status, body.to_string())));
        self
    }

    fn fail(mut self, path: &str, err: HttpError) -> Self {
        self.responses.insert(path.to_string(), Err(err));
        self
    }

    fn delay(mut self, path: &str, d: Duration) -> Self {
        self.delays.insert(path.to_string(), d);
        self
    }

    async fn paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .await
            .iter()
            .map(|r| r.url.path().to_string())
            .collect()
    }

    async fn body_for(&self, path: &str) -> JsonValue {
        let reqs = self.requests.lock().await;
        let req = reqs.iter().find(|r| r.url.path() == path).unwrap();
        serde_json::from_slice(&req.body).unwrap()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(
        &self,
        req: HttpRequestParts,
        _timeout: Duration,
    ) -> Result<HttpResponseParts, HttpError> {
        let path = req.url.path().to_string();
        self.requests.lock().await.push(req);
        if let Some(d) = self.delays.get(&path) {
            tokio::time::sleep(*d).await;
        }
        match self.responses.get(&path) {
            Some(Ok((status, body))) => Ok(HttpResponseParts {
                status: *status,
                headers: BTreeMap::new(),
                body: body.as_bytes().to_vec(),
            }),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(HttpResponseParts {
                status: 404,
                headers: BTreeMap::new(),
                body: Vec::new(),
            }),
        }
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn emit(&self, event: Event) {
        self.events.lock().await.push(event);
    }
}

fn catalog() -> Arc<SpecCatalog> {
    let doc = json!({
        "paths": {
            "/users": {"post": {"operationId": "createUser"}, "get": {"operationId": "listUsers"}},
            "/emails/welcome": {"post": {"operationId": "sendWelcomeEmail"}},
            "/audit": {"delete": {"operationId": "purgeAudit"}}
        }
    });
    let mut c = SpecCatalog::new();
    c.register("svc", OpenApiSpec::from_value("inline", "https://api.test/", doc));
    Arc::new(c)
}

fn step(id: &str, name: &str, op: &str, inputs: JsonValue) -> PlanStep {
    PlanStep {
        id: id.to_string(),
        name: name.to_string(),
        operation_id: op.to_string(),
        service: "svc".to_string(),
        inputs: serde_json::from_value(inputs).unwrap(),
        requires_confirmation: false,
    }
}

fn plan(mode: ExecutionMode, steps: Vec<PlanStep>) -> WorkflowPlan {
    WorkflowPlan {
        plan_id: "p1".to_string(),
        goal: "onboard".to_string(),
        execution_mode: mode,
        steps,
    }
}

struct Harness {
    http: Arc<MockHttpClient>,
    sink: Arc<RecordingSink>,
    sessions: Arc<InMemorySessionStore>,
    executor: PlanExecutor,
}

fn harness(http: MockHttpClient) -> Harness {
    let http = Arc::new(http);
    let sink = Arc::new(RecordingSink::default());
    let sessions = Arc::new(InMemorySessionStore::new());
    let steps = StepExecutor::new(catalog(), http.clone(), sink.clone(), Duration::from_secs(10));
    let executor = PlanExecutor::new(steps, sessions.clone(), sink.clone());
    Harness {
        http,
        sink,
        sessions,
        executor,
    }
}

#[tokio::test]
async fn sequential_stops_after_first_failure() {
    let h = harness(
        MockHttpClient::default()
            .respond("/users", 201, r#"{"id":"u1"}"#)
            .respond("/emails/welcome", 500, r#"{"detail":"smtp down"}"#),
    );
    let p = plan(
        ExecutionMode::Sequential,
        vec![
            step("s1", "createUser", "createUser", json!({"name": "Ada"})),
            step("s2", "sendWelcome", "sendWelcomeEmail", json!({})),
            step("s3", "purge", "purgeAudit", json!({})),
        ],
    );

    let summary = h.executor.run(&p).await;

    assert!(!summary.success);
    assert_eq!(summary.results.len(), 2);
    assert!(summary.results[0].success);
    assert_eq!(summary.results[1].status_code, Some(500));
    assert_eq!(summary.results[1].error.as_deref(), Some(r#"{"detail":"smtp down"}"#));
    assert_eq!(h.http.paths().await, vec!["/users", "/emails/welcome"]);
}

#[tokio::test]
async fn sequential_threads_derived_ids_into_later_inputs() {
    let h = harness(
        MockHttpClient::default()
            .respond("/users", 201, r#"{"id":"u1","name":"Ada"}"#)
            .respond("/emails/welcome", 200, r#"{"queued":true}"#),
    );
    let p = plan(
        ExecutionMode::Sequential,
        vec![
            step("s1", "createUser", "createUser", json!({"name": "Ada"})),
            step(
                "s2",
                "sendWelcome",
                "sendWelcomeEmail",
                json!({"user_id": "${ctx.createUser_id}", "missing": "${ctx.nope}", "literal": 3}),
            ),
        ],
    );

    let mut context = RunContext::new();
    let summary = h.executor.run_with_context(&p, &mut context).await;

    assert!(summary.success);
    assert_eq!(
        h.http.body_for("/emails/welcome").await,
        json!({"user_id": "u1", "missing": null, "literal": 3})
    );
    assert_eq!(context.get("createUser_id"), Some(&json!("u1")));
    assert_eq!(context.get("sendWelcome_id"), None);
}

#[tokio::test]
async fn parallel_runs_every_step_and_keeps_declaration_order() {
    let h = harness(
        MockHttpClient::default()
            .respond("/users", 201, r#"{"id":"u1"}"#)
            .respond("/emails/welcome", 503, "")
            .respond("/audit", 200, r#"{"id":7}"#)
            .delay("/users", Duration::from_millis(50)),
    );
    let p = plan(
        ExecutionMode::Parallel,
        vec![
            step("s1", "createUser", "createUser", json!({})),
            step("s2", "sendWelcome", "sendWelcomeEmail", json!({})),
            step("s3", "purge", "purgeAudit", json!({})),
        ],
    );

    let mut context = RunContext::new();
    let summary = h.executor.run_with_context(&p, &mut context).await;

    let ids: Vec<&str> = summary.results.iter().map(|r| r.step_id.as_str()).collect();
    assert_eq!(ids, vec!["s1", "s2", "s3"]);
    assert!(!summary.success);
    assert_eq!(summary.results[1].error.as_deref(), Some("HTTP 503"));
    assert_eq!(context.get("createUser_id"), Some(&json!("u1")));
    assert_eq!(context.get("purge_id"), Some(&json!(7)));
}

#[tokio::test]
async fn parallel_steps_resolve_against_launch_snapshot() {
    let h = harness(
        MockHttpClient::default()
            .respond("/users", 201, r#"{"id":"u1"}"#)
            .respond("/emails/welcome", 200, "{}"),
    );
    let p = plan(
        ExecutionMode::Parallel,
        vec![
            step("s1", "createUser", "createUser", json!({})),
            step("s2", "sendWelcome", "sendWelcomeEmail", json!({"user_id": "${ctx.createUser_id}"})),
        ],
    );

    let summary = h.executor.run(&p).await;

    assert!(summary.success);
    assert_eq!(
        h.http.body_for("/emails/welcome").await,
        json!({"user_id": null})
    );
}

#[tokio::test]
async fn get_and_delete_send_query_parameters() {
    let h = harness(
        MockHttpClient::default()
            .respond("/users", 200, "[]")
            .respond("/audit", 204, ""),
    );
    let p = plan(
        ExecutionMode::Sequential,
        vec![
            step("s1", "list", "listUsers", json!({"limit": 5})),
            step("s2", "purge", "purgeAudit", json!({"before": "2024-01-01"})),
        ],
    );
    let summary = h.executor.run(&p).await;
    assert!(summary.success);

    let reqs = h.http.requests.lock().await;
    assert_eq!(reqs[0].method, "GET");
    assert_eq!(reqs[0].url.as_str(), "https://api.test/users?limit=5");
    assert!(reqs[0].body.is_empty());
    assert_eq!(reqs[1].method, "DELETE");
    assert_eq!(reqs[1].url.query(), Some("before=2024-01-01"));
    assert_eq!(summary.results[0].data, json!([]));
    assert_eq!(summary.results[1].data, json!(""));
}

#[tokio::test]
async fn non_json_body_is_kept_as_text() {
    let h = harness(MockHttpClient::default().respond("/users", 200, "created ok"));
    let p = plan(
        ExecutionMode::Sequential,
        vec![step("s1", "createUser", "createUser", json!({}))],
    );
    let summary = h.executor.run(&p).await;
    assert!(summary.success);
    assert_eq!(summary.results[0].data, json!("created ok"));
    assert_eq!(summary.results[0].status_code, Some(200));
}

#[tokio::test]
async fn not_found_is_a_failure_carrying_the_body() {
    let h = harness(MockHttpClient::default().respond(
        "/users",
        404,
        r#"{"detail":"user not found"}"#,
    ));
    let p = plan(
        ExecutionMode::Sequential,
        vec![step("s1", "listUsers", "listUsers", json!({"id": 9}))],
    );

    let summary = h.executor.run(&p).await;

    assert!(!summary.success);
    let r = &summary.results[0];
    assert!(!r.success);
    assert_eq!(r.status_code, Some(404));
    assert_eq!(r.error.as_deref(), Some(r#"{"detail":"user not found"}"#));
}

#[tokio::test]
async fn resolution_errors_become_failed_results() {
    let h = harness(MockHttpClient::default().respond("/users", 201, "{}"));
    let mut bad_service = step("s2", "x", "createUser", json!({}));
    bad_service.service = "billing".to_string();
    let p = plan(
        ExecutionMode::Sequential,
        vec![
            step("s1", "unknown", "deleteEverything", json!({})),
            bad_service,
        ],
    );

    let summary = h.executor.run(&p).await;

    assert_eq!(summary.results.len(), 1);
    let r = &summary.results[0];
    assert!(!r.success);
    assert_eq!(r.status_code, None);
    assert!(r.error.as_deref().unwrap().contains("deleteEverything"));
    assert!(h.http.paths().await.is_empty());

    let p = plan(ExecutionMode::Parallel, p.steps.clone());
    let summary = h.executor.run(&p).await;
    assert_eq!(summary.results.len(), 2);
    assert!(summary.results[1].error.as_deref().unwrap().contains("unknown service 'billing'"));
}

#[tokio::test]
async fn transport_errors_become_failed_results() {
    let h = harness(
        MockHttpClient::default()
            .fail("/users", HttpError::Timeout)
            .fail("/emails/welcome", HttpError::Network("connection refused".into())),
    );
    let p = plan(
        ExecutionMode::Parallel,
        vec![
            step("s1", "createUser", "createUser", json!({})),
            step("s2", "sendWelcome", "sendWelcomeEmail", json!({})),
        ],
    );
    let summary = h.executor.run(&p).await;
    assert!(!summary.success);
    assert_eq!(summary.results[0].error.as_deref(), Some("timeout"));
    assert_eq!(summary.results[0].status_code, None);
    assert!(summary.results[1]
        .error
        .as_deref()
        .unwrap()
        .contains("connection refused"));
}

#[tokio::test]
async fn empty_plan_succeeds_with_no_results() {
    let h = harness(MockHttpClient::default());
    let summary = h.executor.run(&plan(ExecutionMode::Sequential, vec![])).await;
    assert!(summary.success);
    assert!(summary.results.is_empty());
}

#[tokio::test]
async fn summary_is_saved_and_events_are_ordered() {
    let h = harness(
        MockHttpClient::default()
            .respond("/users", 201, r#"{"id":"u1"}"#)
            .respond("/emails/welcome", 400, "bad"),
    );
    let p = plan(
        ExecutionMode::Sequential,
        vec![
            step("s1", "createUser", "createUser", json!({})),
            step("s2", "sendWelcome", "sendWelcomeEmail", json!({})),
        ],
    );
    let summary = h.executor.run(&p).await;

    let stored = h.sessions.get_summary("p1").await.unwrap().unwrap();
    assert_eq!(stored, summary);

    let kinds: Vec<&str> = h
        .sink
        .events
        .lock()
        .await
        .iter()
        .map(|e| e.type_name())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "run.started",
            "step.started",
            "step.succeeded",
            "step.started",
            "step.failed",
            "run.finished",
        ]
    );
}
