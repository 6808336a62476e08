use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StepResult {
    pub step_id: String,
    pub success: bool,
    /// Absent when the request never produced an HTTP response.
    pub status_code: Option<u16>,
    /// Parsed JSON body, or the raw body as a string when it is not JSON.
    #[serde(default)]
    pub data: JsonValue,
    pub error: Option<String>,
    pub duration_ms: u64,
}

impl StepResult {
    pub fn failed(step_id: impl Into<String>, error: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            step_id: step_id.into(),
            success: false,
            status_code: None,
            data: JsonValue::Null,
            error: Some(error.into()),
            duration_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExecutionSummary {
    pub plan_id: String,
    pub goal: String,
    pub success: bool,
    pub results: Vec<StepResult>,
}

impl ExecutionSummary {
    /// Overall success is the conjunction of every recorded step.
    pub fn from_results(plan_id: String, goal: String, results: Vec<StepResult>) -> Self {
        let success = results.iter().all(|r| r.success);
        Self {
            plan_id,
            goal,
            success,
            results,
        }
    }

    pub fn succeeded_steps(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed_steps(&self) -> usize {
        self.results.len() - self.succeeded_steps()
    }

    pub fn status_label(&self) -> &'static str {
        if self.success {
            "success"
        } else {
            "partial_or_failed"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(id: &str) -> StepResult {
        StepResult {
            step_id: id.to_string(),
            success: true,
            status_code: Some(200),
            data: serde_json::json!({}),
            error: None,
            duration_ms: 3,
        }
    }

    #[test]
    fn empty_run_is_successful() {
        let s = ExecutionSummary::from_results("p".into(), "g".into(), vec![]);
        assert!(s.success);
        assert_eq!(s.status_label(), "success");
    }

    #[test]
    fn any_failure_fails_the_run() {
        let s = ExecutionSummary::from_results(
            "p".into(),
            "g".into(),
            vec![ok("a"), StepResult::failed("b", "boom", 1)],
        );
        assert!(!s.success);
        assert_eq!(s.succeeded_steps(), 1);
        assert_eq!(s.failed_steps(), 1);
        assert_eq!(s.status_label(), "partial_or_failed");
    }
}
