use thiserror::Error;

/// One natural-language question plus the fixed routing metadata sent with
/// every request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub prompt: String,
    pub dialect: String,
    pub connection_id: String,
}

/// Lifecycle of the single outstanding query. Only the most recent outcome
/// is retained; a new submission replaces a settled one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("a query is already in flight")]
    AlreadyPending,
}

#[derive(Debug)]
pub struct QueryFlow {
    outcome: QueryOutcome,
}

impl Default for QueryFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryFlow {
    pub fn new() -> Self {
        Self {
            outcome: QueryOutcome::Idle,
        }
    }

    pub fn outcome(&self) -> &QueryOutcome {
        &self.outcome
    }

    /// Start a submission. Whitespace-only prompts are rejected without any
    /// state change, and a second submission is rejected while one is in
    /// flight.
    pub fn begin(
        &mut self,
        prompt: &str,
        dialect: &str,
        connection_id: &str,
    ) -> Result<QueryRequest, SubmitError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SubmitError::EmptyPrompt);
        }
        if self.outcome == QueryOutcome::Pending {
            return Err(SubmitError::AlreadyPending);
        }

        self.outcome = QueryOutcome::Pending;
        Ok(QueryRequest {
            prompt: prompt.to_string(),
            dialect: dialect.to_string(),
            connection_id: connection_id.to_string(),
        })
    }

    /// Settle the pending submission with the service payload, rendered
    /// pretty-printed for display.
    pub fn succeed(&mut self, payload: &serde_json::Value) -> Option<String> {
        if self.outcome != QueryOutcome::Pending {
            return None;
        }
        let rendered =
            serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
        self.outcome = QueryOutcome::Succeeded(rendered.clone());
        Some(rendered)
    }

    /// Settle the pending submission with a user-visible failure message.
    pub fn fail(&mut self, message: String) {
        if self.outcome != QueryOutcome::Pending {
            return;
        }
        self.outcome = QueryOutcome::Failed(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn begin(flow: &mut QueryFlow, prompt: &str) -> Result<QueryRequest, SubmitError> {
        flow.begin(prompt, "postgres", "conn-1")
    }

    #[test]
    fn empty_and_whitespace_prompts_are_rejected_without_state_change() {
        let mut flow = QueryFlow::new();

        assert_eq!(begin(&mut flow, ""), Err(SubmitError::EmptyPrompt));
        assert_eq!(begin(&mut flow, "   \t\n"), Err(SubmitError::EmptyPrompt));
        assert_eq!(flow.outcome(), &QueryOutcome::Idle);
    }

    #[test]
    fn prompt_is_trimmed_and_routing_metadata_is_attached() {
        let mut flow = QueryFlow::new();

        let request = begin(&mut flow, "  who earns the most?  ").unwrap();
        assert_eq!(request.prompt, "who earns the most?");
        assert_eq!(request.dialect, "postgres");
        assert_eq!(request.connection_id, "conn-1");
        assert_eq!(flow.outcome(), &QueryOutcome::Pending);
    }

    #[test]
    fn second_submission_is_rejected_while_pending() {
        let mut flow = QueryFlow::new();

        begin(&mut flow, "first").unwrap();
        assert_eq!(begin(&mut flow, "second"), Err(SubmitError::AlreadyPending));
        assert_eq!(flow.outcome(), &QueryOutcome::Pending);
    }

    #[test]
    fn success_stores_the_pretty_printed_payload() {
        let mut flow = QueryFlow::new();

        begin(&mut flow, "q").unwrap();
        let rendered = flow
            .succeed(&serde_json::json!({"sql": "SELECT 1"}))
            .unwrap();
        assert_eq!(rendered, "{\n  \"sql\": \"SELECT 1\"\n}");
        assert_eq!(flow.outcome(), &QueryOutcome::Succeeded(rendered));
    }

    #[test]
    fn resubmission_replaces_the_previous_outcome() {
        let mut flow = QueryFlow::new();

        begin(&mut flow, "first").unwrap();
        flow.fail("Analysis service returned status 500".to_string());
        assert!(matches!(flow.outcome(), QueryOutcome::Failed(_)));

        begin(&mut flow, "second").unwrap();
        assert_eq!(flow.outcome(), &QueryOutcome::Pending);
        flow.succeed(&serde_json::json!({"sql": "SELECT 2"}));
        assert!(matches!(flow.outcome(), QueryOutcome::Succeeded(_)));
    }

    #[test]
    fn settling_is_a_noop_unless_pending() {
        let mut flow = QueryFlow::new();

        flow.fail("too late".to_string());
        assert_eq!(flow.outcome(), &QueryOutcome::Idle);

        assert!(flow.succeed(&serde_json::json!({"sql": "SELECT 1"})).is_none());
        assert_eq!(flow.outcome(), &QueryOutcome::Idle);
    }
}
