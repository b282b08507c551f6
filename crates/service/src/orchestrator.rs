//! The research pipeline.
//!
//! A straight-line sequence over injected collaborators: plan the topic
//! into subtopics, decide per subtopic whether to search, search, extract
//! and persist notes, then synthesize one report. No graph engine — the
//! only branch is the per-subtopic search/no-search decision.
//!
//! Failure policy varies by stage and is deliberate: a planner failure
//! aborts the run, a decision failure fails open to "search anyway", a
//! search failure empties that subtopic's hit list, a per-source extraction
//! or save failure is recorded and skipped, and a synthesis failure falls
//! back to the compiled-notes aggregate.

use std::sync::Arc;

use chrono::Utc;
use scout_core::{
    CompiledNotes, Decision, DecisionOutcome, NewNote, Note, NoteSummary, Report, RunOutcome,
    SourceOutcome, SubtopicFindings, truncate_chars,
};
use scout_llm::{LlmClient, parse_subtopics};
use scout_search::{ExtractInput, Extractor};

use crate::{NotesService, SearchService, ServiceError};

/// Drives one research run end to end.
pub struct Orchestrator {
    notes: Arc<NotesService>,
    search: Arc<SearchService>,
    llm: Arc<LlmClient>,
    extractor: Arc<Extractor>,
    /// Note count at which the search decision short-circuits to `No`.
    skip_threshold: usize,
    /// Fallback length for note texts compiled into the synthesis prompt.
    summary_chars: usize,
}

impl Orchestrator {
    #[must_use]
    pub fn new(
        notes: Arc<NotesService>,
        search: Arc<SearchService>,
        llm: Arc<LlmClient>,
        extractor: Arc<Extractor>,
        skip_threshold: usize,
        summary_chars: usize,
    ) -> Self {
        Self { notes, search, llm, extractor, skip_threshold, summary_chars }
    }

    /// Run the whole pipeline for one topic.
    ///
    /// # Errors
    /// Returns an error when the planner call fails or yields no subtopics;
    /// every later stage degrades instead of aborting.
    pub async fn run(&self, topic: &str, max_results: u32) -> Result<RunOutcome, ServiceError> {
        let topic_id = match self.notes.get_or_create_topic(topic).await {
            Ok(t) => Some(t.id),
            Err(e) => {
                tracing::warn!(topic, error = %e, "topic creation failed; continuing without topic id");
                None
            },
        };

        let planner_text = self.llm.plan(topic).await?;
        let subtopics = parse_subtopics(&planner_text);
        if subtopics.is_empty() {
            return Err(ServiceError::EmptyPlan);
        }
        tracing::info!(topic, count = subtopics.len(), "planner produced subtopics");

        let mut findings = Vec::with_capacity(subtopics.len());
        for title in &subtopics {
            findings.push(self.process_subtopic(topic, topic_id, title, max_results).await?);
        }

        let compiled_notes = self.compile_notes(&findings).await?;
        let report = match self.llm.synthesize(topic, &compiled_notes).await {
            Ok(text) => Report::Prose { text },
            Err(e) => {
                tracing::warn!(topic, error = %e, "synthesis failed; falling back to compiled notes");
                Report::Fallback {
                    topic: topic.to_owned(),
                    generated_at: Utc::now(),
                    compiled_notes,
                }
            },
        };

        Ok(RunOutcome { topic_id, topic: topic.to_owned(), subtopics, findings, report })
    }

    async fn process_subtopic(
        &self,
        topic: &str,
        topic_id: Option<i64>,
        title: &str,
        max_results: u32,
    ) -> Result<SubtopicFindings, ServiceError> {
        tracing::info!(subtopic = title, "processing subtopic");
        let subtopic_id = match topic_id {
            Some(tid) => match self.notes.get_or_create_subtopic(tid, title).await {
                Ok(sub) => Some(sub.id),
                Err(e) => {
                    tracing::warn!(subtopic = title, error = %e, "subtopic creation failed; continuing without id");
                    None
                },
            },
            None => None,
        };

        let note_count = match subtopic_id {
            Some(sid) => self.notes.note_count(sid).await?,
            None => 0,
        };

        let decision = self.decide(title, note_count).await;
        if decision.decision == Decision::No {
            let notes = self.stored_notes(subtopic_id).await?;
            return Ok(SubtopicFindings {
                title: title.to_owned(),
                subtopic_id,
                decision,
                hits: Vec::new(),
                sources: Vec::new(),
                notes: notes.iter().map(NoteSummary::from).collect(),
            });
        }

        let query = format!("{topic} {title}");
        let hits = match self.search.search(&query, max_results).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(query, error = %e, "search failed; continuing with no hits");
                Vec::new()
            },
        };

        let mut sources = Vec::with_capacity(hits.len());
        for hit in hits.iter().take(max_results as usize) {
            sources.push(self.extract_and_save(subtopic_id, &hit.url, &hit.title).await);
        }

        let notes = self.stored_notes(subtopic_id).await?;
        Ok(SubtopicFindings {
            title: title.to_owned(),
            subtopic_id,
            decision,
            hits,
            sources,
            notes: notes.iter().map(NoteSummary::from).collect(),
        })
    }

    /// Threshold short-circuit first, then the model, then fail open.
    async fn decide(&self, title: &str, note_count: usize) -> DecisionOutcome {
        if note_count >= self.skip_threshold {
            let outcome = DecisionOutcome {
                decision: Decision::No,
                reason: format!("has {note_count} notes >= threshold"),
            };
            tracing::info!(subtopic = title, reason = %outcome.reason, "skipping search");
            return outcome;
        }
        match self.llm.decide_need_search(title).await {
            Ok(text) => {
                let decision = Decision::from_response_text(&text);
                DecisionOutcome {
                    decision,
                    reason: format!("llm decision: {}", text.trim().to_lowercase()),
                }
            },
            Err(e) => {
                tracing::warn!(subtopic = title, error = %e, "decision failed, defaulting to yes");
                DecisionOutcome { decision: Decision::Yes, reason: "llm failure fallback".to_owned() }
            },
        }
    }

    async fn extract_and_save(
        &self,
        subtopic_id: Option<i64>,
        url: &str,
        hit_title: &str,
    ) -> SourceOutcome {
        let input = ExtractInput { text: None, url: Some(url.to_owned()) };
        let extracted = match self.extractor.extract(&input).await {
            Ok(ext) => ext,
            Err(e) => {
                tracing::warn!(url, error = %e, "extraction failed");
                return SourceOutcome::Failed { url: url.to_owned(), error: e.to_string() };
            },
        };

        let Some(sid) = subtopic_id else {
            return SourceOutcome::Unsaved { url: url.to_owned() };
        };

        let new_note = NewNote {
            subtopic_id: sid,
            source_title: extracted
                .source_title
                .or_else(|| (!hit_title.is_empty()).then(|| hit_title.to_owned())),
            source_url: Some(url.to_owned()),
            content: extracted.content,
            extracted_summary: Some(extracted.summary),
        };
        match self.notes.save_note(&new_note).await {
            Ok((note, _inserted)) => SourceOutcome::Saved { url: url.to_owned(), note_id: note.id },
            Err(e) => {
                tracing::warn!(url, error = %e, "note save failed");
                SourceOutcome::Failed { url: url.to_owned(), error: e.to_string() }
            },
        }
    }

    async fn stored_notes(&self, subtopic_id: Option<i64>) -> Result<Vec<Note>, ServiceError> {
        match subtopic_id {
            Some(sid) => self.notes.notes_for_subtopic(sid).await,
            None => Ok(Vec::new()),
        }
    }

    /// Note texts per subtopic, preferring the extracted summary and falling
    /// back to truncated content.
    async fn compile_notes(
        &self,
        findings: &[SubtopicFindings],
    ) -> Result<CompiledNotes, ServiceError> {
        let mut compiled = CompiledNotes::new();
        for finding in findings {
            let notes = self.stored_notes(finding.subtopic_id).await?;
            let texts = notes
                .iter()
                .map(|n| {
                    n.extracted_summary
                        .clone()
                        .unwrap_or_else(|| truncate_chars(&n.content, self.summary_chars).to_owned())
                })
                .collect();
            compiled.insert(finding.title.clone(), texts);
        }
        Ok(compiled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchBackend;
    use scout_storage::{SqliteStorage, Storage};
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{ "message": { "content": content, "role": "assistant" } }]
        })
    }

    async fn mount_planner(server: &MockServer, plan: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("research planner"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(plan)))
            .mount(server)
            .await;
    }

    async fn mount_decider(server: &MockServer, answer: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("requires external search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(answer)))
            .mount(server)
            .await;
    }

    async fn mount_synthesizer(server: &MockServer, report: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("research synthesizer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(report)))
            .mount(server)
            .await;
    }

    struct Fixture {
        storage: Arc<dyn Storage>,
        orchestrator: Orchestrator,
        // holds the seed documents alive for the test's duration
        _seed_dir: tempfile::TempDir,
    }

    async fn fixture(server: &MockServer) -> Fixture {
        let seed_dir = tempfile::tempdir().unwrap();
        std::fs::write(seed_dir.path().join("sample.txt"), "Seed document body for notes.")
            .unwrap();

        let storage: Arc<dyn Storage> =
            Arc::new(SqliteStorage::new_in_memory().await.unwrap());
        let notes = Arc::new(NotesService::new(Arc::clone(&storage)));
        let search = Arc::new(SearchService::new(Arc::clone(&storage), SearchBackend::Local {
            seed_dir: seed_dir.path().to_path_buf(),
        }));
        let llm = Arc::new(
            LlmClient::new("k".to_owned(), server.uri(), "test-model".to_owned()).unwrap(),
        );
        let extractor = Arc::new(Extractor::new(5, 1000, 50).unwrap());

        Fixture {
            orchestrator: Orchestrator::new(notes, search, llm, extractor, 2, 400),
            storage,
            _seed_dir: seed_dir,
        }
    }

    #[tokio::test]
    async fn test_full_run_with_prose_report() {
        let server = MockServer::start().await;
        mount_planner(&server, "1. Alpha\n2. Beta").await;
        mount_decider(&server, "yes").await;
        mount_synthesizer(&server, "Executive summary: everything checks out.").await;

        let fx = fixture(&server).await;
        let outcome = fx.orchestrator.run("Topic X", 2).await.unwrap();

        assert_eq!(outcome.subtopics, vec!["Alpha", "Beta"]);
        assert!(outcome.topic_id.is_some());
        assert_eq!(outcome.findings.len(), 2);

        let alpha = &outcome.findings[0];
        assert_eq!(alpha.decision.decision, Decision::Yes);
        assert_eq!(alpha.notes.len(), 1);
        let SourceOutcome::Saved { note_id: alpha_note, .. } = alpha.sources[0] else {
            panic!("Alpha's source was not saved");
        };

        // Both subtopics surface the same seed document. The content hash is
        // global, so Alpha's save claims the note and Beta's save resolves to
        // that existing row instead of creating a second one.
        let beta = &outcome.findings[1];
        assert_eq!(beta.decision.decision, Decision::Yes);
        let SourceOutcome::Saved { note_id: beta_note, .. } = beta.sources[0] else {
            panic!("Beta's source did not resolve to the existing note");
        };
        assert_eq!(beta_note, alpha_note);
        assert!(beta.notes.is_empty());

        match outcome.report {
            Report::Prose { ref text } => {
                assert_eq!(text, "Executive summary: everything checks out.");
            },
            Report::Fallback { .. } => panic!("expected prose report"),
        }
    }

    #[tokio::test]
    async fn test_synthesis_failure_falls_back_to_compiled_notes() {
        let server = MockServer::start().await;
        mount_planner(&server, "1. Alpha").await;
        mount_decider(&server, "yes").await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("research synthesizer"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .mount(&server)
            .await;

        let fx = fixture(&server).await;
        let outcome = fx.orchestrator.run("Topic X", 2).await.unwrap();

        match outcome.report {
            Report::Fallback { ref topic, ref compiled_notes, .. } => {
                assert_eq!(topic, "Topic X");
                let alpha = compiled_notes.get("Alpha").expect("Alpha compiled");
                assert!(!alpha.is_empty());
            },
            Report::Prose { .. } => panic!("expected fallback report"),
        }
    }

    #[tokio::test]
    async fn test_planner_failure_aborts_run() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("research planner"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let fx = fixture(&server).await;
        let err = fx.orchestrator.run("Topic X", 2).await.unwrap_err();
        assert!(matches!(err, ServiceError::Llm(_)));
    }

    #[tokio::test]
    async fn test_empty_plan_aborts_run() {
        let server = MockServer::start().await;
        mount_planner(&server, "").await;

        let fx = fixture(&server).await;
        let err = fx.orchestrator.run("Topic X", 2).await.unwrap_err();
        assert!(matches!(err, ServiceError::EmptyPlan));
    }

    #[tokio::test]
    async fn test_threshold_skips_search_without_model_call() {
        let server = MockServer::start().await;
        mount_planner(&server, "1. Alpha").await;
        mount_synthesizer(&server, "report").await;
        // any decision call would be a test failure
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("requires external search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("yes")))
            .expect(0)
            .mount(&server)
            .await;

        let fx = fixture(&server).await;
        // seed two notes so the threshold short-circuit fires
        let topic = fx.storage.create_topic("Topic X").await.unwrap();
        let sub = fx.storage.create_subtopic(topic.id, "Alpha").await.unwrap();
        for i in 0..2 {
            fx.storage
                .save_note(&NewNote {
                    subtopic_id: sub.id,
                    source_title: None,
                    source_url: Some(format!("https://example.com/{i}")),
                    content: format!("existing note {i}"),
                    extracted_summary: Some(format!("summary {i}")),
                })
                .await
                .unwrap();
        }

        let outcome = fx.orchestrator.run("Topic X", 2).await.unwrap();
        let finding = &outcome.findings[0];
        assert_eq!(finding.decision.decision, Decision::No);
        assert!(finding.decision.reason.contains("threshold"));
        assert!(finding.hits.is_empty());
        assert_eq!(finding.notes.len(), 2);
    }

    #[tokio::test]
    async fn test_decision_failure_fails_open_to_search() {
        let server = MockServer::start().await;
        mount_planner(&server, "1. Alpha").await;
        mount_synthesizer(&server, "report").await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("requires external search"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .mount(&server)
            .await;

        let fx = fixture(&server).await;
        let outcome = fx.orchestrator.run("Topic X", 2).await.unwrap();
        let finding = &outcome.findings[0];
        assert_eq!(finding.decision.decision, Decision::Yes);
        assert_eq!(finding.decision.reason, "llm failure fallback");
        assert!(!finding.notes.is_empty());
    }

    #[tokio::test]
    async fn test_model_no_decision_skips_search() {
        let server = MockServer::start().await;
        mount_planner(&server, "1. Alpha").await;
        mount_decider(&server, "No.").await;
        mount_synthesizer(&server, "report").await;

        let fx = fixture(&server).await;
        let outcome = fx.orchestrator.run("Topic X", 2).await.unwrap();
        let finding = &outcome.findings[0];
        assert_eq!(finding.decision.decision, Decision::No);
        assert!(finding.hits.is_empty());
        assert!(finding.notes.is_empty());
    }

    #[tokio::test]
    async fn test_repeat_run_does_not_duplicate_notes() {
        let server = MockServer::start().await;
        mount_planner(&server, "1. Alpha").await;
        mount_decider(&server, "yes").await;
        mount_synthesizer(&server, "report").await;

        let fx = fixture(&server).await;
        let first = fx.orchestrator.run("Topic X", 1).await.unwrap();
        let notes_after_first = first.findings[0].notes.len();
        assert_eq!(notes_after_first, 1);

        // identical sources collapse onto the same hash; count must not grow
        let second = fx.orchestrator.run("Topic X", 1).await.unwrap();
        assert_eq!(second.findings[0].notes.len(), notes_after_first);
    }
}
