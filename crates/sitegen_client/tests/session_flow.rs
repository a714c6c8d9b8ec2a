use async_trait::async_trait;
use pretty_assertions::assert_eq;
use sitegen_client::{
    ClientConfig, ClientError, GeneratorSession, LookupOutcome, ProjectsApi, ViewState,
    EMPTY_IDEA_MESSAGE,
};
use sitegen_core::{Project, SectionTemplate};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

const SERVER_MARK: &str = " (server)";

/// In-process stand-in for the HTTP API. Server-side sections carry a
/// marker so tests can tell them apart from the optimistic guess.
#[derive(Clone, Default)]
struct FakeApi {
    latency: Duration,
    failure: Option<String>,
    creates: Arc<AtomicUsize>,
    ideas: Arc<Mutex<Vec<String>>>,
    projects: Arc<Mutex<HashMap<String, Project>>>,
}

impl FakeApi {
    fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    fn requested_ideas(&self) -> Vec<String> {
        self.ideas.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProjectsApi for FakeApi {
    async fn create_project(&self, website_idea: &str) -> Result<Project, ClientError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.ideas.lock().unwrap().push(website_idea.to_string());
        tokio::time::sleep(self.latency).await;

        if let Some(message) = &self.failure {
            return Err(ClientError::Api(message.clone()));
        }

        let mut project = Project::new(website_idea).map_err(|e| ClientError::Api(e.to_string()))?;
        project.sections = project
            .sections
            .iter()
            .map(|section| format!("{section}{SERVER_MARK}"))
            .collect();
        self.projects
            .lock()
            .unwrap()
            .insert(project.id.to_string(), project.clone());
        Ok(project)
    }

    async fn get_project(&self, id: &str) -> Result<Project, ClientError> {
        self.projects
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::Api("Project not found".to_string()))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        Ok(self.projects.lock().unwrap().values().cloned().collect())
    }
}

fn server_sections(template: SectionTemplate) -> Vec<String> {
    template
        .section_names()
        .iter()
        .map(|section| format!("{section}{SERVER_MARK}"))
        .collect()
}

fn session(api: FakeApi) -> GeneratorSession<FakeApi> {
    GeneratorSession::new(api, ClientConfig::default())
}

async fn next_view(rx: &mut watch::Receiver<ViewState>) -> ViewState {
    rx.changed().await.unwrap();
    rx.borrow_and_update().clone()
}

#[tokio::test(start_paused = true)]
async fn three_characters_trigger_nothing() {
    let session = session(FakeApi::default());

    session.on_input("bak");
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(session.api().create_calls(), 0);
    let view = session.view();
    assert_eq!(view.input, "bak");
    assert!(view.sections.is_empty());
    assert!(!view.is_generating);
}

#[tokio::test(start_paused = true)]
async fn four_characters_debounce_then_render_optimistic_and_authoritative() {
    let session = session(FakeApi::with_latency(Duration::from_millis(200)));
    let started = Instant::now();

    session.on_input("bake");
    assert!(session.view().sections.is_empty());
    let mut rx = session.subscribe();

    let optimistic = next_view(&mut rx).await;
    assert!(started.elapsed() >= Duration::from_millis(500));
    assert_eq!(optimistic.sections, SectionTemplate::Default.sections());
    assert!(optimistic.is_generating);

    let authoritative = next_view(&mut rx).await;
    assert_eq!(
        authoritative.sections,
        server_sections(SectionTemplate::Default)
    );
    assert!(!authoritative.is_generating);
    assert_eq!(authoritative.error, None);
    assert_eq!(session.api().create_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn settle_waits_for_the_debounced_lookup_to_finish() {
    let session = session(FakeApi::with_latency(Duration::from_millis(300)));
    let started = Instant::now();

    session.on_input("bakery downtown");
    session.settle().await;

    assert!(started.elapsed() >= Duration::from_millis(800));
    let view = session.view();
    assert_eq!(view.sections, server_sections(SectionTemplate::Bakery));
    assert!(!view.is_generating);
}

#[tokio::test(start_paused = true)]
async fn settle_without_pending_input_returns_at_once() {
    let session = session(FakeApi::default());
    let started = Instant::now();

    session.settle().await;
    session.on_input("bak");
    session.settle().await;

    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(session.api().create_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn rapid_typing_fires_only_the_last_lookup() {
    let session = session(FakeApi::default());

    session.on_input("bakery one");
    tokio::time::sleep(Duration::from_millis(300)).await;
    session.on_input("restaurant two");
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(session.api().requested_ideas(), vec!["restaurant two"]);
    assert_eq!(
        session.view().sections,
        server_sections(SectionTemplate::Restaurant)
    );
}

#[tokio::test(start_paused = true)]
async fn same_normalized_idea_within_window_is_served_from_cache() {
    let session = session(FakeApi::default());

    session.on_input("Corner Bakery");
    assert_eq!(session.submit().await, LookupOutcome::Generated);

    session.on_input("  corner bakery ");
    assert_eq!(session.submit().await, LookupOutcome::CacheHit);

    assert_eq!(session.api().create_calls(), 1);
    assert_eq!(
        session.view().sections,
        server_sections(SectionTemplate::Bakery)
    );
}

#[tokio::test]
async fn cache_entries_expire_after_ttl() {
    let config = ClientConfig {
        cache_ttl: Duration::from_millis(100),
        ..ClientConfig::default()
    };
    let session = GeneratorSession::new(FakeApi::default(), config);

    session.on_input("corner bakery");
    assert_eq!(session.submit().await, LookupOutcome::Generated);
    session.on_input("corner bakery");
    assert_eq!(session.submit().await, LookupOutcome::CacheHit);

    tokio::time::sleep(Duration::from_millis(250)).await;

    session.on_input("corner bakery");
    assert_eq!(session.submit().await, LookupOutcome::Generated);
    assert_eq!(session.api().create_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn newer_lookup_cancels_in_flight_one() {
    let session = session(FakeApi::with_latency(Duration::from_secs(1)));
    let mut rx = session.subscribe();

    session.on_input("bakery downtown");
    rx.borrow_and_update();
    let first_optimistic = next_view(&mut rx).await;
    assert_eq!(first_optimistic.sections, SectionTemplate::Bakery.sections());

    session.on_input("restaurant uptown");
    let fresh = server_sections(SectionTemplate::Restaurant);
    let mut seen = Vec::new();
    loop {
        let view = next_view(&mut rx).await;
        let done = view.sections == fresh;
        seen.push(view);
        if done {
            break;
        }
    }

    let stale = server_sections(SectionTemplate::Bakery);
    assert!(seen.iter().all(|view| view.sections != stale));
    assert!(!seen.last().unwrap().is_generating);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(
        session.view().sections,
        server_sections(SectionTemplate::Restaurant)
    );
    assert_eq!(session.api().create_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn new_long_input_cancels_lookup_still_in_flight() {
    let session = session(FakeApi::with_latency(Duration::from_millis(300)));

    session.on_input("bakery downtown");
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(session.view().is_generating);

    session.on_input("restaurant uptown");
    tokio::time::sleep(Duration::from_millis(300)).await;

    let view = session.view();
    assert_eq!(view.input, "restaurant uptown");
    assert_ne!(view.sections, server_sections(SectionTemplate::Bakery));
    assert!(!view.is_generating);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(
        session.view().sections,
        server_sections(SectionTemplate::Restaurant)
    );

    session.on_input("bakery downtown");
    assert_eq!(session.submit().await, LookupOutcome::Generated);
    assert_eq!(session.api().create_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn failure_shows_error_and_keeps_optimistic_sections() {
    let session = session(FakeApi::failing("Failed to create project"));

    session.on_input("my portfolio");
    let outcome = session.submit().await;

    assert_eq!(outcome, LookupOutcome::Failed);
    let view = session.view();
    assert_eq!(view.error.as_deref(), Some("Failed to create project"));
    assert_eq!(view.sections, SectionTemplate::Portfolio.sections());
    assert!(!view.is_generating);
}

#[tokio::test(start_paused = true)]
async fn failed_results_are_not_cached() {
    let session = session(FakeApi::failing("storage error: connection refused"));

    session.on_input("my portfolio");
    assert_eq!(session.submit().await, LookupOutcome::Failed);
    session.on_input("my portfolio");
    assert_eq!(session.submit().await, LookupOutcome::Failed);

    assert_eq!(session.api().create_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn shortening_input_clears_sections_and_error() {
    let session = session(FakeApi::failing("boom"));

    session.on_input("online shop");
    session.submit().await;
    assert!(session.view().error.is_some());

    session.on_input("sh");
    let view = session.view();
    assert!(view.sections.is_empty());
    assert_eq!(view.error, None);
}

#[tokio::test(start_paused = true)]
async fn shortening_input_cancels_in_flight_lookup() {
    let session = session(FakeApi::with_latency(Duration::from_secs(1)));

    session.on_input("online store");
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert!(session.view().is_generating);

    session.on_input("on");
    tokio::time::sleep(Duration::from_secs(3)).await;

    let view = session.view();
    assert!(view.sections.is_empty());
    assert!(!view.is_generating);
}

#[tokio::test(start_paused = true)]
async fn submit_clears_input_and_skips_debounce() {
    let session = session(FakeApi::default());
    let started = Instant::now();

    session.on_input("restaurant");
    let outcome = session.submit().await;

    assert_eq!(outcome, LookupOutcome::Generated);
    assert!(started.elapsed() < Duration::from_millis(500));
    let view = session.view();
    assert_eq!(view.input, "");
    assert_eq!(view.sections, server_sections(SectionTemplate::Restaurant));

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(session.api().create_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn submit_clears_input_even_on_failure() {
    let session = session(FakeApi::failing("boom"));

    session.on_input("restaurant");
    session.submit().await;

    assert_eq!(session.view().input, "");
}

#[tokio::test(start_paused = true)]
async fn blank_submit_is_rejected_without_request() {
    let session = session(FakeApi::default());

    session.on_input("   ");
    let outcome = session.submit().await;

    assert_eq!(outcome, LookupOutcome::Rejected);
    assert_eq!(session.view().error.as_deref(), Some(EMPTY_IDEA_MESSAGE));
    assert_eq!(session.api().create_calls(), 0);
}
