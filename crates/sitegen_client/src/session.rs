//! Generator session: the state behind the idea form.
//!
//! # Responsibility
//! - Turn keystrokes into at most one lookup per quiet period.
//! - Serve fresh cached results without touching the network.
//! - Render the rule-table guess immediately, then the server's answer.
//! - Publish every view change through a watch channel.
//!
//! # Invariants
//! - Single flight: new input or a new lookup cancels the in-flight one.
//!   Only the lookup holding the current sequence number may update the
//!   view, and that check happens under the same lock as the update.
//! - Cancellation is silent. Failures keep the optimistic sections visible.
//! - Only server-confirmed sections are cached.

use crate::api::ProjectsApi;
use crate::cache::SectionCache;
use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::error::ClientError;
use log::{debug, info, warn};
use sitegen_core::{derive_sections, normalize_idea};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

pub const EMPTY_IDEA_MESSAGE: &str = "Please enter a website idea";

/// Everything a front-end needs to render the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Current text in the input field.
    pub input: String,
    /// Sections on screen: optimistic guess or server result.
    pub sections: Vec<String>,
    pub error: Option<String>,
    /// A network lookup for the shown idea is in flight.
    pub is_generating: bool,
}

/// How a lookup ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Served from the local cache; no network call.
    CacheHit,
    /// Server result rendered and cached.
    Generated,
    /// A newer lookup took over; nothing was rendered.
    Superseded,
    /// The error is on screen next to the optimistic sections.
    Failed,
    /// Blank input on manual submit; nothing was requested.
    Rejected,
}

#[derive(Debug, Default)]
struct Flight {
    seq: u64,
    token: Option<CancellationToken>,
}

impl Flight {
    /// Cancels the in-flight lookup and invalidates its sequence number.
    fn supersede(&mut self) -> u64 {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
        self.seq += 1;
        self.seq
    }

    fn begin(&mut self) -> (u64, CancellationToken) {
        let seq = self.supersede();
        let token = CancellationToken::new();
        self.token = Some(token.clone());
        (seq, token)
    }
}

struct SessionInner<A> {
    api: A,
    config: ClientConfig,
    view: watch::Sender<ViewState>,
    flight: Mutex<Flight>,
    cache: SectionCache,
    debouncer: Mutex<Debouncer>,
}

/// Debounced, cached, single-flight front-end over a `ProjectsApi`.
pub struct GeneratorSession<A> {
    inner: Arc<SessionInner<A>>,
}

impl<A> Clone for GeneratorSession<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: ProjectsApi + 'static> GeneratorSession<A> {
    pub fn new(api: A, config: ClientConfig) -> Self {
        let (view, _) = watch::channel(ViewState::default());
        let cache = SectionCache::new(config.cache_ttl, config.cache_capacity);
        let debouncer = Debouncer::new(config.debounce_delay);
        Self {
            inner: Arc::new(SessionInner {
                api,
                config,
                view,
                flight: Mutex::new(Flight::default()),
                cache,
                debouncer: Mutex::new(debouncer),
            }),
        }
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> ViewState {
        self.inner.view.borrow().clone()
    }

    /// Receiver notified on every view change after this call.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.inner.view.subscribe()
    }

    /// Handles one input change.
    ///
    /// Any change cancels the in-flight lookup. Short input also clears the
    /// view and the pending timer; anything longer restarts the debounce
    /// timer. Must be called from within a tokio runtime.
    pub fn on_input(&self, text: impl Into<String>) {
        let text = text.into();
        let idea = text.trim().to_string();
        let short = idea.chars().count() < self.inner.config.min_idea_chars;

        {
            let mut flight = lock(&self.inner.flight);
            flight.supersede();
            self.inner.view.send_modify(|view| {
                view.input = text;
                view.is_generating = false;
                if short {
                    view.sections.clear();
                    view.error = None;
                }
            });
        }

        if short {
            lock(&self.inner.debouncer).cancel();
            return;
        }

        let inner = Arc::clone(&self.inner);
        lock(&self.inner.debouncer).schedule(async move {
            let outcome = lookup(inner, idea).await;
            debug!("event=debounced_lookup module=session status=done outcome={outcome:?}");
        });
    }

    /// Waits until the last debounced lookup has fired and finished, or was
    /// cancelled. Returns at once when nothing was scheduled.
    pub async fn settle(&self) {
        let last = lock(&self.inner.debouncer).take_last();
        if let Some(handle) = last {
            if let Err(err) = handle.await {
                warn!("event=settle module=session status=error error={err}");
            }
        }
    }

    /// Manual submit: skips the debounce, runs the lookup and clears the
    /// input field once it completes, whatever the outcome.
    pub async fn submit(&self) -> LookupOutcome {
        lock(&self.inner.debouncer).cancel();
        let idea = self.inner.view.borrow().input.trim().to_string();

        if idea.is_empty() {
            self.inner
                .view
                .send_modify(|view| view.error = Some(EMPTY_IDEA_MESSAGE.to_string()));
            return LookupOutcome::Rejected;
        }

        let outcome = lookup(Arc::clone(&self.inner), idea).await;
        self.inner.view.send_modify(|view| view.input.clear());
        outcome
    }
}

async fn lookup<A: ProjectsApi>(inner: Arc<SessionInner<A>>, idea: String) -> LookupOutcome {
    let key = normalize_idea(&idea);

    if let Some(sections) = inner.cache.get(&key) {
        let mut flight = lock(&inner.flight);
        flight.supersede();
        inner.view.send_modify(|view| {
            view.sections = sections;
            view.error = None;
            view.is_generating = false;
        });
        debug!("event=lookup module=session status=cache_hit");
        return LookupOutcome::CacheHit;
    }

    let (seq, token) = {
        let mut flight = lock(&inner.flight);
        let started = flight.begin();
        let optimistic = derive_sections(&idea);
        inner.view.send_modify(|view| {
            view.sections = optimistic;
            view.error = None;
            view.is_generating = true;
        });
        started
    };

    let result = tokio::select! {
        _ = token.cancelled() => Err(ClientError::Aborted),
        result = fetch_sections(&inner.api, &idea) => result,
    };

    let mut flight = lock(&inner.flight);
    if flight.seq != seq {
        debug!("event=lookup module=session status=superseded seq={seq}");
        return LookupOutcome::Superseded;
    }
    flight.token = None;

    match result {
        Ok(sections) => {
            inner.cache.insert(key, sections.clone());
            inner.view.send_modify(|view| {
                view.sections = sections;
                view.is_generating = false;
            });
            info!("event=lookup module=session status=ok seq={seq}");
            LookupOutcome::Generated
        }
        Err(err) if err.is_aborted() => LookupOutcome::Superseded,
        Err(err) => {
            warn!("event=lookup module=session status=error seq={seq} error={err}");
            inner.view.send_modify(|view| {
                view.error = Some(err.to_string());
                view.is_generating = false;
            });
            LookupOutcome::Failed
        }
    }
}

async fn fetch_sections<A: ProjectsApi>(api: &A, idea: &str) -> Result<Vec<String>, ClientError> {
    let created = api.create_project(idea).await?;
    let fetched = api.get_project(&created.id.to_string()).await?;
    Ok(fetched.sections)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
