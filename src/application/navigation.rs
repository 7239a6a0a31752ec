use crate::application::dto::{ExploreOptions, ExploreOutcome, ExploreQuery, ExploreRequest};
use crate::application::use_cases::ExploreDependenciesUseCase;
use crate::ports::outbound::{DependencyListing, ProgressReporter, VersionResolver, VulnerabilityQuery};
use crate::risk_graph::domain::{split_package_key, Ecosystem};
use crate::shared::error::ExploreError;
use crate::shared::Result;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// A snapshot of the query that produced the current view, pushed before
/// any navigating fetch and popped on back-navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFrame {
    pub ecosystem: Ecosystem,
    pub namespace: Option<String>,
    pub name: String,
    pub version: Option<String>,
}

impl From<&ExploreQuery> for HistoryFrame {
    fn from(query: &ExploreQuery) -> Self {
        Self {
            ecosystem: query.ecosystem,
            namespace: query.namespace.clone(),
            name: query.name.clone(),
            version: query.version.clone(),
        }
    }
}

impl HistoryFrame {
    fn into_query(self) -> ExploreQuery {
        ExploreQuery {
            ecosystem: self.ecosystem,
            namespace: self.namespace,
            name: self.name,
            version: self.version,
        }
    }
}

/// Whether a fetch cycle is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
}

/// All mutable state one exploration session owns.
///
/// Form fields, history and alerts live here rather than in any
/// process-wide place; two sessions never share a context.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub query: ExploreQuery,
    pub options: ExploreOptions,
    pub history: Vec<HistoryFrame>,
    pub alerts: Vec<String>,
}

impl SessionContext {
    pub fn new(query: ExploreQuery, options: ExploreOptions) -> Self {
        Self {
            query,
            options,
            history: Vec::new(),
            alerts: Vec::new(),
        }
    }
}

/// A clonable handle that aborts whichever fetch is currently in flight.
#[derive(Clone)]
pub struct CancelHandle {
    current: Arc<Mutex<CancellationToken>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.current.lock().expect("cancel handle poisoned").cancel();
    }
}

/// NavigationController - drives exploration as a navigable history.
///
/// Wraps the fetch use case, recording query snapshots so the user can
/// pivot into any graph node and return. Only one fetch is in flight at a
/// time; starting a new one first cancels the previous token, so an
/// orphaned cycle can never write into the session after a newer one
/// started.
pub struct NavigationController<V, L, Q, P>
where
    V: VersionResolver,
    L: DependencyListing,
    Q: VulnerabilityQuery,
    P: ProgressReporter,
{
    use_case: ExploreDependenciesUseCase<V, L, Q, P>,
    session: SessionContext,
    state: SessionState,
    cancel: Arc<Mutex<CancellationToken>>,
    outcome: Option<ExploreOutcome>,
}

impl<V, L, Q, P> NavigationController<V, L, Q, P>
where
    V: VersionResolver,
    L: DependencyListing,
    Q: VulnerabilityQuery,
    P: ProgressReporter,
{
    pub fn new(use_case: ExploreDependenciesUseCase<V, L, Q, P>, session: SessionContext) -> Self {
        Self {
            use_case,
            session,
            state: SessionState::Idle,
            cancel: Arc::new(Mutex::new(CancellationToken::new())),
            outcome: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn outcome(&self) -> Option<&ExploreOutcome> {
        self.outcome.as_ref()
    }

    pub fn history_len(&self) -> usize {
        self.session.history.len()
    }

    /// Returns a handle that cancels whichever fetch is in flight when
    /// invoked. Cancelling mutates no history.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            current: self.cancel.clone(),
        }
    }

    /// Submits a fresh query, pushing the pre-submission one onto history.
    pub async fn submit(&mut self, query: ExploreQuery) -> Result<Option<&ExploreOutcome>> {
        if self.state == SessionState::Loading {
            return Ok(None);
        }
        self.session.history.push(HistoryFrame::from(&self.session.query));
        self.session.query = query;
        self.run_fetch().await
    }

    /// Re-roots the exploration at a graph node.
    ///
    /// The node id splits at the last `@` into package key and version; an
    /// id without a version part is ignored. The current query is pushed
    /// before fetching so `back` returns here.
    pub async fn pivot(&mut self, node_id: &str) -> Result<Option<&ExploreOutcome>> {
        if self.state == SessionState::Loading {
            return Ok(None);
        }
        let at = match node_id.rfind('@') {
            Some(at) if at > 0 => at,
            _ => return Ok(None),
        };
        let key = &node_id[..at];
        let version = &node_id[at + 1..];
        let (namespace, name) = split_package_key(key);

        self.session.history.push(HistoryFrame::from(&self.session.query));
        self.session.query = ExploreQuery::new(
            self.session.query.ecosystem,
            namespace.map(String::from),
            name,
        )
        .with_version(version);
        self.run_fetch().await
    }

    /// Pops the most recent history frame and re-fetches it.
    ///
    /// A no-op on empty history. The popped frame is consumed: returning
    /// to it does not push anything.
    pub async fn back(&mut self) -> Result<Option<&ExploreOutcome>> {
        if self.state == SessionState::Loading {
            return Ok(None);
        }
        let frame = match self.session.history.pop() {
            Some(frame) => frame,
            None => return Ok(None),
        };
        self.session.query = frame.into_query();
        if self.session.query.name.is_empty() {
            // Restored a blank form; nothing to fetch.
            return Ok(None);
        }
        self.run_fetch().await
    }

    async fn run_fetch(&mut self) -> Result<Option<&ExploreOutcome>> {
        let token = {
            let mut current = self.cancel.lock().expect("cancel handle poisoned");
            current.cancel();
            *current = CancellationToken::new();
            current.clone()
        };

        self.state = SessionState::Loading;
        let request = ExploreRequest::new(self.session.query.clone(), self.session.options);
        let result = self.use_case.execute(&request, &token).await;
        self.state = SessionState::Idle;

        match result {
            Ok(outcome) => {
                self.session.alerts.extend(outcome.warnings.iter().cloned());
                self.outcome = Some(outcome);
                Ok(self.outcome.as_ref())
            }
            Err(err) => {
                if err
                    .downcast_ref::<ExploreError>()
                    .map(ExploreError::is_cancelled)
                    .unwrap_or(false)
                {
                    // Silent: back to idle, prior results untouched.
                    return Ok(None);
                }
                // Fatal: report upward, keep whatever was displayed before.
                Err(err)
            }
        }
    }
}
