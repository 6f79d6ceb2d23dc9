use std::fmt::{self, Debug};
use std::ops::ControlFlow;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::domain::Page;
use crate::error::StoreError;

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any record must implement to be managed by a [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Draft: Send + Debug;
    type Patch: Send + Debug;
    type Query: Send + Debug;

    /// The store-assigned identifier.
    fn id(&self) -> &str;

    /// Construct the full record from a fresh id and the caller's draft.
    fn from_draft(id: String, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Merge a patch over the record and refresh its mutation timestamp.
    fn on_update(&mut self, patch: Self::Patch, now: DateTime<Utc>);

    /// Filter predicate used by [`ResourceClient::find`].
    fn matches(&self, query: &Self::Query) -> bool;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    List {
        page: u32,
        limit: u32,
        respond_to: Response<Page<T>>,
    },
    Get {
        id: String,
        respond_to: Response<T>,
    },
    Find {
        query: T::Query,
        respond_to: Response<Vec<T>>,
    },
    Create {
        draft: T::Draft,
        respond_to: Response<T>,
    },
    Update {
        id: String,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: String,
        respond_to: Response<()>,
    },
    SetFaultMode {
        mode: FaultMode,
        respond_to: Response<FaultMode>,
    },
    Shutdown,
    #[cfg(test)]
    Count {
        respond_to: Response<usize>,
    },
}

/// Send the error and move on to the next request.
macro_rules! send_error {
    ($respond_to:expr, $error:expr) => {{
        let _ = $respond_to.send(Err($error));
        return ControlFlow::Continue(());
    }};
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// When the actor should fail a request on purpose.
///
/// Injected failures happen before the request touches the collection, so a
/// failed mutation never leaves partial state behind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FaultMode {
    #[default]
    Off,
    Always,
    /// Fail every n-th request, counting from when the mode was set.
    EveryNth(u32),
}

impl FaultMode {
    /// Whether request number `seen` (1-based) should fail.
    pub fn should_fail(&self, seen: u64) -> bool {
        match self {
            FaultMode::Off => false,
            FaultMode::Always => true,
            FaultMode::EveryNth(0) => false,
            FaultMode::EveryNth(n) => seen % u64::from(*n) == 0,
        }
    }
}

impl fmt::Display for FaultMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultMode::Off => f.write_str("off"),
            FaultMode::Always => f.write_str("always"),
            FaultMode::EveryNth(n) => write!(f, "every:{n}"),
        }
    }
}

pub type IdGenerator = Box<dyn Fn() -> String + Send + Sync>;
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Owns an ordered collection of records and serves requests for it one at a
/// time, in arrival order.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    items: Vec<T>,
    next_id_fn: IdGenerator,
    clock: Clock,
    latency: Duration,
    fault_mode: FaultMode,
    requests_seen: u64,
}

impl<T: Entity> ResourceActor<T> {
    /// A fresh actor with no latency and faults off, plus its client.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> String + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self {
            receiver,
            items: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
            clock: Box::new(Utc::now),
            latency: Duration::ZERO,
            fault_mode: FaultMode::Off,
            requests_seen: 0,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Delay applied before every request is served.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_fault_mode(mut self, fault_mode: FaultMode) -> Self {
        self.fault_mode = fault_mode;
        self
    }

    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Load records before the actor starts serving. No latency, no faults.
    pub fn seed(mut self, drafts: impl IntoIterator<Item = T::Draft>) -> Self {
        for draft in drafts {
            let item = self.build(draft);
            self.items.push(item);
        }
        self
    }

    #[instrument(name = "resource_actor", skip(self))]
    pub async fn run(mut self) {
        info!(seeded = self.items.len(), "Store starting");

        while let Some(msg) = self.receiver.recv().await {
            let is_shutdown = matches!(msg, ResourceRequest::Shutdown);
            if !is_shutdown && !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            if self.dispatch(msg).is_break() {
                break;
            }
        }

        info!(remaining = self.items.len(), "Store stopped");
    }

    fn dispatch(&mut self, msg: ResourceRequest<T>) -> ControlFlow<()> {
        match msg {
            ResourceRequest::List { page, limit, respond_to } => {
                if let Some(e) = self.injected_fault() {
                    send_error!(respond_to, e);
                }
                self.handle_list(page, limit, respond_to);
            }
            ResourceRequest::Get { id, respond_to } => {
                if let Some(e) = self.injected_fault() {
                    send_error!(respond_to, e);
                }
                self.handle_get(id, respond_to);
            }
            ResourceRequest::Find { query, respond_to } => {
                if let Some(e) = self.injected_fault() {
                    send_error!(respond_to, e);
                }
                self.handle_find(query, respond_to);
            }
            ResourceRequest::Create { draft, respond_to } => {
                if let Some(e) = self.injected_fault() {
                    send_error!(respond_to, e);
                }
                self.handle_create(draft, respond_to);
            }
            ResourceRequest::Update { id, patch, respond_to } => {
                if let Some(e) = self.injected_fault() {
                    send_error!(respond_to, e);
                }
                self.handle_update(id, patch, respond_to);
            }
            ResourceRequest::Delete { id, respond_to } => {
                if let Some(e) = self.injected_fault() {
                    send_error!(respond_to, e);
                }
                self.handle_delete(id, respond_to);
            }
            ResourceRequest::SetFaultMode { mode, respond_to } => {
                info!(fault_mode = %mode, "Fault mode changed");
                self.fault_mode = mode;
                self.requests_seen = 0;
                let _ = respond_to.send(Ok(mode));
            }
            ResourceRequest::Shutdown => {
                info!("Store shutting down");
                return ControlFlow::Break(());
            }
            #[cfg(test)]
            ResourceRequest::Count { respond_to } => {
                let _ = respond_to.send(Ok(self.items.len()));
            }
        }
        ControlFlow::Continue(())
    }

    fn injected_fault(&mut self) -> Option<StoreError> {
        if self.fault_mode == FaultMode::Off {
            return None;
        }
        self.requests_seen += 1;
        if self.fault_mode.should_fail(self.requests_seen) {
            warn!(fault_mode = %self.fault_mode, request = self.requests_seen, "Injecting failure");
            Some(StoreError::Unavailable("injected fault".to_string()))
        } else {
            None
        }
    }

    fn build(&self, draft: T::Draft) -> T {
        let id = loop {
            let candidate = (self.next_id_fn)();
            if !self.items.iter().any(|item| item.id() == candidate) {
                break candidate;
            }
            debug!(id = %candidate, "Generated id already taken, retrying");
        };
        T::from_draft(id, draft, (self.clock)())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list(&self, page: u32, limit: u32, respond_to: Response<Page<T>>) {
        debug!("Processing list request");
        let page = Page::slice(&self.items, page, limit);
        info!(count = page.data.len(), total = page.total, "Listed page");
        let _ = respond_to.send(Ok(page));
    }

    #[instrument(fields(item_id = %id), skip(self, respond_to))]
    fn handle_get(&self, id: String, respond_to: Response<T>) {
        debug!("Processing get request");
        match self.items.iter().find(|item| item.id() == id) {
            Some(item) => {
                debug!("Item found");
                let _ = respond_to.send(Ok(item.clone()));
            }
            None => {
                debug!("Item not found");
                let _ = respond_to.send(Err(StoreError::NotFound(id)));
            }
        }
    }

    #[instrument(skip(self, respond_to))]
    fn handle_find(&self, query: T::Query, respond_to: Response<Vec<T>>) {
        debug!("Processing find request");
        let found: Vec<T> = self
            .items
            .iter()
            .filter(|item| item.matches(&query))
            .cloned()
            .collect();
        info!(count = found.len(), "Find complete");
        let _ = respond_to.send(Ok(found));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_create(&mut self, draft: T::Draft, respond_to: Response<T>) {
        debug!("Processing create request");
        let item = self.build(draft);
        info!(item_id = %item.id(), "Item created");
        self.items.push(item.clone());
        let _ = respond_to.send(Ok(item));
    }

    #[instrument(fields(item_id = %id), skip(self, respond_to))]
    fn handle_update(&mut self, id: String, patch: T::Patch, respond_to: Response<T>) {
        debug!("Processing update request");
        let now = (self.clock)();
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.on_update(patch, now);
                info!("Item updated");
                let _ = respond_to.send(Ok(item.clone()));
            }
            None => {
                warn!("Item not found for update");
                let _ = respond_to.send(Err(StoreError::NotFound(id)));
            }
        }
    }

    #[instrument(fields(item_id = %id), skip(self, respond_to))]
    fn handle_delete(&mut self, id: String, respond_to: Response<()>) {
        debug!("Processing delete request");
        match self.position(&id) {
            Some(index) => {
                self.items.remove(index);
                info!(remaining = self.items.len(), "Item deleted");
                let _ = respond_to.send(Ok(()));
            }
            None => {
                warn!("Item not found for delete");
                let _ = respond_to.send(Err(StoreError::NotFound(id)));
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Debug)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Actor dropped".to_string()))?
    }

    pub async fn list(&self, page: u32, limit: u32) -> Result<Page<T>, StoreError> {
        self.request(|respond_to| ResourceRequest::List { page, limit, respond_to })
            .await
    }

    pub async fn get(&self, id: String) -> Result<T, StoreError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn find(&self, query: T::Query) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| ResourceRequest::Find { query, respond_to })
            .await
    }

    pub async fn create(&self, draft: T::Draft) -> Result<T, StoreError> {
        self.request(|respond_to| ResourceRequest::Create { draft, respond_to })
            .await
    }

    pub async fn update(&self, id: String, patch: T::Patch) -> Result<T, StoreError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn delete(&self, id: String) -> Result<(), StoreError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn set_fault_mode(&self, mode: FaultMode) -> Result<FaultMode, StoreError> {
        self.request(|respond_to| ResourceRequest::SetFaultMode { mode, respond_to })
            .await
    }

    /// Ask the actor to stop. Requests already queued behind this one are dropped.
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Actor closed".to_string()))
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<usize, StoreError> {
        self.request(|respond_to| ResourceRequest::Count { respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
