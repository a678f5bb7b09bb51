use std::fmt::Debug;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

// =============================================================================
// 1. THE ABSTRACTION (Reducer with State and Action)
// =============================================================================

/// Trait that any slice of application state must implement to be managed by StoreActor
pub trait Reducer: Debug + Send + Sync + 'static {
    type State: Clone + Default + Debug + Send + Sync + 'static;
    type Action: Send + Sync + Debug + 'static;

    /// Apply a single action to the state. Reducers cannot fail.
    fn reduce(state: &mut Self::State, action: Self::Action);
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<T>;

#[derive(Debug)]
pub enum StoreRequest<R: Reducer> {
    Dispatch {
        action: R::Action,
        respond_to: Response<()>,
    },
    Snapshot {
        respond_to: Response<R::State>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns the state and applies actions in arrival order.
///
/// Every applied action publishes a fresh snapshot on the watch channel,
/// so subscribers never observe a half-applied transition.
pub struct StoreActor<R: Reducer> {
    receiver: mpsc::Receiver<StoreRequest<R>>,
    state: R::State,
    publisher: watch::Sender<R::State>,
}

impl<R: Reducer> StoreActor<R> {
    pub fn new(buffer_size: usize) -> (Self, StoreClient<R>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let state = R::State::default();
        let (publisher, watcher) = watch::channel(state.clone());
        let actor = Self {
            receiver,
            state,
            publisher,
        };
        let client = StoreClient { sender, watcher };
        (actor, client)
    }

    pub async fn run(mut self) {
        info!("StoreActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Dispatch { action, respond_to } => {
                    debug!(?action, "Applying action");
                    R::reduce(&mut self.state, action);
                    // send_replace keeps publishing even with zero subscribers
                    self.publisher.send_replace(self.state.clone());
                    let _ = respond_to.send(());
                }
                StoreRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(self.state.clone());
                }
            }
        }
        info!("StoreActor stopped");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct StoreClient<R: Reducer> {
    sender: mpsc::Sender<StoreRequest<R>>,
    watcher: watch::Receiver<R::State>,
}

// Manual impl: derive would demand `R: Clone` on the marker type.
impl<R: Reducer> Clone for StoreClient<R> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            watcher: self.watcher.clone(),
        }
    }
}

impl<R: Reducer> StoreClient<R> {
    /// Sends an action and waits until the actor has applied it.
    pub async fn dispatch(&self, action: R::Action) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Dispatch { action, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    pub async fn snapshot(&self) -> Result<R::State, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    /// Receiver that yields every state published after an applied action.
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.watcher.clone()
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
