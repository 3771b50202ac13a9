//! # System Lifecycle & Orchestration
//!
//! Wires the pieces together: one store actor as the shared authority, any
//! number of boards (one per screen), and the role clients on top.
//!
//! ## The KitchenSystem pattern
//!
//! 1. **Create** the store actor and spawn its run loop.
//! 2. **Open boards** on demand; each `open_board` call is an independent
//!    subscription with its own detector state, exactly like a device
//!    mounting the kitchen display screen.
//! 3. **Shutdown** by dropping clients: the store's channel closes, the run
//!    loop drains and exits, and `shutdown` awaits it. Boards are torn down
//!    individually via their handles before that.
//!
//! Clients are clones of channel senders, so any clone kept alive elsewhere
//! keeps the store running; drop role clients and boards before calling
//! [`KitchenSystem::shutdown`].

use crate::clients::{AdminClient, CashierClient, KitchenClient};
use crate::store::{OrderStore, StoreClient};
use orderboard_core::board::BoardHandle;
use orderboard_core::error::BoardError;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initializes structured logging for the whole process. Call once;
/// `RUST_LOG` controls verbosity.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// The running system: a store actor plus factories for boards and clients.
pub struct KitchenSystem {
    store: StoreClient,
    store_task: tokio::task::JoinHandle<()>,
}

impl KitchenSystem {
    /// Spawns the store actor and returns the wired system.
    pub fn new() -> Self {
        let (store, client) = OrderStore::new(64);
        let store_task = tokio::spawn(store.run());
        info!("kitchen system started");
        Self {
            store: client,
            store_task,
        }
    }

    /// A POS client for the counter.
    pub fn cashier(&self) -> CashierClient {
        CashierClient::new(self.store.clone())
    }

    /// A back-office client.
    pub fn admin(&self) -> AdminClient {
        AdminClient::new(self.store.clone())
    }

    /// Subscribes a fresh board, one per screen instance. Call again after
    /// tearing a board down to perform a refresh (cold start).
    pub async fn open_board(&self) -> Result<BoardHandle, BoardError> {
        BoardHandle::subscribe(&self.store).await
    }

    /// A display client bound to one board.
    pub fn kitchen(&self, board: &BoardHandle) -> KitchenClient {
        KitchenClient::new(board.client(), self.store.clone())
    }

    /// Drops the system's own store client and waits for the store actor to
    /// drain and exit.
    pub async fn shutdown(self) {
        drop(self.store);
        let _ = self.store_task.await;
        info!("kitchen system shut down");
    }
}

impl Default for KitchenSystem {
    fn default() -> Self {
        Self::new()
    }
}
