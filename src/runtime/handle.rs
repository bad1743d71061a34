use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, broadcast, mpsc, oneshot};
use tracing::{info, warn};

use crate::{
    core::store::{EntryStore, StoreError, StoreResult, UpsertOutcome},
    entry::{DiaryEntry, EntryDraft},
    types::{EntryDate, EntryId},
};

use super::{config::RuntimeConfig, events::EntryEvent};

/// Failures seen by [`DiaryHandle`] callers.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The store rejected or failed the request.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The runtime loop has stopped.
    #[error("entry store runtime is not running")]
    ChannelClosed,
    /// The blocking worker panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(String),
}

/// Cloneable async front end of the runtime loop.
#[derive(Clone)]
pub struct DiaryHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<EntryEvent>,
}

type Reply<T> = oneshot::Sender<Result<T, RuntimeError>>;

enum Command {
    GetByDate {
        date: EntryDate,
        resp: Reply<Option<DiaryEntry>>,
    },
    GetByDateRange {
        start: EntryDate,
        end: EntryDate,
        resp: Reply<Vec<DiaryEntry>>,
    },
    GetByMonth {
        year: i32,
        month: u32,
        resp: Reply<Vec<DiaryEntry>>,
    },
    GetByYear {
        year: i32,
        resp: Reply<Vec<DiaryEntry>>,
    },
    GetAll {
        resp: Reply<Vec<DiaryEntry>>,
    },
    Upsert {
        draft: EntryDraft,
        resp: Reply<EntryId>,
    },
    Delete {
        id: EntryId,
        resp: Reply<()>,
    },
    Shutdown {
        resp: Reply<()>,
    },
}

/// Starts the command loop that owns `store`.
///
/// Commands run one at a time in arrival order, so the store never sees
/// two writers. Must be called inside a tokio runtime.
pub fn spawn_diary(store: EntryStore, config: RuntimeConfig) -> DiaryHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<EntryEvent>(config.event_capacity.max(1));

    let events_tx_loop = events_tx.clone();
    let store = Arc::new(Mutex::new(store));

    info!(db_path = ?config.db_path, "entry store runtime started");
    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &store, &events_tx_loop).await {
                break;
            }
        }
        info!("entry store runtime stopped");
    });

    DiaryHandle { cmd_tx, events_tx }
}

impl DiaryHandle {
    /// Receiver for events from writes made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<EntryEvent> {
        self.events_tx.subscribe()
    }

    /// Entry for `date`, or `None` when nothing was saved that day.
    pub async fn get_by_date(&self, date: EntryDate) -> Result<Option<DiaryEntry>, RuntimeError> {
        self.request(|resp| Command::GetByDate { date, resp }).await
    }

    /// Entries in `[start, end]` ordered by date; empty when `start > end`.
    pub async fn get_by_date_range(
        &self,
        start: EntryDate,
        end: EntryDate,
    ) -> Result<Vec<DiaryEntry>, RuntimeError> {
        self.request(|resp| Command::GetByDateRange { start, end, resp })
            .await
    }

    /// Entries in one calendar month.
    pub async fn get_by_month(&self, year: i32, month: u32) -> Result<Vec<DiaryEntry>, RuntimeError> {
        self.request(|resp| Command::GetByMonth { year, month, resp })
            .await
    }

    /// Entries in one calendar year.
    pub async fn get_by_year(&self, year: i32) -> Result<Vec<DiaryEntry>, RuntimeError> {
        self.request(|resp| Command::GetByYear { year, resp }).await
    }

    /// Every entry ordered by date.
    pub async fn get_all(&self) -> Result<Vec<DiaryEntry>, RuntimeError> {
        self.request(|resp| Command::GetAll { resp }).await
    }

    /// Creates or overwrites the entry for `draft.date` and returns its id.
    pub async fn upsert(&self, draft: EntryDraft) -> Result<EntryId, RuntimeError> {
        self.request(|resp| Command::Upsert { draft, resp }).await
    }

    /// Removes an entry. Unknown ids succeed without effect.
    pub async fn delete_by_id(&self, id: EntryId) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Delete { id, resp }).await
    }

    /// Flushes the table and stops the loop.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Shutdown { resp }).await
    }

    async fn request<T>(&self, make: impl FnOnce(Reply<T>) -> Command) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }
}

async fn handle_command(
    cmd: Command,
    store: &Arc<Mutex<EntryStore>>,
    events_tx: &broadcast::Sender<EntryEvent>,
) -> bool {
    match cmd {
        Command::GetByDate { date, resp } => {
            let _ = resp.send(run_blocking(store, move |s| s.get_by_date(date)).await);
        }
        Command::GetByDateRange { start, end, resp } => {
            let _ = resp.send(run_blocking(store, move |s| s.get_by_date_range(start, end)).await);
        }
        Command::GetByMonth { year, month, resp } => {
            let _ = resp.send(run_blocking(store, move |s| s.get_by_month(year, month)).await);
        }
        Command::GetByYear { year, resp } => {
            let _ = resp.send(run_blocking(store, move |s| s.get_by_year(year)).await);
        }
        Command::GetAll { resp } => {
            let _ = resp.send(run_blocking(store, |s| s.get_all()).await);
        }
        Command::Upsert { draft, resp } => {
            let date = draft.date;
            let res = run_blocking(store, move |s| s.upsert_outcome(&draft)).await;
            let out = res.map(|outcome| {
                let event = match outcome {
                    UpsertOutcome::Inserted(id) => EntryEvent::Created { id, date },
                    UpsertOutcome::Updated(id) => EntryEvent::Updated { id, date },
                };
                let _ = events_tx.send(event);
                outcome.id()
            });
            if let Err(err) = &out {
                warn!(%date, error = %err, "entry save failed");
            }
            let _ = resp.send(out);
        }
        Command::Delete { id, resp } => {
            let res = run_blocking(store, move |s| s.delete_by_id(id)).await;
            let out = res.map(|removed| {
                if removed {
                    let _ = events_tx.send(EntryEvent::Deleted { id });
                }
            });
            if let Err(err) = &out {
                warn!(id, error = %err, "entry delete failed");
            }
            let _ = resp.send(out);
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(run_blocking(store, |s| s.flush()).await);
            return true;
        }
    }

    false
}

async fn run_blocking<T, F>(store: &Arc<Mutex<EntryStore>>, f: F) -> Result<T, RuntimeError>
where
    T: Send + 'static,
    F: FnOnce(&mut EntryStore) -> StoreResult<T> + Send + 'static,
{
    let store_ref = Arc::clone(store);
    tokio::task::spawn_blocking(move || {
        let mut store = store_ref.blocking_lock();
        f(&mut store)
    })
    .await
    .map_err(|e| RuntimeError::Join(e.to_string()))?
    .map_err(RuntimeError::from)
}
