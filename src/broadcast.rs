//! Best-effort fan-out of text messages.
//!
//! Every listener owns a bounded queue. [`Hub::broadcast`] never waits:
//! a message is dropped for a listener whose queue is full, other listeners
//! still receive it.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::mpsc::error::TrySendError;

/// 32
pub const DEFAULT_QUEUE_LEN: usize = 32;

/// Listener registry.
#[derive(Debug)]
pub struct Hub {
    queue_len: usize,
    next_id: AtomicU64,
    listeners: Mutex<HashMap<u64, Sender<Vec<u8>>>>,
}

/// Receiving side of a subscription.
#[derive(Debug)]
pub struct Listener {
    id: u64,
    rx: Receiver<Vec<u8>>,
}

impl Listener {
    #[inline]
    pub const fn id(&self) -> u64 { self.id }

    /// Wait for the next message.
    /// Returns `None` once the listener is unsubscribed and drained.
    #[inline]
    pub async fn recv(&mut self) -> Option<Vec<u8>> { self.rx.recv().await }

    /// Take a queued message without waiting.
    #[inline]
    pub fn try_recv(&mut self) -> Option<Vec<u8>> { self.rx.try_recv().ok() }
}

impl Default for Hub {
    fn default() -> Self { Self::new(DEFAULT_QUEUE_LEN) }
}

impl Hub {
    /// Create a registry, each listener could queue up to `queue_len` messages.
    pub fn new(queue_len: usize) -> Self {
        Hub {
            queue_len: queue_len.max(1),
            next_id: AtomicU64::new(0),
            listeners: Mutex::new(HashMap::new()),
        }
    }

    // the lock is never held across an await point,
    // a panic while holding it leaves the map consistent
    #[inline]
    fn lock(&self) -> MutexGuard<'_, HashMap<u64, Sender<Vec<u8>>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(&self) -> Listener {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(self.queue_len);
        self.lock().insert(id, tx);
        debug!("listener {} subscribed", id);
        Listener { id, rx }
    }

    /// Remove a listener, its pending messages could still be received.
    pub fn unsubscribe(&self, id: u64) -> bool {
        let removed = self.lock().remove(&id).is_some();
        if removed {
            debug!("listener {} unsubscribed", id);
        }
        removed
    }

    #[inline]
    pub fn len(&self) -> usize { self.lock().len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.lock().is_empty() }

    /// Queue a message for every listener without waiting,
    /// returns how many listeners accepted it.
    ///
    /// Listeners whose receiving side is gone are removed.
    pub fn broadcast(&self, msg: &[u8]) -> usize {
        let mut delivered = 0;
        let mut listeners = self.lock();

        listeners.retain(|id, tx| match tx.try_send(msg.to_vec()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(TrySendError::Full(_)) => {
                debug!("listener {} is full, message dropped", id);
                true
            }
            Err(TrySendError::Closed(_)) => {
                debug!("listener {} is gone", id);
                false
            }
        });

        delivered
    }
}
