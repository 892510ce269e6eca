//! "Accounts updated" notification
//!
//! Mutations publish on an [`AccountsSignal`]; every component that caches
//! accounts holds its own [`AccountsUpdates`] receiver and refetches when it
//! sees a new generation. Observers never reset shared state, so the list and
//! the transfer form can refresh in any order.

use std::sync::Arc;
use tokio::sync::watch;

/// Publisher side of the notification
#[derive(Debug, Clone)]
pub struct AccountsSignal {
    sender: Arc<watch::Sender<u64>>,
}

impl Default for AccountsSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountsSignal {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Announce that the remote account collection changed
    pub fn notify(&self) {
        self.sender.send_modify(|generation| *generation += 1);
        log::debug!("accounts updated, generation {}", *self.sender.borrow());
    }

    /// Current generation, incremented by every [`notify`](Self::notify)
    pub fn generation(&self) -> u64 {
        *self.sender.borrow()
    }

    /// Register a new observer. It starts out having seen the current generation.
    pub fn subscribe(&self) -> AccountsUpdates {
        AccountsUpdates {
            receiver: self.sender.subscribe(),
        }
    }
}

/// Observer side of the notification, one per component
#[derive(Debug)]
pub struct AccountsUpdates {
    receiver: watch::Receiver<u64>,
}

impl AccountsUpdates {
    /// Whether a notification arrived since the last call, marking it seen
    pub fn take_changed(&mut self) -> bool {
        match self.receiver.has_changed() {
            Ok(true) => {
                self.receiver.borrow_and_update();
                true
            }
            _ => false,
        }
    }
}
