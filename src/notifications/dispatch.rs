//! Ordered hand-off from OS threads to the host callback.
//!
//! OS event handlers run on threads owned by the notification service. They
//! post into an [`EventMailbox`], which never blocks. A single [`Dispatcher`]
//! drains the mailbox on the host's runtime and invokes the one callback that
//! was fixed when the pair was created, in post order.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;

use super::event::NotificationEvent;

/// The host-side receiver of notification events.
pub trait NotificationCallback: Send + 'static {
    fn call(&self, event: &NotificationEvent);
}

impl<F> NotificationCallback for F
where
    F: Fn(&NotificationEvent) + Send + 'static,
{
    fn call(&self, event: &NotificationEvent) {
        self(event)
    }
}

/// Sending half. Cheap to clone; all clones share one queue.
#[derive(Clone)]
pub struct EventMailbox {
    tx: Arc<RwLock<Option<mpsc::UnboundedSender<NotificationEvent>>>>,
}

impl EventMailbox {
    /// Queue an event. Returns `false` if the mailbox was closed.
    pub fn post(&self, event: NotificationEvent) -> bool {
        match self.tx.read().as_ref() {
            Some(tx) => match tx.send(event) {
                Ok(()) => true,
                Err(e) => {
                    tracing::debug!("Dispatcher is gone, dropping '{}' event", e.0.event);
                    false
                }
            },
            None => {
                tracing::debug!("Mailbox closed, dropping '{}' event", event.event);
                false
            }
        }
    }

    /// Stop accepting events. The dispatcher finishes the queued ones and exits.
    pub fn close(&self) {
        if self.tx.write().take().is_some() {
            tracing::debug!("Notification mailbox closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.read().is_none()
    }
}

/// Receiving half; owns the callback.
pub struct Dispatcher {
    rx: mpsc::UnboundedReceiver<NotificationEvent>,
    callback: Box<dyn NotificationCallback>,
}

impl Dispatcher {
    pub fn new(callback: impl NotificationCallback) -> (EventMailbox, Dispatcher) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mailbox = EventMailbox {
            tx: Arc::new(RwLock::new(Some(tx))),
        };
        let dispatcher = Dispatcher {
            rx,
            callback: Box::new(callback),
        };
        (mailbox, dispatcher)
    }

    /// Deliver events until the mailbox is closed and drained.
    pub async fn run(mut self) {
        let mut delivered = 0usize;
        while let Some(event) = self.rx.recv().await {
            tracing::debug!("Dispatching '{}' for notification {}", event.event, event.id);
            self.callback.call(&event);
            delivered += 1;
        }
        tracing::debug!("Notification dispatcher stopped after {} event(s)", delivered);
    }
}
