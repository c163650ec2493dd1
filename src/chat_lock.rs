//! Per-chat serialization of event handling.
//!
//! Handlers for different chats run concurrently. When strict per-chat
//! ordering is wanted, handling for one chat id goes through a [`ChatLock`].
//!
//! A place in line is taken with [`ChatLock::reserve`], which does not await:
//! the transport reserves while it still sees events in arrival order, then
//! hands the [`ChatTicket`] to the spawned task. Tickets of one chat are served
//! strictly in reservation order, whatever order the tasks get scheduled in.
//! The entry of a chat is dropped as soon as no ticket is outstanding.

use std::{
    collections::{BTreeSet, HashMap},
    sync::{Arc, Mutex, PoisonError},
};

use log::debug;
use tokio::sync::watch;

/// Keyed ticket lock, one line per chat id.
#[derive(Default)]
pub struct ChatLock {
    /// Line of every chat with outstanding tickets
    slots: Mutex<HashMap<i64, Slot>>,
}

/// Waiting line of one chat.
struct Slot {
    /// Number of the ticket currently served
    serving: watch::Sender<u64>,
    /// Number handed to the next reservation
    next_ticket: u64,
    /// Tickets dropped before their turn, skipped when reached
    abandoned: BTreeSet<u64>,
}

/// A reserved place in the line of one chat.
///
/// Dropping a ticket, served or not, gives the turn to the next one.
pub struct ChatTicket {
    chat_id: i64,
    number: u64,
    serving: watch::Receiver<u64>,
    owner: Arc<ChatLock>,
}

/// Exclusive access to one chat, released on drop.
pub struct ChatGuard {
    _ticket: ChatTicket,
}

impl ChatLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the next place in the line of `chat_id`.
    pub fn reserve(self: &Arc<Self>, chat_id: i64) -> ChatTicket {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = slots.entry(chat_id).or_insert_with(|| Slot {
            serving: watch::Sender::new(0),
            next_ticket: 0,
            abandoned: BTreeSet::new(),
        });

        let number = slot.next_ticket;
        slot.next_ticket += 1;

        ChatTicket {
            chat_id,
            number,
            serving: slot.serving.subscribe(),
            owner: Arc::clone(self),
        }
    }

    /// Reserves a place and waits for its turn.
    pub async fn acquire(self: &Arc<Self>, chat_id: i64) -> ChatGuard {
        self.reserve(chat_id).wait().await
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl ChatTicket {
    /// Waits until every earlier ticket of the chat is released.
    pub async fn wait(mut self) -> ChatGuard {
        let number = self.number;
        // The sender lives as long as this ticket is outstanding
        let _ = self.serving.wait_for(|serving| *serving == number).await;
        debug!("acquired chat {} with ticket {}", self.chat_id, number);

        ChatGuard { _ticket: self }
    }
}

impl Drop for ChatTicket {
    fn drop(&mut self) {
        let mut slots = self
            .owner
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let Some(slot) = slots.get_mut(&self.chat_id) else {
            return;
        };

        let serving = *slot.serving.borrow();
        if serving != self.number {
            slot.abandoned.insert(self.number);
            return;
        }

        let mut next = serving + 1;
        while slot.abandoned.remove(&next) {
            next += 1;
        }

        if next == slot.next_ticket {
            slots.remove(&self.chat_id);
        } else {
            slot.serving.send_replace(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicBool, AtomicUsize, Ordering},
        time::Duration,
    };

    use futures::future::join_all;
    use tokio::{
        sync::Mutex as AsyncMutex,
        time::{sleep, timeout},
    };

    use super::*;

    #[tokio::test]
    async fn test_same_chat_is_serialized() {
        let chat_lock = Arc::new(ChatLock::new());
        let busy = Arc::new(AtomicBool::new(false));
        let overlaps = Arc::new(AtomicUsize::new(0));

        let tasks = (0..5).map(|_| {
            let chat_lock = Arc::clone(&chat_lock);
            let busy = Arc::clone(&busy);
            let overlaps = Arc::clone(&overlaps);
            tokio::spawn(async move {
                let _guard = chat_lock.acquire(42).await;
                if busy.swap(true, Ordering::SeqCst) {
                    overlaps.fetch_add(1, Ordering::SeqCst);
                }
                sleep(Duration::from_millis(10)).await;
                busy.store(false, Ordering::SeqCst);
            })
        });

        for result in join_all(tasks).await {
            result.unwrap();
        }

        assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_tickets_are_served_in_reservation_order() {
        let chat_lock = Arc::new(ChatLock::new());
        let order = Arc::new(AsyncMutex::new(Vec::new()));

        let tickets = (0..8)
            .map(|index| (index, chat_lock.reserve(42)))
            .collect::<Vec<_>>();

        // Spawn the last reservation first
        let tasks = tickets.into_iter().rev().map(|(index, ticket)| {
            let order = Arc::clone(&order);
            tokio::spawn(async move {
                let _guard = ticket.wait().await;
                sleep(Duration::from_millis(8 - index)).await;
                order.lock().await.push(index);
            })
        });

        for result in join_all(tasks.collect::<Vec<_>>()).await {
            result.unwrap();
        }

        assert_eq!(*order.lock().await, (0..8).collect::<Vec<u64>>());
        assert_eq!(chat_lock.len(), 0);
    }

    #[tokio::test]
    async fn test_other_chats_are_not_blocked() {
        let chat_lock = Arc::new(ChatLock::new());

        let _held = chat_lock.acquire(1).await;
        let other = timeout(Duration::from_secs(1), chat_lock.acquire(2)).await;

        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn test_waiter_gets_lock_after_release() {
        let chat_lock = Arc::new(ChatLock::new());

        let held = chat_lock.acquire(1).await;
        assert!(
            timeout(Duration::from_millis(50), chat_lock.acquire(1))
                .await
                .is_err()
        );

        drop(held);
        assert!(
            timeout(Duration::from_secs(1), chat_lock.acquire(1))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_abandoned_ticket_keeps_line_order() {
        let chat_lock = Arc::new(ChatLock::new());

        let held = chat_lock.acquire(1).await;
        let abandoned = chat_lock.reserve(1);
        let last = chat_lock.reserve(1);

        drop(abandoned);
        let last = tokio::spawn(last.wait());
        sleep(Duration::from_millis(20)).await;
        assert!(!last.is_finished());

        drop(held);
        assert!(timeout(Duration::from_secs(1), last).await.is_ok());
    }

    #[tokio::test]
    async fn test_idle_slots_are_dropped() {
        let chat_lock = Arc::new(ChatLock::new());

        let guard = chat_lock.acquire(42).await;
        assert_eq!(chat_lock.len(), 1);

        drop(guard);
        assert_eq!(chat_lock.len(), 0);
    }
}
