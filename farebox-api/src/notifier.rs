use std::time::Duration;
use tokio_util::task::TaskTracker;
use tracing::info;

/// Confirmation payload for a committed booking.
#[derive(Debug, Clone)]
pub struct TicketNotification {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i32,
    pub seat_numbers: Vec<i32>,
}

/// Fire-and-forget ticket delivery. Each dispatch runs on its own task so
/// the booking response never waits on it; the tracker lets shutdown block
/// until every outstanding send has finished.
#[derive(Clone)]
pub struct NotificationDispatcher {
    tracker: TaskTracker,
    send_delay: Duration,
}

impl NotificationDispatcher {
    pub fn new(send_delay: Duration) -> Self {
        Self {
            tracker: TaskTracker::new(),
            send_delay,
        }
    }

    pub fn dispatch(&self, notification: TicketNotification) {
        let delay = self.send_delay;
        self.tracker.spawn(async move {
            // Simulated delivery latency
            tokio::time::sleep(delay).await;
            info!(
                email = %notification.email,
                item = %notification.item_name,
                seats = ?notification.seat_numbers,
                "sent {} ticket(s) to {} {}",
                notification.quantity,
                notification.first_name,
                notification.last_name,
            );
        });
    }

    /// Number of sends still in flight.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Blocks until every dispatched notification has finished. Called at
    /// process shutdown so none are dropped.
    pub async fn wait_for_completion(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}
