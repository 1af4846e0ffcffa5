//! Input debouncing for the search box.
//!
//! A [`Debouncer`] sits between raw keystrokes and the list refresh: a
//! value settles only once the window elapses with no newer input, so a
//! typing burst costs one refresh instead of one per key. Page and facet
//! changes bypass this entirely; only free-text search is debounced.

use std::time::Duration;

use tokio::sync::mpsc;

/// Window applied to search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Hands raw values to a background pump and yields the ones that settle.
///
/// Dropping the handle stops the pump; a value still inside its window at
/// that point is discarded, never emitted late into a torn-down view.
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the pump. Must be called from within a Tokio runtime.
    pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input, raw) = mpsc::unbounded_channel();
        let (settled_tx, settled) = mpsc::unbounded_channel();
        tokio::spawn(run(window, raw, settled_tx));
        (Self { input }, settled)
    }

    /// Feed one raw value. Restarts the window if one is already pending.
    pub fn send(&self, value: T) {
        // The pump only exits when this handle is dropped, so a send error
        // cannot reach live code.
        let _ = self.input.send(value);
    }
}

async fn run<T>(
    window: Duration,
    mut raw: mpsc::UnboundedReceiver<T>,
    settled: mpsc::UnboundedSender<T>,
) {
    while let Some(mut current) = raw.recv().await {
        loop {
            let deadline = tokio::time::sleep(window);
            tokio::pin!(deadline);
            tokio::select! {
                _ = &mut deadline => {
                    let _ = settled.send(current);
                    break;
                }
                next = raw.recv() => match next {
                    Some(value) => current = value,
                    // Input handle dropped mid-window: discard.
                    None => return,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn a_typing_burst_settles_to_one_value() {
        let (debouncer, mut settled) = Debouncer::new(DEFAULT_DEBOUNCE);

        debouncer.send("a");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.send("ab");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.send("abc");

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(settled.recv().await, Some("abc"));
        assert!(settled.try_recv().is_err(), "only the last value settles");
    }

    #[tokio::test(start_paused = true)]
    async fn values_spaced_past_the_window_each_settle() {
        let (debouncer, mut settled) = Debouncer::new(DEFAULT_DEBOUNCE);

        debouncer.send("first");
        tokio::time::sleep(Duration::from_millis(600)).await;
        debouncer.send("second");
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(settled.recv().await, Some("first"));
        assert_eq!(settled.recv().await, Some("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_settles_before_the_window_elapses() {
        let (debouncer, mut settled) = Debouncer::new(DEFAULT_DEBOUNCE);

        debouncer.send("early");
        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(settled.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(settled.recv().await, Some("early"));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_discards_the_pending_value() {
        let (debouncer, mut settled) = Debouncer::new(DEFAULT_DEBOUNCE);

        debouncer.send("never");
        drop(debouncer);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(settled.recv().await, None);
    }
}
