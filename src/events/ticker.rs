//! Once-a-second timer ticks for the running work timer.

use super::terminal::Event;
use crossterm::event::KeyEvent;
use log::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc::Sender, Arc};
use std::thread;
use std::time::Duration;

/// Interval between timer ticks.
///
pub const TIMER_TICK: Duration = Duration::from_secs(1);

/// Sends `Event::TimerTick` on a background thread until cancelled or
/// dropped. A tick already on its way when `cancel` is called may still
/// arrive; the reducer ignores ticks outside a running timer.
///
pub struct Ticker {
    cancelled: Arc<AtomicBool>,
}

impl Ticker {
    pub fn start(sender: Sender<Event<KeyEvent>>, period: Duration) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        thread::spawn(move || loop {
            thread::sleep(period);
            if flag.load(Ordering::Relaxed) || sender.send(Event::TimerTick).is_err() {
                break;
            }
        });
        debug!("Timer ticker started.");
        Ticker { cancelled }
    }

    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::Relaxed) {
            debug!("Timer ticker cancelled.");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    const PERIOD: Duration = Duration::from_millis(5);

    /// Wait out a tick that was in flight during `cancel`, then drop it.
    fn drain(rx: &mpsc::Receiver<Event<KeyEvent>>) {
        thread::sleep(PERIOD * 4);
        while rx.try_recv().is_ok() {}
    }

    #[test]
    fn test_ticker_fires_until_cancelled() {
        let (tx, rx) = mpsc::channel();
        let ticker = Ticker::start(tx.clone(), PERIOD);
        assert!(matches!(
            rx.recv_timeout(Duration::from_secs(1)),
            Ok(Event::TimerTick)
        ));
        assert!(matches!(
            rx.recv_timeout(Duration::from_secs(1)),
            Ok(Event::TimerTick)
        ));
        assert!(!ticker.is_cancelled());
        ticker.cancel();
        assert!(ticker.is_cancelled());
        drain(&rx);
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn test_ticker_drop_cancels() {
        let (tx, rx) = mpsc::channel();
        {
            let _ticker = Ticker::start(tx.clone(), PERIOD);
            assert!(rx.recv_timeout(Duration::from_secs(1)).is_ok());
        }
        drain(&rx);
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }
}
