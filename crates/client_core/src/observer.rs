//! Single-observer notification slot shared by the screen components.

use tokio::sync::mpsc;
use tracing::debug;

/// Holds at most one observer. Attaching replaces the previous observer
/// wholesale; a receiver dropped mid-flight detaches the slot on the next
/// send.
pub struct ObserverSlot<E> {
    name: &'static str,
    tx: Option<mpsc::UnboundedSender<E>>,
}

impl<E> ObserverSlot<E> {
    pub fn new(name: &'static str) -> Self {
        Self { name, tx: None }
    }

    pub fn attach(&mut self) -> mpsc::UnboundedReceiver<E> {
        let (tx, rx) = mpsc::unbounded_channel();
        if self.tx.replace(tx).is_some() {
            debug!(slot = self.name, "replaced attached observer");
        }
        rx
    }

    pub fn detach(&mut self) {
        if self.tx.take().is_some() {
            debug!(slot = self.name, "observer detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    pub fn notify(&mut self, event: E) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(event).is_err() {
            debug!(slot = self.name, "observer went away; dropping notifications");
            self.tx = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_before_attach_are_dropped() {
        let mut slot = ObserverSlot::new("test");
        slot.notify(1u32);
        let mut rx = slot.attach();
        slot.notify(2);
        assert_eq!(rx.try_recv().ok(), Some(2));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn attaching_again_cuts_off_the_previous_observer() {
        let mut slot = ObserverSlot::new("test");
        let mut first = slot.attach();
        let mut second = slot.attach();
        slot.notify(7u32);
        assert!(first.try_recv().is_err());
        assert_eq!(second.try_recv().ok(), Some(7));
    }

    #[test]
    fn torn_down_observer_is_tolerated() {
        let mut slot = ObserverSlot::new("test");
        let rx = slot.attach();
        drop(rx);
        slot.notify(1u32);
        assert!(!slot.is_attached());
        slot.notify(2);
    }
}
