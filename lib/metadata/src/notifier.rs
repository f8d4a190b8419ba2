pub mod notifier {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::key::key::MetadataKey;

    /// A single effective value transition of one key.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct MetadataChange {
        pub key: MetadataKey,
        /// `None` if the key did not exist before.
        pub old: Option<String>,
        pub new: String,
    }

    /// Handle returned by [`ChangeNotifier::subscribe`], used to
    /// unsubscribe again. Observer registration is explicit on both
    /// ends; there are no implicitly leaked handlers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ObserverHandle(u64);

    type ObserverFn = Box<dyn FnMut(&MetadataChange)>;

    #[derive(Default)]
    struct NotifierInner {
        next_id: u64,
        observers: Vec<(u64, ObserverFn)>,

        // mutations requested while a dispatch is running
        dispatching: bool,
        added: Vec<(u64, ObserverFn)>,
        removed: Vec<u64>,
        // changes dispatched from within a dispatch
        deferred: Vec<MetadataChange>,
    }

    /// Dispatches every applied metadata change to all subscribed
    /// observers, synchronously and in application order.
    ///
    /// This is a cheap cloneable handle; all clones share one observer
    /// list. Observers may subscribe/unsubscribe re-entrantly from
    /// within a dispatch; such mutations take effect for the next
    /// change, not the one currently being delivered.
    #[derive(Default, Clone)]
    pub struct ChangeNotifier(Rc<RefCell<NotifierInner>>);

    impl ChangeNotifier {
        pub fn subscribe(&self, observer: impl FnMut(&MetadataChange) + 'static) -> ObserverHandle {
            let mut inner = self.0.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            let entry = (id, Box::new(observer) as ObserverFn);
            if inner.dispatching {
                inner.added.push(entry);
            } else {
                inner.observers.push(entry);
            }
            ObserverHandle(id)
        }

        pub fn unsubscribe(&self, handle: ObserverHandle) {
            let mut inner = self.0.borrow_mut();
            if inner.dispatching {
                inner.removed.push(handle.0);
            } else {
                inner.observers.retain(|(id, _)| *id != handle.0);
            }
        }

        pub fn observer_count(&self) -> usize {
            self.0.borrow().observers.len()
        }

        /// Delivers one change to every observer before returning.
        ///
        /// The observer list is taken out for the duration of the
        /// dispatch so observers can call back into the notifier. A
        /// change applied from within an observer is deferred and
        /// delivered right after the current one, still in application
        /// order.
        pub fn dispatch(&self, change: &MetadataChange) {
            let mut observers = {
                let mut inner = self.0.borrow_mut();
                if inner.dispatching {
                    inner.deferred.push(change.clone());
                    return;
                }
                inner.dispatching = true;
                std::mem::take(&mut inner.observers)
            };

            let mut next = Some(change.clone());
            while let Some(change) = next {
                for (id, observer) in observers.iter_mut() {
                    let skip = self.0.borrow().removed.contains(id);
                    if !skip {
                        observer(&change);
                    }
                }
                let mut inner = self.0.borrow_mut();
                next = if inner.deferred.is_empty() {
                    None
                } else {
                    Some(inner.deferred.remove(0))
                };
            }

            let mut inner = self.0.borrow_mut();
            inner.dispatching = false;
            let removed = std::mem::take(&mut inner.removed);
            let added = std::mem::take(&mut inner.added);
            observers.extend(added);
            observers.retain(|(id, _)| !removed.contains(id));
            inner.observers = observers;
        }
    }

    impl std::fmt::Debug for ChangeNotifier {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("ChangeNotifier")
                .field("observers", &self.observer_count())
                .finish()
        }
    }

    /// An observer that records changes into a drainable queue.
    ///
    /// Consumers that react once per tick (the mode lifecycle) subscribe
    /// one of these while they are active and drain it in their update.
    #[derive(Debug, Default, Clone)]
    pub struct MetadataChangeQueue(Rc<RefCell<Vec<MetadataChange>>>);

    impl MetadataChangeQueue {
        /// Registers this queue on the notifier; changes are recorded
        /// in dispatch order until the returned handle is unsubscribed.
        pub fn subscribe_to(&self, notifier: &ChangeNotifier) -> ObserverHandle {
            let queue = self.clone();
            notifier.subscribe(move |change| queue.0.borrow_mut().push(change.clone()))
        }

        pub fn take(&self) -> Vec<MetadataChange> {
            std::mem::take(&mut self.0.borrow_mut())
        }

        pub fn clear(&self) {
            self.0.borrow_mut().clear();
        }

        pub fn is_empty(&self) -> bool {
            self.0.borrow().is_empty()
        }
    }

    #[cfg(test)]
    mod test {
        use std::cell::RefCell;
        use std::rc::Rc;

        use super::{ChangeNotifier, MetadataChange, MetadataChangeQueue};
        use crate::key::key::MetadataKey;

        fn change(key: &str, new: &str) -> MetadataChange {
            MetadataChange {
                key: MetadataKey::new(key),
                old: None,
                new: new.into(),
            }
        }

        #[test]
        fn unsubscribe_stops_delivery() {
            let notifier = ChangeNotifier::default();
            let seen: Rc<RefCell<Vec<String>>> = Default::default();
            let seen2 = seen.clone();
            let handle = notifier.subscribe(move |ch| seen2.borrow_mut().push(ch.new.clone()));

            notifier.dispatch(&change("k", "1"));
            notifier.unsubscribe(handle);
            notifier.dispatch(&change("k", "2"));

            assert_eq!(*seen.borrow(), vec!["1".to_string()]);
        }

        #[test]
        fn subscribe_during_dispatch_takes_effect_for_next_change() {
            let notifier = ChangeNotifier::default();
            let late: Rc<RefCell<Vec<String>>> = Default::default();

            let notifier2 = notifier.clone();
            let late2 = late.clone();
            let subscribed = Rc::new(RefCell::new(false));
            notifier.subscribe(move |_| {
                if !*subscribed.borrow() {
                    *subscribed.borrow_mut() = true;
                    let late3 = late2.clone();
                    notifier2.subscribe(move |ch| late3.borrow_mut().push(ch.new.clone()));
                }
            });

            notifier.dispatch(&change("k", "first"));
            notifier.dispatch(&change("k", "second"));

            // the late observer only sees the change after its subscription
            assert_eq!(*late.borrow(), vec!["second".to_string()]);
        }

        #[test]
        fn queue_records_in_dispatch_order() {
            let notifier = ChangeNotifier::default();
            let queue = MetadataChangeQueue::default();
            let handle = queue.subscribe_to(&notifier);

            notifier.dispatch(&change("a", "1"));
            notifier.dispatch(&change("b", "2"));

            let drained = queue.take();
            assert_eq!(drained.len(), 2);
            assert_eq!(drained[0].new, "1");
            assert_eq!(drained[1].new, "2");
            assert!(queue.is_empty());

            notifier.unsubscribe(handle);
            notifier.dispatch(&change("c", "3"));
            assert!(queue.is_empty());
        }
    }
}
