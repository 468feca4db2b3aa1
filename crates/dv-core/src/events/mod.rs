use std::sync::Arc;
use parking_lot::Mutex;
use ahash::AHashMap;

type SharedHandler = Arc<Mutex<Box<dyn EventHandler>>>;

/// System-wide event bus.
///
/// Handlers run without the registry lock held, so a handler may publish
/// further events or subscribe new handlers. A handler must not publish an
/// event type it handles itself.
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<SharedHandler>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Common system events
pub mod events {
    use super::Event;
    use crate::state::Theme;

    /// A dataset replaced the previous one
    #[derive(Debug, Clone)]
    pub struct DatasetLoaded {
        pub source_name: String,
        pub row_count: usize,
        pub column_count: usize,
    }

    /// A file could not be turned into a dataset
    #[derive(Debug, Clone)]
    pub struct DataSourceError {
        pub source_name: String,
        pub error: String,
    }

    /// An upload finished after a newer one had started
    #[derive(Debug, Clone)]
    pub struct StaleUploadDiscarded {
        pub source_name: String,
        pub generation: u64,
    }

    /// The zoom window moved
    #[derive(Debug, Clone)]
    pub struct ZoomChanged {
        pub start: usize,
        pub end: usize,
    }

    #[derive(Debug, Clone)]
    pub struct ThemeChanged {
        pub theme: Theme,
    }

    // Implement Event trait for all event types
    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        DatasetLoaded,
        DataSourceError,
        StaleUploadDiscarded,
        ZoomChanged,
        ThemeChanged
    );
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers
            .entry(type_id)
            .or_default()
            .push(Arc::new(Mutex::new(handler)));
    }

    /// Subscribe a closure that receives the concrete event type
    pub fn subscribe_fn<E, F>(&self, mut f: F)
    where
        E: Event,
        F: FnMut(&E) + Send + Sync + 'static,
    {
        self.subscribe::<E>(handler_from_fn(move |event| {
            if let Some(event) = event.as_any().downcast_ref::<E>() {
                f(event);
            }
        }));
    }

    /// Publish an event
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let targets: Vec<SharedHandler> = self
            .handlers
            .lock()
            .get(&type_id)
            .cloned()
            .unwrap_or_default();

        for handler in targets {
            handler.lock().handle(&event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for creating event handlers from closures
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}
