use tracing::debug;

/// Whether the hosted document has signalled readiness yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Ready,
}

type ReadyHandler<D> = Box<dyn FnOnce(&mut D)>;

/// Owns a document and the callbacks waiting for its ready event.
///
/// The ready event fires at most once. Handlers run synchronously, in the
/// order they were registered, inside [`DocumentLifecycle::signal_ready`].
pub struct DocumentLifecycle<D> {
    document: D,
    state: ReadyState,
    handlers: Vec<ReadyHandler<D>>,
}

impl<D> DocumentLifecycle<D> {
    pub fn new(document: D) -> Self {
        Self {
            document,
            state: ReadyState::Loading,
            handlers: Vec::new(),
        }
    }

    pub fn state(&self) -> ReadyState {
        self.state
    }

    /// Subscribes to the ready event.
    ///
    /// A handler registered after the event has fired runs immediately.
    pub fn on_ready<F>(&mut self, handler: F)
    where
        F: FnOnce(&mut D) + 'static,
    {
        match self.state {
            ReadyState::Loading => self.handlers.push(Box::new(handler)),
            ReadyState::Ready => handler(&mut self.document),
        }
    }

    /// Fires the ready event and returns how many handlers ran.
    pub fn signal_ready(&mut self) -> usize {
        if self.state == ReadyState::Ready {
            debug!(stage = "lifecycle", "ready already signalled; ignoring");
            return 0;
        }
        self.state = ReadyState::Ready;

        let handlers = std::mem::take(&mut self.handlers);
        let count = handlers.len();
        for handler in handlers {
            handler(&mut self.document);
        }
        debug!(stage = "lifecycle", handlers = count, "document ready");
        count
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }
}
