//! Info and warning notifications emitted by the projection engine and the validator.

use std::sync::Arc;

/// Receiver of notifications.
///
/// Sinks may be called from several threads at once and must not block.
pub trait EventSink: Send + Sync {
    fn info(&self, message: &str);

    fn warning(&self, message: &str);
}

/// Forwards notifications to [`tracing`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!(target: "oxontology", "{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!(target: "oxontology", "{message}");
    }
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn info(&self, _: &str) {}

    fn warning(&self, _: &str) {}
}

pub(crate) fn default_sink() -> Arc<dyn EventSink> {
    Arc::new(NoopSink)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records notifications for assertions.
    #[derive(Default)]
    pub struct RecordingSink {
        pub infos: Mutex<Vec<String>>,
        pub warnings: Mutex<Vec<String>>,
    }

    impl EventSink for RecordingSink {
        fn info(&self, message: &str) {
            self.infos.lock().unwrap().push(message.to_owned());
        }

        fn warning(&self, message: &str) {
            self.warnings.lock().unwrap().push(message.to_owned());
        }
    }

    #[test]
    fn recording_sink_is_shareable() {
        let sink = Arc::new(RecordingSink::default());
        let shared: Arc<dyn EventSink> = sink.clone();
        shared.info("a");
        shared.warning("b");
        assert_eq!(sink.infos.lock().unwrap().as_slice(), ["a"]);
        assert_eq!(sink.warnings.lock().unwrap().as_slice(), ["b"]);
    }
}
