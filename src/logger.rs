use std::sync::Arc;

/// A sink for messages produced by [`HeapClient`](crate::HeapClient).
///
/// The client reports every failed request through [`Logger::error`] before returning the error
/// to the caller.
pub trait Logger {
    /// Report an informational message.
    fn info(&self, message: &str);
    /// Report an error message.
    fn error(&self, message: &str);
}

/// Logger that forwards messages to the [`log`] crate under the `heap` target.
///
/// This is the logger used when none is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn info(&self, message: &str) {
        log::info!(target: "heap", "{}", message);
    }

    fn error(&self, message: &str) {
        log::error!(target: "heap", "{}", message);
    }
}

impl<T: Logger + ?Sized> Logger for &T {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

impl<T: Logger + ?Sized> Logger for Box<T> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

impl<T: Logger + ?Sized> Logger for Arc<T> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}
