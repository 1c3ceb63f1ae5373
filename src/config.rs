use std::time::Duration;

use crate::{logger::DefaultLogger, HeapClient, Logger, Result};

/// Configuration for [`HeapClient`].
pub struct ClientConfig<'a> {
    pub(crate) app_id: String,
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
    pub(crate) logger: Box<dyn Logger + Send + Sync + 'a>,
}

impl<'a> ClientConfig<'a> {
    /// Create a default Heap configuration using the specified application ID.
    ///
    /// ```
    /// # use heap::ClientConfig;
    /// ClientConfig::from_app_id("1234567890");
    /// ```
    pub fn from_app_id(app_id: impl Into<String>) -> Self {
        ClientConfig {
            app_id: app_id.into(),
            base_url: ClientConfig::DEFAULT_BASE_URL.to_owned(),
            timeout: ClientConfig::DEFAULT_TIMEOUT,
            logger: Box::new(DefaultLogger),
        }
    }

    /// Set the logger that receives request failures.
    ///
    /// ```
    /// # use heap::{ClientConfig, Logger};
    /// struct Stderr;
    /// impl Logger for Stderr {
    ///     fn info(&self, message: &str) { eprintln!("{message}") }
    ///     fn error(&self, message: &str) { eprintln!("{message}") }
    /// }
    ///
    /// let mut config = ClientConfig::from_app_id("1234567890");
    /// config.logger(Stderr);
    /// ```
    pub fn logger(&mut self, logger: impl Logger + Send + Sync + 'a) -> &mut Self {
        self.logger = Box::new(logger);
        self
    }

    /// Default base URL for API calls.
    pub const DEFAULT_BASE_URL: &'static str = "https://heapanalytics.com/api";

    /// Override base URL for API calls. Clients should use the default setting in most cases.
    pub fn base_url(&mut self, base_url: impl Into<String>) -> &mut Self {
        self.base_url = base_url.into();
        self
    }

    /// Default timeout applied to every request.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

    /// Override the request timeout.
    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Create a new [`HeapClient`] using the specified configuration.
    ///
    /// Fails with [`Error::MissingAppId`](crate::Error::MissingAppId) if the application ID is
    /// empty.
    ///
    /// ```
    /// # use heap::{ClientConfig, HeapClient};
    /// let client: HeapClient = ClientConfig::from_app_id("1234567890").to_client().unwrap();
    /// ```
    pub fn to_client(self) -> Result<HeapClient<'a>> {
        HeapClient::new(self)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{ClientConfig, Error};

    #[test]
    fn defaults() {
        let config = ClientConfig::from_app_id("app-1");

        assert_eq!(config.app_id, "app-1");
        assert_eq!(config.base_url, "https://heapanalytics.com/api");
        assert_eq!(config.timeout, Duration::from_millis(5000));
    }

    #[test]
    fn empty_app_id_fails() {
        let err = ClientConfig::from_app_id("").to_client().err().unwrap();

        assert!(matches!(err, Error::MissingAppId));
        assert_eq!(err.to_string(), "Heap App ID is required");
    }

    #[test]
    fn invalid_base_url_fails() {
        let mut config = ClientConfig::from_app_id("app-1");
        config.base_url("not a url");

        let err = config.to_client().err().unwrap();
        assert!(matches!(err, Error::InvalidBaseUrl(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn app_id_is_stored_verbatim() {
        let client = ClientConfig::from_app_id(" app-1 ").to_client().unwrap();
        assert_eq!(client.app_id(), " app-1 ");
    }
}
