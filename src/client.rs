use reqwest::{header::CONTENT_TYPE, Url};
use serde::Serialize;

use crate::{
    events::{AddUserPropertiesRequest, TrackRequest},
    response::{ErrorBody, Response, SuccessResponse},
    ClientConfig, Error, Logger, Result, TrackEvent, TransportError, UserProperties,
};

const TRACK_ENDPOINT: &str = "/track";
const ADD_USER_PROPERTIES_ENDPOINT: &str = "/add_user_properties";

/// A client for the Heap server-side API.
///
/// In order to create a client instance, first create [`ClientConfig`].
///
/// The client holds no mutable state, so a single instance can serve concurrent calls.
///
/// # Examples
/// ```
/// # use heap::{HeapClient, ClientConfig};
/// HeapClient::new(ClientConfig::from_app_id("1234567890")).unwrap();
/// ```
pub struct HeapClient<'a> {
    app_id: String,
    // Client holds a connection pool internally, so we're reusing the client between requests.
    http: reqwest::Client,
    track_url: Url,
    add_user_properties_url: Url,
    logger: Box<dyn Logger + Send + Sync + 'a>,
}

impl<'a> HeapClient<'a> {
    /// Create a new `HeapClient` using the specified configuration.
    ///
    /// No network requests are made. Fails if the application ID is empty or the base URL is
    /// invalid.
    pub fn new(config: ClientConfig<'a>) -> Result<Self> {
        if config.app_id.is_empty() {
            return Err(Error::MissingAppId);
        }

        let track_url = endpoint_url(&config.base_url, TRACK_ENDPOINT)?;
        let add_user_properties_url = endpoint_url(&config.base_url, ADD_USER_PROPERTIES_ENDPOINT)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::unexpected)?;

        log::debug!(target: "heap",
                    base_url = config.base_url.as_str(),
                    timeout_ms = u64::try_from(config.timeout.as_millis()).unwrap_or(u64::MAX);
                    "created Heap client");

        Ok(HeapClient {
            app_id: config.app_id,
            http,
            track_url,
            add_user_properties_url,
            logger: config.logger,
        })
    }

    /// The application ID every request is sent with.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Track an event in Heap.
    ///
    /// Fields left unset on `event` are omitted from the request.
    pub async fn track(&self, event: &TrackEvent) -> Result<Response> {
        log::debug!(target: "heap", event = event.event.as_str(); "sending event to Heap");

        let payload = TrackRequest::new(&self.app_id, event);
        self.post(&self.track_url, &payload)
            .await
            .inspect_err(|err| self.report(err, "Error sending event to Heap", "track"))
    }

    /// Add properties to a user in Heap.
    pub async fn add_user_properties(&self, update: &UserProperties) -> Result<Response> {
        log::debug!(target: "heap",
                    identity = update.identity.as_str();
                    "sending user properties to Heap");

        let payload = AddUserPropertiesRequest::new(&self.app_id, update);
        self.post(&self.add_user_properties_url, &payload)
            .await
            .inspect_err(|err| {
                self.report(
                    err,
                    "Error adding user properties to Heap",
                    "add_user_properties",
                )
            })
    }

    async fn post(&self, url: &Url, payload: &impl Serialize) -> Result<Response> {
        // Serializing up front so that a bad payload is reported as unexpected rather than as a
        // transport failure.
        let body = serde_json::to_vec(payload).map_err(Error::unexpected)?;

        let response = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = match response.text().await {
                Ok(raw) => raw,
                Err(err) => {
                    // The status alone is still reported to the caller.
                    log::debug!(target: "heap",
                                path = url.path(),
                                status = status.as_u16();
                                "failed to read error response body: {:?}", err);
                    String::new()
                }
            };
            log::debug!(target: "heap",
                        path = url.path(),
                        status = status.as_u16();
                        "received non-success response from Heap");
            return Err(TransportError::from_status(status, ErrorBody::parse(&raw)).into());
        }

        let headers = response.headers().clone();
        // Heap returns no content on success; draining the body lets the connection be reused.
        response.bytes().await?;

        log::debug!(target: "heap", path = url.path(), status = status.as_u16(); "request succeeded");

        Ok(Response {
            status,
            headers,
            body: SuccessResponse::default(),
        })
    }

    fn report(&self, err: &Error, context: &str, operation: &str) {
        match err {
            Error::Transport(err) => {
                self.logger.error(&format!("{}: {}", context, err.message()));
                if let Some(body) = err.body() {
                    self.logger.error(&format!("Response data: {}", body));
                }
            }
            err => {
                self.logger
                    .error(&format!("Unexpected error in {}: {}", operation, err));
            }
        }
    }
}

fn endpoint_url(base_url: &str, endpoint: &str) -> Result<Url> {
    Url::parse(&format!("{}{}", base_url, endpoint)).map_err(Error::InvalidBaseUrl)
}
