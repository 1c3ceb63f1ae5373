use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Arbitrary JSON properties attached to an event or a user.
pub type Properties = HashMap<String, serde_json::Value>;

/// An event to send with [`HeapClient::track`](crate::HeapClient::track).
///
/// ```
/// # use heap::TrackEvent;
/// let event = TrackEvent::new("signup")
///     .identity("user@example.com")
///     .property("plan", "pro")
///     .timestamp_millis(1_700_000_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackEvent {
    /// The name of the event.
    pub event: String,
    /// Identity of the user that triggered the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    /// Properties of the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    /// Unix timestamp in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl TrackEvent {
    /// Create an event with the given name and no optional fields.
    pub fn new(event: impl Into<String>) -> Self {
        TrackEvent {
            event: event.into(),
            identity: None,
            properties: None,
            timestamp: None,
        }
    }

    /// Set the user identity.
    pub fn identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Replace all event properties.
    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Add a single event property.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set the event time as Unix epoch milliseconds.
    pub fn timestamp_millis(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the event time.
    pub fn timestamp(self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp_millis(timestamp.timestamp_millis())
    }
}

/// Properties to attach to a user with
/// [`HeapClient::add_user_properties`](crate::HeapClient::add_user_properties).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProperties {
    /// Identity of the user, should be a unique identifier.
    pub identity: String,
    /// Properties to add to the user.
    pub properties: Properties,
}

impl UserProperties {
    /// Create an update for `identity` with no properties.
    pub fn new(identity: impl Into<String>) -> Self {
        UserProperties {
            identity: identity.into(),
            properties: Properties::new(),
        }
    }

    /// Replace all properties.
    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Add a single property.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Body of `POST /track`.
#[derive(Debug, Serialize)]
pub(crate) struct TrackRequest<'a> {
    pub app_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<&'a str>,
    pub event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<&'a Properties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl<'a> TrackRequest<'a> {
    pub fn new(app_id: &'a str, event: &'a TrackEvent) -> Self {
        TrackRequest {
            app_id,
            identity: event.identity.as_deref(),
            event: &event.event,
            properties: event.properties.as_ref(),
            timestamp: event.timestamp,
        }
    }
}

/// Body of `POST /add_user_properties`.
#[derive(Debug, Serialize)]
pub(crate) struct AddUserPropertiesRequest<'a> {
    pub app_id: &'a str,
    pub identity: &'a str,
    pub properties: &'a Properties,
}

impl<'a> AddUserPropertiesRequest<'a> {
    pub fn new(app_id: &'a str, update: &'a UserProperties) -> Self {
        AddUserPropertiesRequest {
            app_id,
            identity: &update.identity,
            properties: &update.properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::{AddUserPropertiesRequest, TrackEvent, TrackRequest, UserProperties};

    #[test]
    fn track_request_with_all_fields() {
        let event = TrackEvent::new("signup")
            .identity("u1")
            .property("plan", "pro")
            .timestamp_millis(1_700_000_000_000);

        assert_eq!(
            serde_json::to_value(TrackRequest::new("app-1", &event)).unwrap(),
            json!({
                "app_id": "app-1",
                "identity": "u1",
                "event": "signup",
                "properties": {"plan": "pro"},
                "timestamp": 1_700_000_000_000_i64,
            })
        );
    }

    #[test]
    fn track_request_omits_absent_fields() {
        let event = TrackEvent::new("ping");

        assert_eq!(
            serde_json::to_string(&TrackRequest::new("app-1", &event)).unwrap(),
            r#"{"app_id":"app-1","event":"ping"}"#
        );
    }

    #[test]
    fn empty_properties_are_kept() {
        // An explicitly empty map is different from no properties at all.
        let event = TrackEvent::new("ping").properties(Default::default());

        assert_eq!(
            serde_json::to_value(TrackRequest::new("app-1", &event)).unwrap(),
            json!({"app_id": "app-1", "event": "ping", "properties": {}})
        );
    }

    #[test]
    fn empty_event_name_is_passed_through() {
        let event = TrackEvent::new("");

        assert_eq!(
            serde_json::to_value(TrackRequest::new("app-1", &event)).unwrap(),
            json!({"app_id": "app-1", "event": ""})
        );
    }

    #[test]
    fn timestamp_from_datetime() {
        let time = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let event = TrackEvent::new("ping").timestamp(time);

        assert_eq!(event.timestamp, Some(1_700_000_000_123));
    }

    #[test]
    fn add_user_properties_request() {
        let update = UserProperties::new("u1").property("plan", "pro");

        assert_eq!(
            serde_json::to_value(AddUserPropertiesRequest::new("app-1", &update)).unwrap(),
            json!({
                "app_id": "app-1",
                "identity": "u1",
                "properties": {"plan": "pro"},
            })
        );
    }

    #[test]
    fn track_event_deserializes_without_optional_fields() {
        let event: TrackEvent = serde_json::from_str(r#"{"event":"ping"}"#).unwrap();
        assert_eq!(event, TrackEvent::new("ping"));
    }
}
