//! Request and response types for the Dialogflow API.
//!
//! These types mirror the API's JSON contract. Optional fields default when
//! missing and are skipped when empty, so a payload decoded from the API can
//! be sent back unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

fn is_zero(n: &i64) -> bool {
    *n == 0
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Accepts both JSON booleans and the `"true"` / `"false"` strings some
/// protocol versions return.
fn flexible_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => Some(b),
        Some(Flag::Text(s)) => Some(s.eq_ignore_ascii_case("true")),
        None => None,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Contexts
// ─────────────────────────────────────────────────────────────────────────────

/// A conversational context scoped to a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Context name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Number of queries the context stays active for.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub lifespan: i64,
    /// Arbitrary context parameters.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}

impl Context {
    /// Create a context with a name and lifespan.
    pub fn new(name: impl Into<String>, lifespan: i64) -> Self {
        Self {
            name: name.into(),
            lifespan,
            parameters: Map::new(),
        }
    }

    /// Add a parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Entities
// ─────────────────────────────────────────────────────────────────────────────

/// A single entity value and its synonyms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Reference value.
    #[serde(default)]
    pub value: String,
    /// Synonyms that resolve to the reference value.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
}

impl Entry {
    /// Create an entry.
    pub fn new<S>(value: impl Into<String>, synonyms: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        Self {
            value: value.into(),
            synonyms: synonyms.into_iter().map(Into::into).collect(),
        }
    }
}

/// A named vocabulary list of the agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Entity ID (assigned by the API).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Entity name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Entity entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<Entry>,
    /// Whether entries are matched as an enumeration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enum: Option<bool>,
    /// Whether the agent may extend the entity automatically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automated_expansion: Option<bool>,
}

impl Entity {
    /// Create an entity with the given entries.
    pub fn new(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            name: name.into(),
            entries,
            ..Default::default()
        }
    }

    /// True when the entity carries neither an id, a name nor entries.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_empty() && self.entries.is_empty()
    }
}

/// Session-scoped override of an entity, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    /// Session the entity belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Name of the entity being overridden.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Extend the developer entity instead of replacing it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extend: Option<bool>,
    /// Entries for this session.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<Entry>,
}

impl UserEntity {
    /// Create a user entity.
    pub fn new(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            name: name.into(),
            entries,
            ..Default::default()
        }
    }

    /// True when the user entity carries neither a name nor entries.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.entries.is_empty()
    }
}

/// Body of a user-entity creation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateUserEntitiesRequest<'a> {
    pub session_id: &'a str,
    pub entities: &'a [UserEntity],
}

// ─────────────────────────────────────────────────────────────────────────────
// Intents
// ─────────────────────────────────────────────────────────────────────────────

/// An event that can trigger an intent or a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event name.
    #[serde(default)]
    pub name: String,
    /// Event parameters.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl Event {
    /// Create an event without data.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Map::new(),
        }
    }
}

/// Part of a training phrase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSaysPart {
    /// Text of this part.
    #[serde(default)]
    pub text: String,
    /// Parameter alias when the part is annotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Entity reference (e.g. `@sys.date`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    /// Whether the annotation was added by the developer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_defined: Option<bool>,
}

/// A training phrase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSays {
    /// Phrase ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Annotated parts of the phrase.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<UserSaysPart>,
    /// Whether the phrase is a template.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_template: bool,
    /// Number of times the phrase was added.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub count: i64,
}

/// Context set by an intent response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AffectedContext {
    /// Context name.
    #[serde(default)]
    pub name: String,
    /// Context lifespan.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub lifespan: i64,
    /// Parameters attached to the context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

/// Parameter extracted by an intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentParameter {
    /// Parameter name.
    #[serde(default)]
    pub name: String,
    /// Value expression (e.g. `$date`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Value used when the parameter is missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Whether slot filling is required.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Entity type of the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Prompts used for slot filling.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prompts: Vec<Value>,
    /// Whether the parameter holds a list.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_list: bool,
}

/// Response definition of an intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    /// Action name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Clear all contexts when the intent matches.
    #[serde(default, skip_serializing_if = "is_false")]
    pub reset_contexts: bool,
    /// Contexts set when the intent matches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_contexts: Vec<AffectedContext>,
    /// Extracted parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<IntentParameter>,
    /// Rich response messages, passed through as-is.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Value>,
    /// Plain speech response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech: Option<Value>,
}

/// A full intent definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    /// Intent ID (assigned by the API).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Intent name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Whether machine learning is enabled for the intent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto: Option<bool>,
    /// Input context names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<String>,
    /// Template-mode training phrases (e.g. `@sys.number:guests people`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<String>,
    /// Annotated training phrases.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_says: Vec<UserSays>,
    /// Responses, actions and parameters of the intent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<IntentResponse>,
    /// Matching priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Whether fulfillment is delegated to the webhook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_used: Option<bool>,
    /// Whether the webhook is called during slot filling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_for_slot_filling: Option<bool>,
    /// Whether this is a fallback intent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_intent: Option<bool>,
    /// Events that trigger the intent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
}

impl Intent {
    /// Create an intent with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// True when the intent has no id, name, phrases, templates or responses.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.name.is_empty()
            && self.templates.is_empty()
            && self.user_says.is_empty()
            && self.responses.is_empty()
    }
}

/// Intent as returned by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSummary {
    /// Intent ID.
    #[serde(default)]
    pub id: String,
    /// Intent name.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context_in: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<IntentParameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context_out: Vec<AffectedContext>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_intent: Option<bool>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Query
// ─────────────────────────────────────────────────────────────────────────────

/// JSON keys of the well-known [`Query`] fields.
const QUERY_FIELDS: &[&str] = &[
    "query",
    "event",
    "v",
    "sessionId",
    "lang",
    "contexts",
    "resetContexts",
    "entities",
    "timezone",
    "location",
    "originalRequest",
];

/// Geographic location attached to a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// A natural-language query or event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// Natural language input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Event input, used instead of text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
    /// Protocol version; filled from the client when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub v: String,
    /// Session id; filled from the client when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub session_id: String,
    /// Language; filled from the client when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub lang: String,
    /// Contexts to activate before matching.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<Context>,
    /// Reset all contexts of the session before matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_contexts: Option<bool>,
    /// Session entities to apply to this query.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<UserEntity>,
    /// Time zone of the user (e.g. `Europe/Paris`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Payload of the originating platform request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_request: Option<Value>,
    /// Extra parameters sent alongside the well-known ones.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Query {
    /// Create a text query.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            query: Some(text.into()),
            ..Default::default()
        }
    }

    /// Create an event query.
    pub fn event(event: Event) -> Self {
        Self {
            event: Some(event),
            ..Default::default()
        }
    }

    /// Set the session id.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Set the language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Add an extra parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Remove extra parameters whose key collides with a well-known field,
    /// so the flattened body never carries a key twice.
    pub(crate) fn drop_shadowing_params(&mut self) {
        self.extra
            .retain(|key, _| !QUERY_FIELDS.contains(&key.as_str()));
    }

    /// True when there is neither text nor an event to send.
    pub fn is_empty(&self) -> bool {
        let no_text = self.query.as_deref().is_none_or(|q| q.trim().is_empty());
        let no_event = self.event.as_ref().is_none_or(|e| e.name.is_empty());
        no_text && no_event
    }

    /// Flatten the query into URL parameters for a GET request.
    ///
    /// Extra parameters are written first so the well-known fields win on
    /// key collisions. Contexts are sent by name only.
    pub fn to_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();

        for (key, value) in &self.extra {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            params.insert(key.clone(), value);
        }

        let mut put = |key: &str, value: &str| {
            if !value.is_empty() {
                params.insert(key.to_string(), value.to_string());
            }
        };

        put("query", self.query.as_deref().unwrap_or_default());
        if let Some(event) = &self.event {
            put("e", &event.name);
        }
        put("v", &self.v);
        put("sessionId", &self.session_id);
        put("lang", &self.lang);
        put("timezone", self.timezone.as_deref().unwrap_or_default());
        if let Some(location) = self.location {
            put("latitude", &location.latitude.to_string());
            put("longitude", &location.longitude.to_string());
        }
        if let Some(reset) = self.reset_contexts {
            put("resetContexts", if reset { "true" } else { "false" });
        }
        let names: Vec<&str> = self
            .contexts
            .iter()
            .map(|c| c.name.as_str())
            .filter(|n| !n.is_empty())
            .collect();
        put("contexts", &names.join(","));

        params
    }
}

/// Fulfillment produced for a matched intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    #[serde(default)]
    pub speech: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Information about the matched intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "flexible_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub webhook_used: Option<bool>,
    #[serde(
        default,
        deserialize_with = "flexible_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub webhook_for_slot_filling_used: Option<bool>,
}

/// Result of matching a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub source: String,
    /// The query as understood by the agent.
    #[serde(default)]
    pub resolved_query: String,
    /// Action of the matched intent.
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub action_incomplete: bool,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub contexts: Vec<Context>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment: Option<Fulfillment>,
    /// Matching confidence between 0 and 1.
    #[serde(default)]
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<QueryMetadata>,
}

/// Status block present on every API response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub error_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_timed_out: Option<bool>,
}

impl Status {
    /// True for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

/// Response of the query endpoint and of every mutating operation.
///
/// Mutations only populate `id` and `status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<QueryResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl QueryResponse {
    /// True unless the API reported a non-2xx status.
    pub fn is_success(&self) -> bool {
        self.status.as_ref().is_none_or(Status::is_success)
    }

    /// Speech of the fulfillment, if any.
    pub fn speech(&self) -> Option<&str> {
        self.result
            .as_ref()
            .and_then(|r| r.fulfillment.as_ref())
            .map(|f| f.speech.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PROTOCOL_V1 as PROTOCOL;
    use serde_json::json;

    #[test]
    fn test_context_round_trip() {
        let context = Context::new("booking", 3)
            .with_parameter("city", "Rome")
            .with_parameter("guests", 2);
        let encoded = serde_json::to_string(&context).unwrap();
        let decoded: Context = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, context);
    }

    #[test]
    fn test_context_omits_zero_lifespan() {
        let value = serde_json::to_value(Context::new("booking", 0)).unwrap();
        assert_eq!(value, json!({"name": "booking"}));
    }

    #[test]
    fn test_entity_round_trip() {
        let entity = Entity::new(
            "fruit",
            vec![
                Entry::new("apple", ["apple", "green apple"]),
                Entry::new("pear", Vec::<String>::new()),
            ],
        );
        let encoded = serde_json::to_string(&entity).unwrap();
        let decoded: Entity = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, entity);
    }

    #[test]
    fn test_intent_round_trip_from_api_json() {
        let raw = json!({
            "id": "a1b2",
            "name": "book.table",
            "auto": true,
            "contexts": ["booking"],
            "userSays": [{
                "data": [
                    {"text": "table for "},
                    {"text": "two", "alias": "guests", "meta": "@sys.number", "userDefined": true}
                ],
                "isTemplate": false,
                "count": 0
            }],
            "responses": [{
                "action": "book",
                "resetContexts": false,
                "affectedContexts": [{"name": "booked", "lifespan": 2}],
                "parameters": [{"name": "guests", "value": "$guests", "dataType": "@sys.number", "required": true}],
                "messages": [{"type": 0, "speech": "Done"}]
            }],
            "priority": 500000,
            "webhookUsed": false,
            "events": [{"name": "WELCOME"}]
        });

        let intent: Intent = serde_json::from_value(raw).unwrap();
        assert_eq!(intent.name, "book.table");
        assert_eq!(intent.user_says[0].data[1].alias.as_deref(), Some("guests"));
        assert!(intent.responses[0].parameters[0].required);

        let again: Intent = serde_json::from_value(serde_json::to_value(&intent).unwrap()).unwrap();
        assert_eq!(again, intent);
    }

    #[test]
    fn test_emptiness_predicates() {
        assert!(Entity::default().is_empty());
        assert!(!Entity::new("fruit", vec![]).is_empty());
        assert!(UserEntity::default().is_empty());
        assert!(!UserEntity::new("fruit", vec![]).is_empty());
        assert!(Intent::default().is_empty());
        assert!(!Intent::new("greet").is_empty());

        assert!(Query::default().is_empty());
        assert!(Query::text("   ").is_empty());
        assert!(Query::default().with_session_id("s1").is_empty());
        assert!(!Query::text("hello").is_empty());
        assert!(!Query::event(Event::new("WELCOME")).is_empty());
    }

    #[test]
    fn test_query_to_params() {
        let mut query = Query::text("hello").with_session_id("s1").with_lang("en");
        query.v = PROTOCOL.to_string();
        query.contexts = vec![Context::new("a", 1), Context::new("b", 1)];
        query.reset_contexts = Some(true);
        query.location = Some(Location {
            latitude: 1.5,
            longitude: -2.0,
        });

        let params = query.to_params();
        assert_eq!(params["query"], "hello");
        assert_eq!(params["sessionId"], "s1");
        assert_eq!(params["lang"], "en");
        assert_eq!(params["v"], PROTOCOL);
        assert_eq!(params["contexts"], "a,b");
        assert_eq!(params["resetContexts"], "true");
        assert_eq!(params["latitude"], "1.5");
        assert_eq!(params["longitude"], "-2");
        assert!(!params.contains_key("timezone"));
    }

    #[test]
    fn test_query_to_params_extra_does_not_override_known_fields() {
        let query = Query::text("hi")
            .with_param("query", "ignored")
            .with_param("count", 3)
            .with_param("tag", "x");
        let params = query.to_params();
        assert_eq!(params["query"], "hi");
        assert_eq!(params["count"], "3");
        assert_eq!(params["tag"], "x");
    }

    #[test]
    fn test_shadowing_params_are_dropped() {
        let mut query = Query::text("hi")
            .with_session_id("s1")
            .with_param("sessionId", "other")
            .with_param("v", "1")
            .with_param("source", "web");
        query.v = PROTOCOL.to_string();
        query.drop_shadowing_params();

        assert_eq!(query.extra.len(), 1);
        let encoded = serde_json::to_string(&query).unwrap();
        let decoded: Query = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, query);
        assert_eq!(decoded.session_id, "s1");
        assert_eq!(decoded.v, PROTOCOL);
    }

    #[test]
    fn test_query_event_param() {
        let params = Query::event(Event::new("WELCOME")).to_params();
        assert_eq!(params["e"], "WELCOME");
        assert!(!params.contains_key("query"));
    }

    #[test]
    fn test_query_body_serialization() {
        let query = Query::text("hello")
            .with_session_id("s1")
            .with_param("source", "web");
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            json!({"query": "hello", "sessionId": "s1", "source": "web"})
        );
    }

    #[test]
    fn test_query_response_decodes_string_flags() {
        let raw = json!({
            "id": "r1",
            "timestamp": "2017-07-12T10:00:00.000Z",
            "lang": "en",
            "result": {
                "source": "agent",
                "resolvedQuery": "hello",
                "action": "input.welcome",
                "actionIncomplete": false,
                "parameters": {},
                "contexts": [],
                "metadata": {
                    "intentId": "i1",
                    "webhookUsed": "false",
                    "webhookForSlotFillingUsed": "true",
                    "intentName": "Default Welcome Intent"
                },
                "fulfillment": {"speech": "Hi!", "messages": [{"type": 0, "speech": "Hi!"}]},
                "score": 1.0
            },
            "status": {"code": 200, "errorType": "success"},
            "sessionId": "s1"
        });

        let response: QueryResponse = serde_json::from_value(raw).unwrap();
        assert!(response.is_success());
        assert_eq!(response.speech(), Some("Hi!"));
        let metadata = response.result.as_ref().unwrap().metadata.as_ref().unwrap();
        assert_eq!(metadata.webhook_used, Some(false));
        assert_eq!(metadata.webhook_for_slot_filling_used, Some(true));
    }

    #[test]
    fn test_mutation_response_status() {
        let response: QueryResponse = serde_json::from_value(json!({
            "status": {"code": 400, "errorType": "bad_request", "errorDetails": "missing name"}
        }))
        .unwrap();
        assert!(!response.is_success());
        assert_eq!(
            response.status.unwrap().error_details.as_deref(),
            Some("missing name")
        );
    }
}
