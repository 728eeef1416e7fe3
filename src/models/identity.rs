use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// An auth user as returned by the remote auth service. Only `id` is
/// interpreted; every other attribute is handed back as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl User {
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        let mut attributes = Map::new();
        attributes.insert("email".to_string(), json!(email.into()));
        attributes.insert("role".to_string(), json!("authenticated"));
        Self { id, attributes }
    }

    pub fn email(&self) -> Option<&str> {
        self.attributes.get("email").and_then(Value::as_str)
    }
}

/// Token grant issued on password sign-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: User,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Login result handed back to the client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthSession {
    pub user: User,
    pub session: Session,
}

impl From<Session> for AuthSession {
    fn from(session: Session) -> Self {
        Self {
            user: session.user.clone(),
            session,
        }
    }
}

/// Authenticated caller, resolved per request from its bearer token
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
    pub access_token: String,
}

impl Identity {
    pub fn id(&self) -> Uuid {
        self.user.id
    }
}
