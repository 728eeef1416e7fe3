//! In-memory stand-in for the remote store, used by unit tests.
//!
//! Mirrors the remote behaviour the handlers rely on: column defaults on
//! insert, owner-filtered writes, tokens resolving to users. Every write that
//! reaches a table bumps `mutations()`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::models::{
    Booking, Identity, NewBooking, NewProperty, Profile, ProfileFields, Property, PropertyFields,
    Row, RowId, Session, User,
};
use crate::state::AppState;
use crate::store::{AuthService, RecordStore, StoreError, StoreResult};

#[derive(Default)]
struct Tables {
    accounts: HashMap<String, (String, User)>,
    tokens: HashMap<String, User>,
    properties: Vec<Property>,
    bookings: Vec<Booking>,
    profiles: Vec<Profile>,
    next_id: i64,
    mutations: usize,
    deleted_users: Vec<Uuid>,
    fail_profile_writes: bool,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

fn row(value: Value) -> Row {
    serde_json::from_value(value).expect("test rows are json objects")
}

/// Overlay the columns present in `changes`, the way a PATCH does
fn merge<T: Serialize>(target: &mut Row, changes: &T) {
    if let Value::Object(columns) = serde_json::to_value(changes).expect("patch serializes") {
        for (column, value) in columns {
            target.insert(column, value);
        }
    }
}

fn profile_row(id: Uuid, email: &str) -> Profile {
    row(json!({ "id": id, "name": null, "company_name": null, "email": email })).into()
}

#[derive(Default)]
pub struct MemoryBackend {
    tables: Mutex<Tables>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory backend lock poisoned")
    }

    /// Register a realtor with a live token and an empty profile row
    pub fn realtor(&self, token: &str, email: &str) -> Identity {
        let user = User::new(Uuid::new_v4(), email);
        let mut tables = self.lock();
        tables.tokens.insert(token.to_string(), user.clone());
        tables.profiles.push(profile_row(user.id, email));
        Identity {
            user,
            access_token: token.to_string(),
        }
    }

    /// An account that can sign in with a password but has no profile row
    pub fn account(&self, email: &str, password: &str) -> User {
        let user = User::new(Uuid::new_v4(), email);
        self.lock()
            .accounts
            .insert(email.to_string(), (password.to_string(), user.clone()));
        user
    }

    pub fn add_property(&self, owner: &Identity, title: &str) -> RowId {
        let mut tables = self.lock();
        let id = tables.next_id();
        tables.properties.push(
            row(json!({
                "id": id,
                "title": title,
                "location": "Harbour",
                "price": 250000,
                "bedrooms": 2,
                "realtor_id": owner.id()
            }))
            .into(),
        );
        RowId::Int(id)
    }

    fn push_booking(&self, property_id: Value, customer: &str) -> RowId {
        let mut tables = self.lock();
        let id = tables.next_id();
        tables.bookings.push(
            row(json!({
                "id": id,
                "property_id": property_id,
                "customer_name": customer,
                "customer_email": format!("{}@example.com", customer.to_lowercase()),
                "booking_date": "2025-06-01",
                "booking_time": "10:30",
                "status": "pending",
                "created_at": Utc::now()
            }))
            .into(),
        );
        RowId::Int(id)
    }

    pub fn add_booking(&self, property_id: &RowId, customer: &str) -> RowId {
        self.push_booking(json!(property_id), customer)
    }

    /// A booking whose property reference is null
    pub fn add_orphan_booking(&self, customer: &str) -> RowId {
        self.push_booking(Value::Null, customer)
    }

    pub fn transfer_property(&self, id: &RowId, to: &Identity) {
        let mut tables = self.lock();
        if let Some(p) = tables.properties.iter_mut().find(|p| p.id().as_ref() == Some(id)) {
            p.insert("realtor_id", json!(to.id()));
        }
    }

    pub fn property(&self, id: &RowId) -> Option<Property> {
        self.lock()
            .properties
            .iter()
            .find(|p| p.id().as_ref() == Some(id))
            .cloned()
    }

    pub fn booking(&self, id: &RowId) -> Option<Booking> {
        self.lock()
            .bookings
            .iter()
            .find(|b| b.id().as_ref() == Some(id))
            .cloned()
    }

    pub fn profile_of(&self, user_id: Uuid) -> Option<Profile> {
        self.lock()
            .profiles
            .iter()
            .find(|p| p.uuid("id") == Some(user_id))
            .cloned()
    }

    pub fn booking_count(&self) -> usize {
        self.lock().bookings.len()
    }

    pub fn mutations(&self) -> usize {
        self.lock().mutations
    }

    pub fn deleted_users(&self) -> Vec<Uuid> {
        self.lock().deleted_users.clone()
    }

    pub fn fail_profile_writes(&self) {
        self.lock().fail_profile_writes = true;
    }
}

fn refused(status: u16, message: &str) -> StoreError {
    StoreError::Remote {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl AuthService for MemoryBackend {
    async fn user_for_token(&self, access_token: &str) -> StoreResult<User> {
        self.lock()
            .tokens
            .get(access_token)
            .cloned()
            .ok_or_else(|| refused(401, "invalid JWT"))
    }

    async fn sign_in(&self, email: &str, password: &str) -> StoreResult<Session> {
        let mut tables = self.lock();
        let user = match tables.accounts.get(email) {
            Some((expected, user)) if expected == password => user.clone(),
            _ => return Err(refused(400, "Invalid login credentials")),
        };
        let token = format!("token-{}", user.id);
        tables.tokens.insert(token.clone(), user.clone());
        let attributes = json!({
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh"
        });
        Ok(Session {
            access_token: token,
            user,
            attributes: serde_json::from_value(attributes).expect("object literal"),
        })
    }

    async fn create_user(&self, email: &str, password: &str) -> StoreResult<User> {
        let mut tables = self.lock();
        if tables.accounts.contains_key(email) {
            return Err(refused(422, "User already registered"));
        }
        let user = User::new(Uuid::new_v4(), email);
        tables
            .accounts
            .insert(email.to_string(), (password.to_string(), user.clone()));
        // what the on-signup trigger does remotely
        tables.profiles.push(profile_row(user.id, email));
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.lock();
        tables.accounts.retain(|_, (_, user)| user.id != id);
        tables.profiles.retain(|p| p.uuid("id") != Some(id));
        tables.deleted_users.push(id);
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryBackend {
    async fn list_properties(&self) -> StoreResult<Vec<Property>> {
        Ok(self.lock().properties.clone())
    }

    async fn properties_of(&self, caller: &Identity) -> StoreResult<Vec<Property>> {
        Ok(self
            .lock()
            .properties
            .iter()
            .filter(|p| p.is_owned_by(caller.id()))
            .cloned()
            .collect())
    }

    async fn find_property(&self, _caller: &Identity, id: &RowId) -> StoreResult<Option<Property>> {
        Ok(self.property(id))
    }

    async fn insert_property(&self, _caller: &Identity, new: &NewProperty) -> StoreResult<Property> {
        let mut tables = self.lock();
        let id = tables.next_id();
        let mut property = Property::default();
        property.insert("id", id);
        merge(&mut property, new);
        property.insert("created_at", json!(Utc::now()));
        tables.properties.push(property.clone());
        tables.mutations += 1;
        Ok(property)
    }

    async fn update_owned_property(
        &self,
        caller: &Identity,
        id: &RowId,
        fields: &PropertyFields,
    ) -> StoreResult<Option<Property>> {
        let mut tables = self.lock();
        let Some(property) = tables
            .properties
            .iter_mut()
            .find(|p| p.id().as_ref() == Some(id) && p.is_owned_by(caller.id()))
        else {
            return Ok(None);
        };
        merge(property, fields);
        let property = property.clone();
        tables.mutations += 1;
        Ok(Some(property))
    }

    async fn delete_owned_property(&self, caller: &Identity, id: &RowId) -> StoreResult<bool> {
        let mut tables = self.lock();
        let before = tables.properties.len();
        tables
            .properties
            .retain(|p| !(p.id().as_ref() == Some(id) && p.is_owned_by(caller.id())));
        let deleted = tables.properties.len() < before;
        if deleted {
            tables.mutations += 1;
        }
        Ok(deleted)
    }

    async fn insert_booking(&self, new: &NewBooking) -> StoreResult<Booking> {
        let mut tables = self.lock();
        let id = tables.next_id();
        let mut booking = Booking::default();
        booking.insert("id", id);
        merge(&mut booking, new);
        booking.insert("status", "pending");
        booking.insert("created_at", json!(Utc::now()));
        tables.bookings.push(booking.clone());
        tables.mutations += 1;
        Ok(booking)
    }

    async fn find_booking(&self, _caller: &Identity, id: &RowId) -> StoreResult<Option<Booking>> {
        Ok(self.booking(id))
    }

    async fn bookings_for(
        &self,
        _caller: &Identity,
        property_ids: &[RowId],
    ) -> StoreResult<Vec<Booking>> {
        Ok(self
            .lock()
            .bookings
            .iter()
            .filter(|b| b.property_id().map_or(false, |p| property_ids.contains(&p)))
            .cloned()
            .collect())
    }

    async fn update_booking_status(
        &self,
        _caller: &Identity,
        id: &RowId,
        property_id: &RowId,
        status: &str,
    ) -> StoreResult<Option<Booking>> {
        let mut tables = self.lock();
        let Some(booking) = tables.bookings.iter_mut().find(|b| {
            b.id().as_ref() == Some(id) && b.property_id().as_ref() == Some(property_id)
        }) else {
            return Ok(None);
        };
        booking.insert("status", status);
        let booking = booking.clone();
        tables.mutations += 1;
        Ok(Some(booking))
    }

    async fn profile(&self, caller: &Identity) -> StoreResult<Option<Profile>> {
        Ok(self.profile_of(caller.id()))
    }

    async fn update_profile(
        &self,
        caller: &Identity,
        fields: &ProfileFields,
    ) -> StoreResult<Option<Profile>> {
        let mut tables = self.lock();
        let Some(profile) = tables
            .profiles
            .iter_mut()
            .find(|p| p.uuid("id") == Some(caller.id()))
        else {
            return Ok(None);
        };
        merge(profile, fields);
        let profile = profile.clone();
        tables.mutations += 1;
        Ok(Some(profile))
    }

    async fn set_company_name(&self, user_id: Uuid, company_name: &str) -> StoreResult<()> {
        let mut tables = self.lock();
        if tables.fail_profile_writes {
            return Err(refused(500, "permission denied for table realtors"));
        }
        if let Some(profile) = tables
            .profiles
            .iter_mut()
            .find(|p| p.uuid("id") == Some(user_id))
        {
            profile.insert("company_name", company_name);
            tables.mutations += 1;
        }
        Ok(())
    }
}

/// App state wired to `backend`, with a dashboard-enabled development config
pub fn state_with(backend: Arc<MemoryBackend>) -> AppState {
    state_with_env(backend, &[])
}

pub fn state_with_env(backend: Arc<MemoryBackend>, extra: &[(&str, &str)]) -> AppState {
    let mut vars: HashMap<String, String> = [
        ("SUPABASE_URL", "http://127.0.0.1:54321"),
        ("SUPABASE_ANON_KEY", "anon-key"),
        ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    let config = AppConfig::from_lookup(|name| vars.get(name).cloned())
        .expect("test config should load");
    AppState::new(config, backend.clone(), backend)
}
