//! Seams to the hosted backend.
//!
//! `AuthService` covers credential checks and user administration;
//! `RecordStore` covers the three tables the API exposes. Writes that need an
//! owner check take the owner as part of their filter so the remote applies
//! check and write in one statement.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    Booking, Identity, NewBooking, NewProperty, Profile, ProfileFields, Property, PropertyFields,
    RowId, Session, User,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("remote returned {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("request to remote failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response from remote: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid remote url: {0}")]
    Url(#[from] url::ParseError),

    #[error("remote returned no row for {0}")]
    MissingRow(&'static str),
}

impl StoreError {
    /// Message suitable for an error body
    pub fn client_message(&self) -> String {
        match self {
            StoreError::Remote { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the remote answered and refused, as opposed to being unreachable
    pub fn is_rejection(&self) -> bool {
        matches!(self, StoreError::Remote { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to its user
    async fn user_for_token(&self, access_token: &str) -> StoreResult<User>;

    /// Password grant, performed with elevated privileges
    async fn sign_in(&self, email: &str, password: &str) -> StoreResult<Session>;

    /// Create a pre-confirmed user, performed with elevated privileges
    async fn create_user(&self, email: &str, password: &str) -> StoreResult<User>;

    async fn delete_user(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_properties(&self) -> StoreResult<Vec<Property>>;

    async fn properties_of(&self, caller: &Identity) -> StoreResult<Vec<Property>>;

    async fn find_property(&self, caller: &Identity, id: &RowId) -> StoreResult<Option<Property>>;

    async fn insert_property(&self, caller: &Identity, new: &NewProperty) -> StoreResult<Property>;

    /// Update the row only when `caller` owns it. `None` when nothing matched.
    async fn update_owned_property(
        &self,
        caller: &Identity,
        id: &RowId,
        fields: &PropertyFields,
    ) -> StoreResult<Option<Property>>;

    /// Delete the row only when `caller` owns it. `false` when nothing matched.
    async fn delete_owned_property(&self, caller: &Identity, id: &RowId) -> StoreResult<bool>;

    async fn insert_booking(&self, new: &NewBooking) -> StoreResult<Booking>;

    async fn find_booking(&self, caller: &Identity, id: &RowId) -> StoreResult<Option<Booking>>;

    async fn bookings_for(
        &self,
        caller: &Identity,
        property_ids: &[RowId],
    ) -> StoreResult<Vec<Booking>>;

    /// Set the status only while the booking still points at `property_id`
    async fn update_booking_status(
        &self,
        caller: &Identity,
        id: &RowId,
        property_id: &RowId,
        status: &str,
    ) -> StoreResult<Option<Booking>>;

    async fn profile(&self, caller: &Identity) -> StoreResult<Option<Profile>>;

    async fn update_profile(
        &self,
        caller: &Identity,
        fields: &ProfileFields,
    ) -> StoreResult<Option<Profile>>;

    /// Profile write made during signup, before the user holds a token
    async fn set_company_name(&self, user_id: Uuid, company_name: &str) -> StoreResult<()>;
}
