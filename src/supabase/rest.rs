use async_trait::async_trait;
use serde_json::{json, Value};
use uuid::Uuid;

use super::{Query, Supabase};
use crate::models::{
    Booking, Identity, NewBooking, NewProperty, Profile, ProfileFields, Property, PropertyFields,
    RowId,
};
use crate::store::{RecordStore, StoreError, StoreResult};

const PROPERTIES: &str = "properties";
const BOOKINGS: &str = "bookings";
const REALTORS: &str = "realtors";

fn first<T>(rows: Vec<T>) -> Option<T> {
    rows.into_iter().next()
}

#[async_trait]
impl RecordStore for Supabase {
    async fn list_properties(&self) -> StoreResult<Vec<Property>> {
        let query = Query::from(PROPERTIES).select("*");
        self.restricted.select(&query, None).await
    }

    async fn properties_of(&self, caller: &Identity) -> StoreResult<Vec<Property>> {
        let query = Query::from(PROPERTIES)
            .select("*")
            .eq("realtor_id", caller.id());
        self.restricted
            .select(&query, Some(caller.access_token.as_str()))
            .await
    }

    async fn find_property(&self, caller: &Identity, id: &RowId) -> StoreResult<Option<Property>> {
        let query = Query::from(PROPERTIES).select("*").eq("id", id);
        let rows = self
            .restricted
            .select(&query, Some(caller.access_token.as_str()))
            .await?;
        Ok(first(rows))
    }

    async fn insert_property(&self, caller: &Identity, new: &NewProperty) -> StoreResult<Property> {
        let query = Query::from(PROPERTIES).select("*");
        let rows = self
            .restricted
            .insert(&query, new, Some(caller.access_token.as_str()))
            .await?;
        first(rows).ok_or(StoreError::MissingRow(PROPERTIES))
    }

    async fn update_owned_property(
        &self,
        caller: &Identity,
        id: &RowId,
        fields: &PropertyFields,
    ) -> StoreResult<Option<Property>> {
        let query = Query::from(PROPERTIES)
            .select("*")
            .eq("id", id)
            .eq("realtor_id", caller.id());
        let rows = self
            .restricted
            .update(&query, fields, Some(caller.access_token.as_str()))
            .await?;
        Ok(first(rows))
    }

    async fn delete_owned_property(&self, caller: &Identity, id: &RowId) -> StoreResult<bool> {
        let query = Query::from(PROPERTIES)
            .select("id")
            .eq("id", id)
            .eq("realtor_id", caller.id());
        let rows: Vec<Value> = self
            .restricted
            .delete(&query, Some(caller.access_token.as_str()))
            .await?;
        Ok(!rows.is_empty())
    }

    async fn insert_booking(&self, new: &NewBooking) -> StoreResult<Booking> {
        let query = Query::from(BOOKINGS).select("*");
        let rows = self.restricted.insert(&query, new, None).await?;
        first(rows).ok_or(StoreError::MissingRow(BOOKINGS))
    }

    async fn find_booking(&self, caller: &Identity, id: &RowId) -> StoreResult<Option<Booking>> {
        let query = Query::from(BOOKINGS).select("*").eq("id", id);
        let rows = self
            .restricted
            .select(&query, Some(caller.access_token.as_str()))
            .await?;
        Ok(first(rows))
    }

    async fn bookings_for(
        &self,
        caller: &Identity,
        property_ids: &[RowId],
    ) -> StoreResult<Vec<Booking>> {
        let query = Query::from(BOOKINGS)
            .select("*")
            .in_list("property_id", property_ids);
        self.restricted
            .select(&query, Some(caller.access_token.as_str()))
            .await
    }

    async fn update_booking_status(
        &self,
        caller: &Identity,
        id: &RowId,
        property_id: &RowId,
        status: &str,
    ) -> StoreResult<Option<Booking>> {
        let query = Query::from(BOOKINGS)
            .select("*")
            .eq("id", id)
            .eq("property_id", property_id);
        let rows = self
            .restricted
            .update(&query, &json!({ "status": status }), Some(caller.access_token.as_str()))
            .await?;
        Ok(first(rows))
    }

    async fn profile(&self, caller: &Identity) -> StoreResult<Option<Profile>> {
        let query = Query::from(REALTORS).select("*").eq("id", caller.id());
        let rows = self
            .restricted
            .select(&query, Some(caller.access_token.as_str()))
            .await?;
        Ok(first(rows))
    }

    async fn update_profile(
        &self,
        caller: &Identity,
        fields: &ProfileFields,
    ) -> StoreResult<Option<Profile>> {
        let query = Query::from(REALTORS).select("*").eq("id", caller.id());
        let rows = self
            .restricted
            .update(&query, fields, Some(caller.access_token.as_str()))
            .await?;
        Ok(first(rows))
    }

    async fn set_company_name(&self, user_id: Uuid, company_name: &str) -> StoreResult<()> {
        // The realtors row is created by a database trigger on user creation
        let query = Query::from(REALTORS).select("id").eq("id", user_id);
        let _: Vec<Value> = self
            .elevated
            .update(&query, &ProfileFields::company(company_name), None)
            .await?;
        Ok(())
    }
}
