use serde::{Deserialize, Serialize};
use serde_json::Number;
use uuid::Uuid;

use super::row::table_row;
use super::RowId;

table_row! {
    /// A row of the `properties` table
    Property
}

impl Property {
    pub fn id(&self) -> Option<RowId> {
        self.key("id")
    }

    pub fn realtor_id(&self) -> Option<Uuid> {
        self.uuid("realtor_id")
    }

    pub fn is_owned_by(&self, realtor_id: Uuid) -> bool {
        self.realtor_id() == Some(realtor_id)
    }
}

/// Writable property columns. Absent fields are left out of the write; numbers
/// are forwarded exactly as the client wrote them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<Number>,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertyFields {
    pub fn is_empty(&self) -> bool {
        *self == PropertyFields::default()
    }
}

/// Insert payload: the submitted columns stamped with the owning realtor
#[derive(Debug, Clone, Serialize)]
pub struct NewProperty {
    #[serde(flatten)]
    pub fields: PropertyFields,
    pub realtor_id: Uuid,
}
