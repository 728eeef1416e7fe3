use serde::{Deserialize, Serialize};

use super::row::table_row;

table_row! {
    /// A row of the `realtors` table, keyed by the auth user's id
    Profile
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileFields {
    pub fn company(company_name: impl Into<String>) -> Self {
        Self {
            company_name: Some(company_name.into()),
            ..Default::default()
        }
    }
}
