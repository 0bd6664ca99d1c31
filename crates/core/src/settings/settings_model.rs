use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Keys the core itself reads. The API layer may store any other key it
/// likes; those pass through untyped.
pub const SETTING_PRICE_UPDATES_ENABLED: &str = "price_updates_enabled";
pub const SETTING_INSTANCE_ID: &str = "instance_id";

/// Database model for one setting row
#[derive(Queryable, Identifiable, Insertable, Selectable, Serialize, Deserialize, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::app_settings)]
#[diesel(primary_key(setting_key))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct AppSetting {
    pub setting_key: String,
    pub setting_value: String,
}
