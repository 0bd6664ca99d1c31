use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::app_settings;

use super::settings_model::AppSetting;

/// Trait defining the contract for the flat key-value settings store.
pub trait SettingsRepositoryTrait: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn list(&self) -> Result<Vec<AppSetting>>;
}

pub struct SettingsRepository {
    pool: Arc<DbPool>,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl SettingsRepositoryTrait for SettingsRepository {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;

        Ok(app_settings::table
            .find(key)
            .select(app_settings::setting_value)
            .first::<String>(&mut conn)
            .optional()?)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        diesel::replace_into(app_settings::table)
            .values(AppSetting {
                setting_key: key.to_string(),
                setting_value: value.to_string(),
            })
            .execute(&mut conn)?;

        Ok(())
    }

    fn list(&self) -> Result<Vec<AppSetting>> {
        let mut conn = get_connection(&self.pool)?;

        Ok(app_settings::table
            .order(app_settings::setting_key.asc())
            .load::<AppSetting>(&mut conn)?)
    }
}
