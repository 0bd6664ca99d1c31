use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use super::settings_model::{AppSetting, SETTING_INSTANCE_ID, SETTING_PRICE_UPDATES_ENABLED};
use super::settings_repository::SettingsRepositoryTrait;
use crate::errors::Result;

/// Trait defining the contract for Settings service operations.
pub trait SettingsServiceTrait: Send + Sync {
    fn get_setting(&self, key: &str) -> Result<Option<String>>;
    fn update_setting(&self, key: &str, value: &str) -> Result<()>;
    fn list_settings(&self) -> Result<Vec<AppSetting>>;

    /// Whether live quote lookups are allowed. Defaults on.
    fn price_updates_enabled(&self) -> Result<bool>;

    /// Stable anonymous id for this installation, generated on first
    /// read.
    fn instance_id(&self) -> Result<String>;
}

pub struct SettingsService {
    repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl SettingsServiceTrait for SettingsService {
    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.repository.get(key)
    }

    fn update_setting(&self, key: &str, value: &str) -> Result<()> {
        debug!("Updating setting {}", key);
        self.repository.set(key, value)
    }

    fn list_settings(&self) -> Result<Vec<AppSetting>> {
        self.repository.list()
    }

    fn price_updates_enabled(&self) -> Result<bool> {
        Ok(self
            .repository
            .get(SETTING_PRICE_UPDATES_ENABLED)?
            .map(|value| value == "true")
            .unwrap_or(true))
    }

    fn instance_id(&self) -> Result<String> {
        if let Some(id) = self.repository.get(SETTING_INSTANCE_ID)? {
            return Ok(id);
        }
        let id = Uuid::new_v4().to_string();
        self.repository.set(SETTING_INSTANCE_ID, &id)?;
        Ok(id)
    }
}
