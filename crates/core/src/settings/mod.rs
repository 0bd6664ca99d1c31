pub(crate) mod settings_model;
pub(crate) mod settings_repository;
pub(crate) mod settings_service;

pub use settings_model::{AppSetting, SETTING_INSTANCE_ID, SETTING_PRICE_UPDATES_ENABLED};
pub use settings_repository::{SettingsRepository, SettingsRepositoryTrait};
pub use settings_service::{SettingsService, SettingsServiceTrait};
