use log::debug;
use std::sync::Arc;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::Result;

/// Service for managing accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl AccountServiceTrait for AccountService {
    fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        debug!("Creating account '{}'", new_account.name);
        self.repository.create(new_account)
    }

    fn update_account(&self, account_update: AccountUpdate) -> Result<Account> {
        account_update.validate()?;
        debug!("Renaming account {}", account_update.id);
        self.repository.update(account_update)
    }

    fn get_account(&self, account_id: i32) -> Result<Account> {
        self.repository.get_by_id(account_id)
    }

    fn list_accounts(&self) -> Result<Vec<Account>> {
        self.repository.list()
    }

    fn delete_account(&self, account_id: i32) -> Result<()> {
        debug!("Deleting account {}", account_id);
        self.repository.delete(account_id)
    }
}
