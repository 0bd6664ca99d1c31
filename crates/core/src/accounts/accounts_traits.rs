//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
pub trait AccountRepositoryTrait: Send + Sync {
    fn create(&self, new_account: NewAccount) -> Result<Account>;
    fn update(&self, account_update: AccountUpdate) -> Result<Account>;
    fn get_by_id(&self, account_id: i32) -> Result<Account>;
    fn list(&self) -> Result<Vec<Account>>;

    /// Deletes an account, failing with a conflict error while any trade,
    /// position, stock, or fund transaction still references it.
    fn delete(&self, account_id: i32) -> Result<()>;
}

/// Trait defining the contract for Account service operations.
pub trait AccountServiceTrait: Send + Sync {
    fn create_account(&self, new_account: NewAccount) -> Result<Account>;
    fn update_account(&self, account_update: AccountUpdate) -> Result<Account>;
    fn get_account(&self, account_id: i32) -> Result<Account>;
    fn list_accounts(&self) -> Result<Vec<Account>>;
    fn delete_account(&self, account_id: i32) -> Result<()>;
}
