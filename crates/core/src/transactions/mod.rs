pub(crate) mod transactions_model;
pub(crate) mod transactions_repository;
pub(crate) mod transactions_service;
pub(crate) mod transactions_traits;

pub use transactions_model::{
    FundTransaction, NewFundTransaction, TransactionFilters, TxnType, TXN_TYPE_DEPOSIT,
    TXN_TYPE_DIVIDEND, TXN_TYPE_FEE, TXN_TYPE_INTEREST, TXN_TYPE_WITHDRAWAL,
};
pub use transactions_repository::TransactionRepository;
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
