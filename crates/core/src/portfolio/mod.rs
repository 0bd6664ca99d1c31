pub(crate) mod portfolio_calculator;
pub(crate) mod portfolio_model;
pub(crate) mod portfolio_service;

pub use portfolio_calculator::{
    cash_totals, monthly_breakdown, realized_options_pnl, realized_stock_gains, summarize,
    unrealized_stock_gains, CashTotals,
};
pub use portfolio_model::{MonthlyBreakdownRow, PortfolioFilters, PortfolioSummary};
pub use portfolio_service::PortfolioService;
