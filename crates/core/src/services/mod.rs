pub mod analytics_service;
pub mod budget_service;
pub mod chart_service;
pub mod chat_service;
pub mod currency_service;
pub mod expense_service;
pub mod goal_service;
pub mod import_service;
pub mod notification_service;
pub mod portfolio_service;
pub mod recurring_service;
pub mod report_service;
pub mod valuation_service;
