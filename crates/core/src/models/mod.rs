pub mod analytics;
pub mod budget;
pub mod chart;
pub mod chat;
mod date_input;
pub mod expense;
pub mod goal;
pub mod history;
pub mod holding;
pub mod import;
pub mod market;
pub mod notification;
pub mod recurring;
pub mod report;
