use serde::Serialize;
use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::chat::{ChatMessage, ChatRequest, UserDataSnapshot};
use crate::providers::traits::ChatCompletionProvider;

/// Rules appended to every system instruction.
pub const ANSWER_RULES: [&str; 8] = [
    "ONLY use this real data provided above",
    "DO NOT make up or imagine any data",
    "If data exists, provide specific calculations and insights",
    "If specific data is not available, clearly state what information you have and what's missing",
    "Use exact numbers from the data when available",
    "For expenses, consider the category, amount, and date",
    "For stocks, consider quantity, purchase price, and current value",
    "Always format currency values with 2 decimal places",
];

/// Answers finance questions grounded in the user's own records.
pub struct ChatService {
    provider: Arc<dyn ChatCompletionProvider>,
}

impl ChatService {
    pub fn new(provider: Arc<dyn ChatCompletionProvider>) -> Self {
        Self { provider }
    }

    /// Prepend the data-bearing system instruction and forward the
    /// conversation. Requires `user_data`.
    pub async fn respond(&self, request: ChatRequest) -> Result<ChatMessage, CoreError> {
        let user_data = request
            .user_data
            .ok_or_else(|| CoreError::ValidationError("User data is required".into()))?;

        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(ChatMessage::system(build_system_prompt(&user_data)?));
        messages.extend(request.messages);

        log::debug!(
            "Forwarding {} message(s) to {}",
            messages.len(),
            self.provider.name()
        );
        self.provider.complete(&messages).await
    }
}

/// The system instruction embedding `data` verbatim.
pub fn build_system_prompt(data: &UserDataSnapshot) -> Result<String, CoreError> {
    let rules: String = ANSWER_RULES
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{}. {rule}\n", i + 1))
        .collect();

    Ok(format!(
        "You are a helpful financial advisor chatbot. You have access to the user's financial data:\n\n\
         Expenses: {}\n\
         Stock Portfolio: {}\n\
         Stock History: {}\n\
         Crypto Portfolio: {}\n\n\
         Total Expenses: ${:.2}\n\
         Portfolio Value: ${:.2}\n\n\
         When answering questions about the user's finances:\n\
         {rules}\n\
         Remember: Your role is to provide accurate financial insights based ONLY on the actual data shown above.",
        to_json(&data.expenses)?,
        to_json(&data.stock_portfolio)?,
        to_json(&data.stock_history)?,
        to_json(&data.crypto_portfolio)?,
        data.total_expenses(),
        data.portfolio_value(),
    ))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CoreError> {
    serde_json::to_string(value)
        .map_err(|e| CoreError::Serialization(format!("Failed to embed user data: {e}")))
}
