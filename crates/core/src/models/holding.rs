use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One position in a stock or crypto portfolio.
///
/// Holdings are unique by insertion, not by symbol: buying the same
/// instrument twice yields two entries unless they are explicitly merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Unique identifier
    pub id: Uuid,

    /// Ticker symbol, uppercased (e.g., "AAPL", "BTC")
    pub symbol: String,

    /// Human-readable name (e.g., "Apple Inc.")
    pub name: String,

    /// Units held (never negative)
    pub quantity: f64,

    /// Acquisition price per unit
    pub purchase_price: f64,

    /// Latest known market price per unit, if a quote was ever fetched
    #[serde(default, alias = "current_price")]
    pub current_price: Option<f64>,

    /// When the position was opened
    pub purchase_date: DateTime<Utc>,
}

impl Holding {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        quantity: f64,
        purchase_price: f64,
        purchase_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into().trim().to_uppercase(),
            name: name.into(),
            quantity,
            purchase_price,
            current_price: None,
            purchase_date,
        }
    }

    /// Attach a live quote.
    pub fn with_current_price(mut self, price: f64) -> Self {
        self.current_price = Some(price);
        self
    }

    /// quantity × acquisition price
    pub fn cost_basis(&self) -> f64 {
        self.quantity * self.purchase_price
    }

    /// quantity × current price, falling back to the acquisition price
    /// when no quote is known (zero unrealized change).
    pub fn current_value(&self) -> f64 {
        self.quantity * self.current_price.unwrap_or(self.purchase_price)
    }

    pub fn gain_loss(&self) -> f64 {
        self.current_value() - self.cost_basis()
    }
}

/// Form input for a new holding, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    pub symbol: String,
    pub name: String,
    pub quantity: f64,
    pub purchase_price: f64,
    #[serde(default)]
    pub current_price: Option<f64>,
}
