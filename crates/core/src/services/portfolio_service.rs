use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::analytics::PortfolioSummary;
use crate::models::chart::{ChartPoint, TimeRange};
use crate::models::history::{HistorySample, PortfolioState};
use crate::models::holding::{Holding, NewHolding};
use crate::storage::keys::StorageKey;
use crate::storage::repository::PortfolioRepository;
use crate::storage::store::Store;

use super::chart_service::ChartService;
use super::valuation_service::ValuationService;

/// Which of the two portfolios a service manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortfolioKind {
    Stock,
    Crypto,
}

impl PortfolioKind {
    pub fn storage_key(&self) -> StorageKey {
        match self {
            PortfolioKind::Stock => StorageKey::StockPortfolio,
            PortfolioKind::Crypto => StorageKey::CryptoPortfolio,
        }
    }
}

impl std::fmt::Display for PortfolioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortfolioKind::Stock => write!(f, "stock"),
            PortfolioKind::Crypto => write!(f, "crypto"),
        }
    }
}

/// Manages one portfolio's holdings and its valuation history.
///
/// Every mutation re-values the portfolio, records a sample when the
/// value moved (or went stale) and persists holdings and history in
/// one write.
pub struct PortfolioService {
    kind: PortfolioKind,
    repo: PortfolioRepository,
    valuation: ValuationService,
    charts: ChartService,
}

impl PortfolioService {
    pub fn new(store: Store, kind: PortfolioKind) -> Self {
        let mut repo = PortfolioRepository::new(store, kind.storage_key());
        if kind == PortfolioKind::Stock {
            repo = repo.with_legacy_history(StorageKey::StockPortfolioHistory);
        }
        Self {
            kind,
            repo,
            valuation: ValuationService::new(),
            charts: ChartService::new(),
        }
    }

    pub fn kind(&self) -> PortfolioKind {
        self.kind
    }

    pub fn state(&self) -> PortfolioState {
        self.repo.load()
    }

    pub fn holdings(&self) -> Vec<Holding> {
        self.repo.load().holdings
    }

    pub fn history(&self) -> Vec<HistorySample> {
        self.repo.load().history
    }

    /// Record the initial sample of a fresh portfolio (value 0 when empty).
    /// No-op when history already exists.
    pub fn initialize(&self, now: DateTime<Utc>) {
        self.repo.update(|state| {
            if state.history.is_empty() {
                let value = self.valuation.compute_current_value(&state.holdings);
                self.valuation
                    .record_sample_if_significant(&mut state.history, value, now);
            }
        });
    }

    /// Append a new holding. Repeated symbols accumulate as separate entries.
    pub fn add_holding(&self, new: NewHolding, now: DateTime<Utc>) -> Result<Holding, CoreError> {
        let holding = Self::build_holding(new, now)?;
        log::debug!("Adding {} holding {} ({})", self.kind, holding.symbol, holding.id);

        let added = holding.clone();
        self.mutate(now, |state| state.holdings.push(holding));
        Ok(added)
    }

    /// Consolidate into an existing holding with the same symbol, if any.
    ///
    /// Quantities add up, the acquisition price becomes the
    /// quantity-weighted average, and the incoming current price (when
    /// present) replaces the old one. Without a match this appends.
    pub fn merge_holding(&self, new: NewHolding, now: DateTime<Utc>) -> Result<Holding, CoreError> {
        let incoming = Self::build_holding(new, now)?;

        let merged = self.mutate(now, |state| {
            match state
                .holdings
                .iter_mut()
                .find(|h| h.symbol == incoming.symbol)
            {
                Some(existing) => {
                    let total_qty = existing.quantity + incoming.quantity;
                    if total_qty > 0.0 {
                        existing.purchase_price = (existing.cost_basis() + incoming.cost_basis())
                            / total_qty;
                    }
                    existing.quantity = total_qty;
                    if incoming.current_price.is_some() {
                        existing.current_price = incoming.current_price;
                    }
                    existing.clone()
                }
                None => {
                    state.holdings.push(incoming.clone());
                    incoming
                }
            }
        });
        Ok(merged)
    }

    pub fn remove_holding(&self, id: Uuid, now: DateTime<Utc>) -> Result<Holding, CoreError> {
        self.try_mutate(now, |state| {
            let idx = state
                .holdings
                .iter()
                .position(|h| h.id == id)
                .ok_or_else(|| CoreError::RecordNotFound(format!("holding {id}")))?;
            Ok(state.holdings.remove(idx))
        })
    }

    /// Apply a live quote to every holding with `symbol`.
    /// Returns the number of holdings updated.
    pub fn update_current_price(
        &self,
        symbol: &str,
        price: f64,
        now: DateTime<Utc>,
    ) -> Result<usize, CoreError> {
        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Invalid price {price} for {symbol}"
            )));
        }
        let symbol = symbol.trim().to_uppercase();

        Ok(self.mutate(now, |state| {
            let mut updated = 0;
            for holding in state.holdings.iter_mut().filter(|h| h.symbol == symbol) {
                holding.current_price = Some(price);
                updated += 1;
            }
            updated
        }))
    }

    pub fn summary(&self) -> PortfolioSummary {
        self.valuation.summarize(&self.holdings())
    }

    pub fn chart(&self, range: &TimeRange, now: DateTime<Utc>) -> Vec<ChartPoint> {
        self.charts.bucket_history(&self.history(), range, now)
    }

    fn build_holding(new: NewHolding, now: DateTime<Utc>) -> Result<Holding, CoreError> {
        if new.symbol.trim().is_empty() {
            return Err(CoreError::ValidationError("Symbol is required".into()));
        }
        if !new.quantity.is_finite() || new.quantity <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Quantity must be positive, got {}",
                new.quantity
            )));
        }
        if !new.purchase_price.is_finite() || new.purchase_price < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Purchase price must not be negative, got {}",
                new.purchase_price
            )));
        }

        let mut holding = Holding::new(new.symbol, new.name, new.quantity, new.purchase_price, now);
        holding.current_price = new.current_price;
        Ok(holding)
    }

    fn mutate<R>(&self, now: DateTime<Utc>, f: impl FnOnce(&mut PortfolioState) -> R) -> R {
        self.repo.update(|state| {
            let result = f(state);
            self.revalue(state, now);
            result
        })
    }

    fn try_mutate<R>(
        &self,
        now: DateTime<Utc>,
        f: impl FnOnce(&mut PortfolioState) -> Result<R, CoreError>,
    ) -> Result<R, CoreError> {
        let mut state = self.repo.load();
        let result = f(&mut state)?;
        self.revalue(&mut state, now);
        self.repo.save(&state);
        Ok(result)
    }

    fn revalue(&self, state: &mut PortfolioState, now: DateTime<Utc>) {
        let value = self.valuation.compute_current_value(&state.holdings);
        if self
            .valuation
            .record_sample_if_significant(&mut state.history, value, now)
        {
            log::debug!("Recorded {} portfolio sample: {value:.2}", self.kind);
        }
    }
}
