use chrono::{DateTime, NaiveDate};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::expense::{Expense, DEFAULT_CURRENCY};
use crate::models::import::{ColumnMapping, CsvRow};
use crate::storage::keys::StorageKey;
use crate::storage::repository::Repository;
use crate::storage::store::Store;

pub const DEFAULT_IMPORT_CATEGORY: &str = "Other";

/// Date layouts tried in order after ISO and RFC 3339.
const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%d.%m.%Y"];

/// Turns already-parsed CSV rows into expenses.
pub struct ImportService {
    expenses: Repository<Vec<Expense>>,
}

impl ImportService {
    pub fn new(store: Store) -> Self {
        Self {
            expenses: Repository::new(store, StorageKey::Expenses),
        }
    }

    /// Map rows to expenses without storing them.
    ///
    /// Rows whose amount cannot be parsed are skipped. Unparsable dates
    /// fall back to `today`.
    pub fn map_rows(
        &self,
        rows: &[CsvRow],
        mapping: &ColumnMapping,
        today: NaiveDate,
    ) -> Result<Vec<Expense>, CoreError> {
        if mapping.date.is_empty() || mapping.description.is_empty() || mapping.amount.is_empty() {
            return Err(CoreError::ValidationError(
                "Please map the required columns (Date, Description, and Amount)".into(),
            ));
        }

        let mut mapped = Vec::with_capacity(rows.len());
        for (line, row) in rows.iter().enumerate() {
            let raw_amount = row.get(&mapping.amount).map(String::as_str).unwrap_or("");
            let Some(amount) = parse_amount(raw_amount) else {
                log::warn!("Skipping row {}: unparsable amount '{raw_amount}'", line + 1);
                continue;
            };

            let date = row
                .get(&mapping.date)
                .and_then(|d| parse_date(d))
                .unwrap_or(today);

            let category = column(row, mapping.category.as_deref())
                .unwrap_or_else(|| DEFAULT_IMPORT_CATEGORY.to_string());
            let currency = column(row, mapping.currency.as_deref())
                .map(|c| c.to_uppercase())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

            mapped.push(Expense {
                id: Uuid::new_v4(),
                amount,
                category,
                currency,
                date,
                description: row
                    .get(&mapping.description)
                    .map(|d| d.trim().to_string())
                    .unwrap_or_default(),
            });
        }
        Ok(mapped)
    }

    /// Map and append to the expense store in one write.
    /// Returns the number of imported expenses.
    pub fn import(
        &self,
        rows: &[CsvRow],
        mapping: &ColumnMapping,
        today: NaiveDate,
    ) -> Result<usize, CoreError> {
        let mapped = self.map_rows(rows, mapping, today)?;
        let count = mapped.len();
        if count > 0 {
            self.expenses.update(|list| list.extend(mapped));
        }
        log::info!("Imported {count} of {} row(s)", rows.len());
        Ok(count)
    }
}

/// Non-empty trimmed cell of an optional column.
fn column(row: &CsvRow, name: Option<&str>) -> Option<String> {
    let value = row.get(name?)?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Keep digits, '.' and '-', then take the absolute value.
/// "$-1,234.50" → 1234.5
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .map(f64::abs)
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}
