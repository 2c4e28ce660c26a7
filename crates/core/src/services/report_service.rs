use chrono::{DateTime, Utc};

use crate::models::expense::Expense;
use crate::models::goal::FinancialGoal;
use crate::models::holding::Holding;
use crate::models::recurring::RecurringExpense;
use crate::models::report::{FinancialReport, ReportOptions, ReportSection, ReportTable};
use crate::storage::keys::StorageKey;
use crate::storage::repository::Repository;
use crate::storage::store::Store;

use super::analytics_service::AnalyticsService;
use super::portfolio_service::{PortfolioKind, PortfolioService};
use super::recurring_service::RecurringExpenseService;

pub const REPORT_TITLE: &str = "Financial Report";
const RECENT_EXPENSES: usize = 10;

/// Assembles a renderer-agnostic report from the stored records.
pub struct ReportService {
    expenses: Repository<Vec<Expense>>,
    goals: Repository<Vec<FinancialGoal>>,
    stocks: PortfolioService,
    crypto: PortfolioService,
    recurring: RecurringExpenseService,
    analytics: AnalyticsService,
}

impl ReportService {
    pub fn new(store: Store) -> Self {
        Self {
            expenses: Repository::new(store.clone(), StorageKey::Expenses),
            goals: Repository::new(store.clone(), StorageKey::FinancialGoals),
            stocks: PortfolioService::new(store.clone(), PortfolioKind::Stock),
            crypto: PortfolioService::new(store.clone(), PortfolioKind::Crypto),
            recurring: RecurringExpenseService::new(store),
            analytics: AnalyticsService::new(),
        }
    }

    pub fn generate(&self, options: &ReportOptions, now: DateTime<Utc>) -> FinancialReport {
        let expenses = self.expenses.load();
        let goals = self.goals.load();
        let stocks = self.stocks.holdings();
        let cryptos = self.crypto.holdings();

        let mut sections = Vec::new();
        if options.include_health {
            sections.push(self.health_section(&expenses, &stocks, &cryptos, &goals, now));
        }
        if options.include_expenses {
            sections.push(expense_section(&expenses));
        }
        if options.include_stocks {
            sections.push(holdings_section(
                "Stock Portfolio",
                "No stock portfolio data available",
                &stocks,
            ));
        }
        if options.include_crypto {
            sections.push(holdings_section(
                "Cryptocurrency Portfolio",
                "No cryptocurrency data available",
                &cryptos,
            ));
        }
        if options.include_goals {
            sections.push(goal_section(&goals));
        }
        if options.include_recurring {
            sections.push(self.recurring_section());
        }

        log::debug!("Generated report with {} section(s)", sections.len());
        FinancialReport {
            title: REPORT_TITLE.to_string(),
            generated_on: now.date_naive(),
            sections,
        }
    }

    fn health_section(
        &self,
        expenses: &[Expense],
        stocks: &[Holding],
        cryptos: &[Holding],
        goals: &[FinancialGoal],
        now: DateTime<Utc>,
    ) -> ReportSection {
        let health = self
            .analytics
            .financial_health(expenses, stocks, cryptos, goals, now);

        let mut table = ReportTable::new(&["Metric", "Value"]);
        table.push_row(vec!["Health Score".into(), format!("{}/100", health.score)]);
        table.push_row(vec![
            "Total Portfolio Value".into(),
            format_money(health.portfolio_value),
        ]);
        table.push_row(vec![
            "Monthly Expenses".into(),
            format_money(health.monthly_expenses),
        ]);
        table.push_row(vec![
            "Emergency Fund".into(),
            format!("{:.1} months", health.emergency_fund_ratio),
        ]);
        ReportSection::with_table("Financial Health Summary", Vec::new(), table)
    }

    fn recurring_section(&self) -> ReportSection {
        let items: Vec<RecurringExpense> = self.recurring.list();
        if items.is_empty() {
            return ReportSection::empty("Recurring Expenses", "No recurring expenses available");
        }

        let monthly_total: f64 = items
            .iter()
            .map(|r| self.recurring.monthly_equivalent(r))
            .fold(0.0, |acc, v| acc + v);

        let mut table = ReportTable::new(&["Name", "Category", "Amount", "Frequency", "Next Due Date"]);
        for item in &items {
            table.push_row(vec![
                item.description.clone(),
                item.category.clone(),
                format_money(item.amount),
                item.frequency.to_string(),
                item.next_due_date.to_string(),
            ]);
        }
        ReportSection::with_table(
            "Recurring Expenses",
            vec![format!(
                "Total Monthly Recurring Expenses: {}",
                format_money(monthly_total)
            )],
            table,
        )
    }
}

fn expense_section(expenses: &[Expense]) -> ReportSection {
    if expenses.is_empty() {
        return ReportSection::empty("Recent Expenses", "No expense data available");
    }

    let mut recent: Vec<&Expense> = expenses.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));

    let mut table = ReportTable::new(&["Date", "Category", "Description", "Amount"]);
    for expense in recent.into_iter().take(RECENT_EXPENSES) {
        table.push_row(vec![
            expense.date.to_string(),
            expense.category.clone(),
            expense.description.clone(),
            format_money(expense.amount),
        ]);
    }
    ReportSection::with_table("Recent Expenses", Vec::new(), table)
}

fn holdings_section(title: &str, empty: &str, holdings: &[Holding]) -> ReportSection {
    if holdings.is_empty() {
        return ReportSection::empty(title, empty);
    }

    let total_value: f64 = holdings.iter().map(Holding::current_value).fold(0.0, |acc, v| acc + v);
    let total_cost: f64 = holdings.iter().map(Holding::cost_basis).fold(0.0, |acc, v| acc + v);
    let overall_return = if total_cost > 0.0 {
        (total_value - total_cost) / total_cost * 100.0
    } else {
        0.0
    };

    let mut table = ReportTable::new(&[
        "Symbol",
        "Name",
        "Quantity",
        "Purchase Price",
        "Current Price",
        "Value",
        "Gain/Loss",
    ]);
    for h in holdings {
        let cost = h.cost_basis();
        let gain = h.gain_loss();
        let gain_pct = if cost > 0.0 { gain / cost * 100.0 } else { 0.0 };
        table.push_row(vec![
            h.symbol.clone(),
            h.name.clone(),
            h.quantity.to_string(),
            format_money(h.purchase_price),
            format_money(h.current_price.unwrap_or(h.purchase_price)),
            format_money(h.current_value()),
            format!("{} ({gain_pct:.2}%)", format_money(gain)),
        ]);
    }

    ReportSection::with_table(
        title,
        vec![
            format!("Total Value: {}", format_money(total_value)),
            format!("Total Cost: {}", format_money(total_cost)),
            format!("Overall Return: {overall_return:.2}%"),
        ],
        table,
    )
}

fn goal_section(goals: &[FinancialGoal]) -> ReportSection {
    if goals.is_empty() {
        return ReportSection::empty("Financial Goals", "No financial goals available");
    }

    let mut table = ReportTable::new(&["Goal", "Category", "Target", "Current", "Progress", "Target Date"]);
    for goal in goals {
        let progress = if goal.target_amount > 0.0 {
            goal.saved_amount / goal.target_amount * 100.0
        } else {
            0.0
        };
        table.push_row(vec![
            goal.name.clone(),
            goal.category.clone(),
            format_money(goal.target_amount),
            format_money(goal.saved_amount),
            format!("{progress:.1}%"),
            goal.deadline.to_string(),
        ]);
    }
    ReportSection::with_table("Financial Goals", Vec::new(), table)
}

/// "$1,234.50", "-$12.00"
pub fn format_money(amount: f64) -> String {
    let cents = format!("{:.2}", amount.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}
