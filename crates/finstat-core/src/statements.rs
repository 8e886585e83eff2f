use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Balance sheet for a single fiscal year.
///
/// All amounts are in the company's reporting currency, minor-unit free
/// (whole euros in the builtin dataset). Everything except `equity` is
/// non-negative; `equity` may turn negative after accumulated losses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Intangible fixed assets (goodwill, capitalised software)
    pub intangible_fixed_assets: Money,
    /// Tangible fixed assets (property, equipment)
    pub tangible_fixed_assets: Money,
    /// Financial fixed assets (long-term participations, loans granted)
    pub financial_fixed_assets: Money,
    /// Receivables and accrued assets
    pub receivables: Money,
    /// Cash and cash equivalents
    pub cash: Money,
    /// Equity
    pub equity: Money,
    /// Current liabilities
    pub current_liabilities: Money,
}

impl BalanceSheet {
    /// Intangible + tangible + financial long-term holdings.
    pub fn fixed_assets(&self) -> Money {
        self.intangible_fixed_assets + self.tangible_fixed_assets + self.financial_fixed_assets
    }

    /// Receivables + cash: assets convertible within one year.
    pub fn current_assets(&self) -> Money {
        self.receivables + self.cash
    }

    pub fn total_assets(&self) -> Money {
        self.fixed_assets() + self.current_assets()
    }
}

/// Profit & loss account for a single fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitLoss {
    pub net_revenue: Money,
    pub cost_of_revenue: Money,
    /// Reported gross margin; expected to equal revenue minus cost of
    /// revenue (a mismatch is surfaced as a computation warning)
    pub gross_margin: Money,
    pub operating_expenses: Money,
    /// Operating result (EBIT); may be negative
    pub operating_result: Money,
    /// Net profit after tax; may be negative
    pub net_profit: Money,
}

/// Cash flow statement for a single fiscal year.
///
/// Cash-flow history may be shorter than the other two series, so a year
/// without one is a valid state, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlow {
    pub operating: Money,
    pub investing: Money,
    pub financing: Money,
    /// Reported net cash flow; expected to equal the sum of the three
    /// components (a mismatch is surfaced as a computation warning)
    pub net: Money,
}

impl CashFlow {
    /// Operating + investing + financing.
    pub fn component_sum(&self) -> Money {
        self.operating + self.investing + self.financing
    }
}
