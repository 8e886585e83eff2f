use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinStatError;
use crate::statements::{BalanceSheet, CashFlow, ProfitLoss};
use crate::types::{FiscalYear, StatementKind};
use crate::FinStatResult;

/// Read-only, year-indexed store of one company's annual statements.
///
/// Built once at startup (or loaded from JSON) and passed by reference into
/// the calculators. Lookups never mutate, so the same inputs always produce
/// the same outputs and callers may cache results freely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialDataset {
    company_name: String,
    balance_sheets: BTreeMap<FiscalYear, BalanceSheet>,
    profit_loss: BTreeMap<FiscalYear, ProfitLoss>,
    #[serde(default)]
    cash_flows: BTreeMap<FiscalYear, CashFlow>,
}

impl FinancialDataset {
    /// Construct a validated dataset. See [`FinancialDataset::validate`] for
    /// the invariants enforced.
    pub fn new(
        company_name: impl Into<String>,
        balance_sheets: BTreeMap<FiscalYear, BalanceSheet>,
        profit_loss: BTreeMap<FiscalYear, ProfitLoss>,
        cash_flows: BTreeMap<FiscalYear, CashFlow>,
    ) -> FinStatResult<Self> {
        let dataset = FinancialDataset {
            company_name: company_name.into(),
            balance_sheets,
            profit_loss,
            cash_flows,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Deserialize a dataset from a JSON document and validate it.
    pub fn from_json_str(json: &str) -> FinStatResult<Self> {
        let dataset: FinancialDataset = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Deserialize a dataset from an in-memory JSON value and validate it.
    pub fn from_value(value: serde_json::Value) -> FinStatResult<Self> {
        let dataset: FinancialDataset = serde_json::from_value(value)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Check the dataset invariants:
    /// - at least one fiscal year
    /// - balance-sheet and profit-&-loss series cover the same years
    /// - every cash-flow year is a known year (the series itself may be
    ///   shorter than the other two)
    /// - monetary fields that must be non-negative are non-negative
    pub fn validate(&self) -> FinStatResult<()> {
        if self.balance_sheets.is_empty() || self.profit_loss.is_empty() {
            return Err(FinStatError::InsufficientData(
                "A dataset requires at least one year of balance-sheet and profit & loss data."
                    .into(),
            ));
        }

        for year in self.profit_loss.keys() {
            if !self.balance_sheets.contains_key(year) {
                return Err(FinStatError::InvalidInput {
                    field: "balance_sheets".into(),
                    reason: format!("Profit & loss year {year} has no balance sheet."),
                });
            }
        }
        for year in self.balance_sheets.keys() {
            if !self.profit_loss.contains_key(year) {
                return Err(FinStatError::InvalidInput {
                    field: "profit_loss".into(),
                    reason: format!("Balance-sheet year {year} has no profit & loss account."),
                });
            }
        }
        for year in self.cash_flows.keys() {
            if !self.balance_sheets.contains_key(year) {
                return Err(FinStatError::InvalidInput {
                    field: "cash_flows".into(),
                    reason: format!("Cash-flow year {year} is not a dataset year."),
                });
            }
        }

        for (year, bs) in &self.balance_sheets {
            for (name, value) in [
                ("intangible_fixed_assets", bs.intangible_fixed_assets),
                ("tangible_fixed_assets", bs.tangible_fixed_assets),
                ("financial_fixed_assets", bs.financial_fixed_assets),
                ("receivables", bs.receivables),
                ("cash", bs.cash),
                ("current_liabilities", bs.current_liabilities),
            ] {
                check_non_negative(name, year, value)?;
            }
        }
        for (year, pl) in &self.profit_loss {
            for (name, value) in [
                ("net_revenue", pl.net_revenue),
                ("cost_of_revenue", pl.cost_of_revenue),
                ("operating_expenses", pl.operating_expenses),
            ] {
                check_non_negative(name, year, value)?;
            }
        }

        Ok(())
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// All dataset years in ascending calendar order.
    pub fn years(&self) -> Vec<FiscalYear> {
        self.balance_sheets.keys().copied().collect()
    }

    /// The most recent dataset year.
    pub fn latest_year(&self) -> Option<FiscalYear> {
        self.balance_sheets.keys().next_back().copied()
    }

    /// The dataset year immediately before `year`, if any.
    pub fn previous_year(&self, year: FiscalYear) -> Option<FiscalYear> {
        self.balance_sheets.range(..year).next_back().map(|(y, _)| *y)
    }

    pub fn balance_sheet(&self, year: FiscalYear) -> FinStatResult<&BalanceSheet> {
        self.balance_sheets
            .get(&year)
            .ok_or(FinStatError::NotFound {
                statement: StatementKind::BalanceSheet,
                year,
            })
    }

    pub fn profit_loss(&self, year: FiscalYear) -> FinStatResult<&ProfitLoss> {
        self.profit_loss.get(&year).ok_or(FinStatError::NotFound {
            statement: StatementKind::ProfitLoss,
            year,
        })
    }

    /// Cash flow for `year`, or `None` when the cash-flow history does not
    /// reach back that far. Absence is a valid state, never an error.
    pub fn cash_flow(&self, year: FiscalYear) -> Option<&CashFlow> {
        self.cash_flows.get(&year)
    }

    /// The embedded sample company: a Dutch accounting-software firm with
    /// statements for 2022-2024 and cash-flow history from 2023.
    pub fn builtin() -> Self {
        let balance_sheets = BTreeMap::from([
            (
                FiscalYear(2022),
                BalanceSheet {
                    intangible_fixed_assets: dec!(0),
                    tangible_fixed_assets: dec!(681_029),
                    financial_fixed_assets: dec!(2_964_989),
                    receivables: dec!(3_567_616),
                    cash: dec!(1_921_392),
                    equity: dec!(3_152_060),
                    current_liabilities: dec!(5_982_966),
                },
            ),
            (
                FiscalYear(2023),
                BalanceSheet {
                    intangible_fixed_assets: dec!(616_792),
                    tangible_fixed_assets: dec!(480_038),
                    financial_fixed_assets: dec!(2_879_700),
                    receivables: dec!(2_050_960),
                    cash: dec!(5_876_484),
                    equity: dec!(4_912_207),
                    current_liabilities: dec!(6_991_767),
                },
            ),
            (
                FiscalYear(2024),
                BalanceSheet {
                    intangible_fixed_assets: dec!(118_414),
                    tangible_fixed_assets: dec!(435_242),
                    financial_fixed_assets: dec!(3_710_145),
                    receivables: dec!(3_642_300),
                    cash: dec!(9_078_755),
                    equity: dec!(10_085_950),
                    current_liabilities: dec!(6_898_906),
                },
            ),
        ]);

        let profit_loss = BTreeMap::from([
            (
                FiscalYear(2022),
                ProfitLoss {
                    net_revenue: dec!(28_632_557),
                    cost_of_revenue: dec!(4_030_779),
                    gross_margin: dec!(24_601_778),
                    operating_expenses: dec!(20_993_636),
                    operating_result: dec!(3_608_142),
                    net_profit: dec!(2_801_050),
                },
            ),
            (
                FiscalYear(2023),
                ProfitLoss {
                    net_revenue: dec!(36_031_549),
                    cost_of_revenue: dec!(3_828_888),
                    gross_margin: dec!(32_202_661),
                    operating_expenses: dec!(21_066_838),
                    operating_result: dec!(11_135_823),
                    net_profit: dec!(8_160_147),
                },
            ),
            (
                FiscalYear(2024),
                ProfitLoss {
                    net_revenue: dec!(44_788_100),
                    cost_of_revenue: dec!(5_354_998),
                    gross_margin: dec!(39_433_102),
                    operating_expenses: dec!(24_441_359),
                    operating_result: dec!(14_991_743),
                    net_profit: dec!(11_067_411),
                },
            ),
        ]);

        let cash_flows = BTreeMap::from([
            (
                FiscalYear(2023),
                CashFlow {
                    operating: dec!(10_444_979),
                    investing: dec!(-88_963),
                    financing: dec!(-6_400_924),
                    net: dec!(3_955_092),
                },
            ),
            (
                FiscalYear(2024),
                CashFlow {
                    operating: dec!(10_159_729),
                    investing: dec!(-1_063_790),
                    financing: dec!(-5_893_668),
                    net: dec!(3_202_271),
                },
            ),
        ]);

        // The embedded figures satisfy every invariant; validation cannot
        // fail here.
        FinancialDataset {
            company_name: "SnelStart Software B.V.".to_string(),
            balance_sheets,
            profit_loss,
            cash_flows,
        }
    }
}

fn check_non_negative(field: &str, year: &FiscalYear, value: Decimal) -> FinStatResult<()> {
    if value < Decimal::ZERO {
        return Err(FinStatError::InvalidInput {
            field: field.into(),
            reason: format!("{field} cannot be negative in fiscal year {year}."),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builtin_passes_validation() {
        FinancialDataset::builtin().validate().unwrap();
    }

    #[test]
    fn test_years_ascending() {
        let dataset = FinancialDataset::builtin();
        assert_eq!(
            dataset.years(),
            vec![FiscalYear(2022), FiscalYear(2023), FiscalYear(2024)]
        );
        assert_eq!(dataset.latest_year(), Some(FiscalYear(2024)));
    }

    #[test]
    fn test_unknown_year_is_not_found() {
        let dataset = FinancialDataset::builtin();
        let err = dataset.balance_sheet(FiscalYear(2019)).unwrap_err();
        assert!(matches!(
            err,
            FinStatError::NotFound {
                statement: StatementKind::BalanceSheet,
                year: FiscalYear(2019),
            }
        ));
        assert!(dataset.profit_loss(FiscalYear(2019)).is_err());
    }

    #[test]
    fn test_cash_flow_absence_is_not_an_error() {
        let dataset = FinancialDataset::builtin();
        assert!(dataset.cash_flow(FiscalYear(2022)).is_none());
        assert!(dataset.cash_flow(FiscalYear(2023)).is_some());
        assert!(dataset.cash_flow(FiscalYear(2024)).is_some());
    }

    #[test]
    fn test_previous_year() {
        let dataset = FinancialDataset::builtin();
        assert_eq!(
            dataset.previous_year(FiscalYear(2024)),
            Some(FiscalYear(2023))
        );
        assert_eq!(dataset.previous_year(FiscalYear(2022)), None);
    }

    #[test]
    fn test_profit_loss_year_without_balance_sheet_rejected() {
        let builtin = FinancialDataset::builtin();
        let mut balance_sheets = builtin.balance_sheets.clone();
        balance_sheets.remove(&FiscalYear(2022));
        let result = FinancialDataset::new(
            "BrokenCo",
            balance_sheets,
            builtin.profit_loss.clone(),
            BTreeMap::new(),
        );
        assert!(matches!(result, Err(FinStatError::InvalidInput { .. })));
    }

    #[test]
    fn test_cash_flow_for_unknown_year_rejected() {
        let builtin = FinancialDataset::builtin();
        let mut cash_flows = builtin.cash_flows.clone();
        cash_flows.insert(
            FiscalYear(1999),
            CashFlow {
                operating: dec!(1),
                investing: dec!(0),
                financing: dec!(0),
                net: dec!(1),
            },
        );
        let result = FinancialDataset::new(
            "BrokenCo",
            builtin.balance_sheets.clone(),
            builtin.profit_loss.clone(),
            cash_flows,
        );
        assert!(matches!(result, Err(FinStatError::InvalidInput { .. })));
    }

    #[test]
    fn test_negative_monetary_field_rejected() {
        let builtin = FinancialDataset::builtin();
        let mut balance_sheets = builtin.balance_sheets.clone();
        balance_sheets
            .get_mut(&FiscalYear(2024))
            .unwrap()
            .receivables = dec!(-1);
        let result = FinancialDataset::new(
            "BrokenCo",
            balance_sheets,
            builtin.profit_loss.clone(),
            builtin.cash_flows.clone(),
        );
        assert!(matches!(result, Err(FinStatError::InvalidInput { .. })));
    }

    #[test]
    fn test_negative_equity_is_allowed() {
        let builtin = FinancialDataset::builtin();
        let mut balance_sheets = builtin.balance_sheets.clone();
        balance_sheets.get_mut(&FiscalYear(2022)).unwrap().equity = dec!(-500_000);
        let result = FinancialDataset::new(
            "UnderwaterCo",
            balance_sheets,
            builtin.profit_loss.clone(),
            builtin.cash_flows.clone(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let dataset = FinancialDataset::builtin();
        let json = serde_json::to_string(&dataset).unwrap();
        let restored = FinancialDataset::from_json_str(&json).unwrap();
        assert_eq!(restored.company_name(), dataset.company_name());
        assert_eq!(restored.years(), dataset.years());
        assert_eq!(
            restored.balance_sheet(FiscalYear(2024)).unwrap(),
            dataset.balance_sheet(FiscalYear(2024)).unwrap()
        );
    }
}
