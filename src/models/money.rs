use rust_decimal::Decimal;

use super::Expense;

/// Renders amounts in the configured currency, e.g. `₹1,234,567.89`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Currency {
    symbol: String,
}

impl Currency {
    pub(crate) fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// Two decimal places with thousand separators. Amounts that round to
    /// zero never show a minus sign.
    pub(crate) fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp(2);
        let text = format!("{:.2}", rounded.abs());
        let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        let sign = if rounded < Decimal::ZERO { "-" } else { "" };
        format!("{sign}{}{}.{cents}", self.symbol, group_thousands(whole))
    }

    /// Amount of a single expense as listed; credits carry a leading `+`.
    pub(crate) fn entry(&self, expense: &Expense) -> String {
        let amount = self.format(expense.amount);
        if expense.kind.is_credit() {
            format!("+{amount}")
        } else {
            amount
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
