//! History table filtering.

use chrono::NaiveDate;

use crate::inventory::{Transaction, TransactionType};

/// Filters applied to the movement history. All set filters must match; an
/// empty filter matches every movement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Matched case-insensitively against the description, or verbatim
    /// against the asset tag.
    pub search: String,
    pub sector_id: Option<String>,
    /// `None` means both directions.
    pub transaction_type: Option<TransactionType>,
    pub date: Option<NaiveDate>,
}

impl HistoryFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.matches_search(tx)
            && self
                .sector_id
                .as_deref()
                .is_none_or(|id| tx.sector_id.as_deref() == Some(id))
            && self
                .transaction_type
                .is_none_or(|kind| tx.transaction_type == kind)
            && self.date.is_none_or(|date| tx.date == date)
    }

    /// Matching movements, in their original order.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|tx| self.matches(tx)).collect()
    }

    fn matches_search(&self, tx: &Transaction) -> bool {
        let term = self.search.to_lowercase();
        tx.description.to_lowercase().contains(&term)
            || tx
                .asset_id
                .as_deref()
                .is_some_and(|tag| tag.contains(self.search.as_str()))
    }
}
