use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{EnrichedTrade, SentimentClass, Side};

/// Immutable view filter, passed by value into aggregation calls.
///
/// There is no global "current filter" state: every analysis receives the
/// config it should apply and the base dataset stays untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Sentiment classes to keep
    pub sentiments: HashSet<SentimentClass>,
    /// Restrict to one trade direction; `None` keeps both
    pub side: Option<Side>,
}

impl FilterConfig {
    /// Selects every trade
    pub fn all() -> Self {
        Self {
            sentiments: SentimentClass::ALL.into_iter().collect(),
            side: None,
        }
    }

    pub fn with_sentiments(sentiments: impl IntoIterator<Item = SentimentClass>) -> Self {
        Self {
            sentiments: sentiments.into_iter().collect(),
            side: None,
        }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn matches(&self, trade: &EnrichedTrade) -> bool {
        if !self.sentiments.contains(&trade.sentiment) {
            return false;
        }
        match self.side {
            Some(side) => trade.side == side,
            None => true,
        }
    }

    /// Borrowing filter pass over a trade slice
    pub fn apply<'a>(&'a self, trades: &'a [EnrichedTrade]) -> impl Iterator<Item = &'a EnrichedTrade> {
        trades.iter().filter(move |t| self.matches(t))
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::all()
    }
}
