use crate::core::currency::Currency;
use chrono::{DateTime, Local};
use std::collections::VecDeque;

pub const MAX_HISTORY: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub input_text: String,
    pub output_text: String,
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub timestamp: DateTime<Local>,
}

/// Most-recent-first list of the conversions made during this session.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_HISTORY),
        }
    }

    /// Records a conversion. Zero results are not recorded.
    ///
    /// Returns whether the entry was added.
    pub fn record(
        &mut self,
        input_text: &str,
        output_text: &str,
        converted: f64,
        from_currency: Currency,
        to_currency: Currency,
    ) -> bool {
        if converted == 0.0 {
            return false;
        }

        self.entries.push_front(HistoryEntry {
            input_text: input_text.to_string(),
            output_text: output_text.to_string(),
            from_currency,
            to_currency,
            timestamp: Local::now(),
        });
        self.entries.truncate(MAX_HISTORY);
        true
    }

    /// The most recent entry, if any.
    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_most_recent_first_and_bounded() {
        let mut history = History::new();
        for i in 1..=12 {
            let input = format!("¥{i}000");
            assert!(history.record(&input, "$6.70", 6.7, Currency::Jpy, Currency::Usd));
        }

        assert_eq!(history.len(), MAX_HISTORY);
        let inputs: Vec<&str> = history.entries().map(|e| e.input_text.as_str()).collect();
        assert_eq!(inputs.first(), Some(&"¥12000"));
        assert_eq!(inputs.last(), Some(&"¥3000"));
        assert_eq!(history.newest().map(|e| e.input_text.as_str()), Some("¥12000"));
    }

    #[test]
    fn test_history_ignores_zero_results() {
        let mut history = History::new();
        assert!(!history.record("¥0", "$0.00", 0.0, Currency::Jpy, Currency::Usd));
        assert!(history.is_empty());

        assert!(history.record("$10.00", "¥1,490", 1490.0, Currency::Usd, Currency::Jpy));
        let entry = history.entries().next().unwrap();
        assert_eq!(entry.from_currency, Currency::Usd);
        assert_eq!(entry.to_currency, Currency::Jpy);
        assert_eq!(entry.output_text, "¥1,490");

        history.clear();
        assert!(history.is_empty());
    }
}
