/// A financial statement: line items × reporting periods.
///
/// Periods are ordered most recent first, matching the provider. Each row has
/// exactly one cell per period; `None` marks a missing cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementTable {
    periods: Vec<String>,
    rows: Vec<(String, Vec<Option<f64>>)>,
}

impl StatementTable {
    pub fn new(periods: Vec<String>) -> Self {
        Self {
            periods,
            rows: Vec::new(),
        }
    }

    /// Adds (or replaces) a row. Cells are padded or cut to the period count.
    pub fn push_row(&mut self, item: &str, mut cells: Vec<Option<f64>>) {
        cells.resize(self.periods.len(), None);
        if let Some((_, existing)) = self.rows.iter_mut().find(|(name, _)| name == item) {
            *existing = cells;
        } else {
            self.rows.push((item.to_string(), cells));
        }
    }

    pub fn with_row(mut self, item: &str, cells: Vec<Option<f64>>) -> Self {
        self.push_row(item, cells);
        self
    }

    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn line_items(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(name, _)| name.as_str())
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.rows
            .iter()
            .map(|(name, cells)| (name.as_str(), cells.as_slice()))
    }

    /// Empty when either axis has no entries.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty() || self.rows.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.rows.iter().any(|(name, _)| name == item)
    }

    pub fn row(&self, item: &str) -> Option<&[Option<f64>]> {
        self.rows
            .iter()
            .find(|(name, _)| name == item)
            .map(|(_, cells)| cells.as_slice())
    }

    /// Most recent cell of `item`.
    ///
    /// An absent line item reads as `default`; a present item with a missing
    /// cell reads as `None`.
    pub fn latest_or(&self, item: &str, default: f64) -> Option<f64> {
        match self.row(item) {
            None => Some(default),
            Some(cells) => cells.first().copied().flatten().filter(|v| !v.is_nan()),
        }
    }

    /// (period, value) pairs of `item` in column order, missing cells dropped.
    pub fn series(&self, item: &str) -> Vec<(String, f64)> {
        let Some(cells) = self.row(item) else {
            return Vec::new();
        };
        self.periods
            .iter()
            .zip(cells)
            .filter_map(|(period, cell)| cell.filter(|v| !v.is_nan()).map(|v| (period.clone(), v)))
            .collect()
    }

    /// The listed items that exist in this table, in the listed order.
    pub fn subset(&self, items: &[&str]) -> StatementTable {
        let mut out = StatementTable::new(self.periods.clone());
        for item in items {
            if let Some(cells) = self.row(item) {
                out.push_row(item, cells.to_vec());
            }
        }
        out
    }
}
