/// Running record of the unstyled widths emitted during one render pass.
///
/// Every measured segment appends one entry. Segments are joined by a single
/// space, so the columns consumed are the sum of the entries plus one per
/// entry. The ledger only grows; anything that sizes itself from the leftover
/// width must be rendered after everything it has to leave room for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, width: usize) {
        self.entries.push(width);
    }

    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Columns taken so far, separators included.
    pub fn consumed(&self) -> usize {
        self.entries.len() + self.entries.iter().sum::<usize>()
    }

    /// Columns still free on a terminal `columns` wide.
    pub fn remaining(&self, columns: usize) -> usize {
        columns.saturating_sub(self.consumed())
    }
}
