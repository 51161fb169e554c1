/// Byte cells that grow to the right on demand.
///
/// The tape starts with a single zero cell. Moving onto index `len()` appends
/// one more zero cell; nothing is ever added on the left.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<u8>,
}

impl Default for Tape {
    fn default() -> Self {
        Self { cells: vec![0] }
    }
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> u8 {
        self.cells.get(index).copied().unwrap_or(0)
    }

    /// Mutable access to `index`, appending a zero cell when `index == len()`.
    ///
    /// Callers move the pointer one cell at a time, so indices past `len()`
    /// are never requested.
    pub fn cell_mut(&mut self, index: usize) -> &mut u8 {
        if index == self.cells.len() {
            self.cells.push(0);
        }
        &mut self.cells[index]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}
