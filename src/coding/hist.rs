//! A byte histogram that counts the occurrences of every symbol.

/// The number of distinct symbols in the byte alphabet.
pub const ALPHABET: usize = 256;

pub struct Histogram {
    values: [u64; ALPHABET],
}

impl Histogram {
    pub fn from_data(values: &[u8]) -> Histogram {
        // Fill the histogram in four buckets to allow instruction-level
        // parallelism.
        let mut hist0 = [0u64; ALPHABET];
        let mut hist1 = [0u64; ALPHABET];
        let mut hist2 = [0u64; ALPHABET];
        let mut hist3 = [0u64; ALPHABET];

        let mut chunks = values.chunks_exact(4);
        for chunk in &mut chunks {
            hist0[chunk[0] as usize] += 1;
            hist1[chunk[1] as usize] += 1;
            hist2[chunk[2] as usize] += 1;
            hist3[chunk[3] as usize] += 1;
        }
        for val in chunks.remainder() {
            hist0[*val as usize] += 1;
        }

        let mut hist = [0; ALPHABET];
        for i in 0..ALPHABET {
            hist[i] = hist0[i] + hist1[i] + hist2[i] + hist3[i];
        }

        Histogram { values: hist }
    }

    pub fn get_bins(&self) -> &[u64; ALPHABET] {
        &self.values
    }

    /// Returns the (symbol, count) pairs of the symbols that occur in the
    /// input, in ascending symbol order.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, count)| **count != 0)
            .map(|(sym, count)| (sym as u8, *count))
    }

    /// Returns the number of distinct symbols.
    pub fn distinct(&self) -> usize {
        self.values.iter().filter(|n| **n != 0).count()
    }

    /// Returns the sum of all of the counts, which is the input length.
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
