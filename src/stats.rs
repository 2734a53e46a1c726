//! Event counters for a simulation run.

/// The eleven counters a run accumulates. Every field only ever increases
/// between resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub tlb_hits: u64,
    pub tlb_misses: u64,
    pub tlb_shootdowns: u64,
    pub tlb_writes: u64,
    pub page_table_hits: u64,
    pub page_faults: u64,
    pub page_table_accesses: u64,
    pub page_table_writes: u64,
    pub page_evictions: u64,
    pub disk_reads: u64,
    pub disk_writes: u64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Total accesses observed, `tlb_hits + tlb_misses`
    pub fn accesses(&self) -> u64 {
        self.tlb_hits + self.tlb_misses
    }

    /// Fraction of accesses served by the TLB, `None` before any access
    pub fn tlb_hit_rate(&self) -> Option<f64> {
        ratio(self.tlb_hits, self.tlb_misses)
    }

    /// Fraction of page-table lookups that found the page resident
    pub fn page_table_hit_rate(&self) -> Option<f64> {
        ratio(self.page_table_hits, self.page_faults)
    }
}

fn ratio(hits: u64, misses: u64) -> Option<f64> {
    let total = hits + misses;
    if total == 0 {
        None
    } else {
        Some(hits as f64 / total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_undefined_when_empty() {
        let stats = Statistics::new();
        assert_eq!(stats.tlb_hit_rate(), None);
        assert_eq!(stats.page_table_hit_rate(), None);
        assert_eq!(stats.accesses(), 0);
    }

    #[test]
    fn test_rates() {
        let stats = Statistics {
            tlb_hits: 3,
            tlb_misses: 1,
            page_table_hits: 0,
            page_faults: 1,
            ..Statistics::default()
        };
        assert_eq!(stats.tlb_hit_rate(), Some(0.75));
        assert_eq!(stats.page_table_hit_rate(), Some(0.0));
        assert_eq!(stats.accesses(), 4);
    }

    #[test]
    fn test_reset() {
        let mut stats = Statistics { disk_writes: 9, tlb_writes: 2, ..Statistics::default() };
        stats.reset();
        assert_eq!(stats, Statistics::default());
    }
}
