use crate::page_table::PageTable;

/// A cached translation. While `valid`, its dirty and referenced bits
/// take precedence over the page table's copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TlbEntry {
    pub valid: bool,
    pub dirty: bool,
    pub referenced: bool,
    pub vpn: usize,
    pub frame: usize,
}

/// Fully associative translation cache, searched linearly.
#[derive(Debug, Clone)]
pub struct Tlb {
    entries: Vec<TlbEntry>,
}

impl Tlb {
    pub fn new(capacity: usize) -> Self {
        Tlb { entries: vec![TlbEntry::default(); capacity] }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn entry(&self, slot: usize) -> &TlbEntry {
        &self.entries[slot]
    }

    /// Slot holding a valid translation for `vpn`
    pub fn lookup(&self, vpn: usize) -> Option<usize> {
        self.entries.iter().position(|e| e.valid && e.vpn == vpn)
    }

    pub fn free_slot(&self) -> Option<usize> {
        self.entries.iter().position(|e| !e.valid)
    }

    pub fn is_full(&self) -> bool {
        self.free_slot().is_none()
    }

    /// Record an access that hit `slot`
    pub fn touch(&mut self, slot: usize, is_write: bool) {
        let entry = &mut self.entries[slot];
        if is_write {
            entry.dirty = true;
        }
        entry.referenced = true;
    }

    /// Populate `slot` from the page table's current record for `vpn`.
    /// The page must be resident.
    pub fn fill(&mut self, slot: usize, vpn: usize, page_table: &PageTable) {
        let page = page_table.entry(vpn);
        debug_assert!(page.valid, "caching a translation for non-resident page {vpn}");
        self.entries[slot] = TlbEntry {
            valid: true,
            dirty: page.dirty,
            referenced: page.referenced,
            vpn,
            frame: page.frame.unwrap_or_default(),
        };
    }

    /// Invalidate `slot`, returning the entry it held if it was valid
    pub fn invalidate(&mut self, slot: usize) -> Option<TlbEntry> {
        let entry = &mut self.entries[slot];
        if !entry.valid {
            return None;
        }
        entry.valid = false;
        Some(*entry)
    }

    pub fn clear_referenced_bits(&mut self) {
        for entry in &mut self.entries {
            entry.referenced = false;
        }
    }

    /// Slots of valid entries whose referenced bit is clear
    pub fn unreferenced_slots(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.valid && !e.referenced)
            .map(|(slot, _)| slot)
            .collect()
    }

    pub fn valid_count(&self) -> usize {
        self.entries.iter().filter(|e| e.valid).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TlbEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.fill(TlbEntry::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resident_pages(count: usize) -> PageTable {
        let mut pt = PageTable::new(64);
        for vpn in 0..count {
            pt.map(vpn, vpn + 100, vpn % 2 == 0);
        }
        pt
    }

    #[test]
    fn test_lookup_only_matches_valid_entries() {
        let pt = resident_pages(2);
        let mut tlb = Tlb::new(4);
        assert_eq!(tlb.lookup(0), None);

        tlb.fill(2, 1, &pt);
        assert_eq!(tlb.lookup(1), Some(2));

        tlb.invalidate(2);
        assert_eq!(tlb.lookup(1), None);
    }

    #[test]
    fn test_fill_copies_page_record() {
        let pt = resident_pages(1);
        let mut tlb = Tlb::new(2);
        tlb.fill(0, 0, &pt);

        let entry = tlb.entry(0);
        assert!(entry.valid);
        assert!(entry.dirty);
        assert!(entry.referenced);
        assert_eq!(entry.vpn, 0);
        assert_eq!(entry.frame, 100);
    }

    #[test]
    fn test_touch_sets_bits() {
        let mut pt = resident_pages(2);
        pt.write_back(1, false, false);
        let mut tlb = Tlb::new(2);
        tlb.fill(0, 1, &pt);

        tlb.touch(0, false);
        assert!(tlb.entry(0).referenced);
        assert!(!tlb.entry(0).dirty);

        tlb.touch(0, true);
        assert!(tlb.entry(0).dirty);
    }

    #[test]
    fn test_free_slot_and_full() {
        let pt = resident_pages(3);
        let mut tlb = Tlb::new(2);
        assert_eq!(tlb.free_slot(), Some(0));
        tlb.fill(0, 0, &pt);
        assert_eq!(tlb.free_slot(), Some(1));
        tlb.fill(1, 1, &pt);
        assert!(tlb.is_full());
        assert_eq!(tlb.valid_count(), 2);
    }

    #[test]
    fn test_invalidate_empty_slot() {
        let mut tlb = Tlb::new(2);
        assert_eq!(tlb.invalidate(1), None);
    }

    #[test]
    fn test_unreferenced_slots() {
        let pt = resident_pages(3);
        let mut tlb = Tlb::new(4);
        for vpn in 0..3 {
            tlb.fill(vpn, vpn, &pt);
        }
        assert!(tlb.unreferenced_slots().is_empty());

        tlb.clear_referenced_bits();
        tlb.touch(1, false);
        // Slot 3 is invalid and never counts
        assert_eq!(tlb.unreferenced_slots(), vec![0, 2]);
    }
}
