/// One virtual page's record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageEntry {
    pub valid: bool,
    pub dirty: bool,
    pub referenced: bool,
    /// Resident frame, meaningful only while `valid`
    pub frame: Option<usize>,
}

/// Eviction preference classes over resident pages, best candidate first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PageClass {
    /// clean, unreferenced
    A,
    /// dirty, unreferenced
    B,
    /// clean, referenced
    C,
    /// dirty, referenced
    D,
}

impl PageClass {
    pub const ORDER: [PageClass; 4] = [PageClass::A, PageClass::B, PageClass::C, PageClass::D];

    pub fn of(entry: &PageEntry) -> PageClass {
        match (entry.dirty, entry.referenced) {
            (false, false) => PageClass::A,
            (true, false) => PageClass::B,
            (false, true) => PageClass::C,
            (true, true) => PageClass::D,
        }
    }
}

/// Single-level page table indexed by virtual page number.
#[derive(Debug, Clone)]
pub struct PageTable {
    entries: Vec<PageEntry>,
}

impl PageTable {
    pub fn new(page_count: usize) -> Self {
        PageTable { entries: vec![PageEntry::default(); page_count] }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entry(&self, vpn: usize) -> &PageEntry {
        &self.entries[vpn]
    }

    #[inline]
    pub fn is_resident(&self, vpn: usize) -> bool {
        self.entries[vpn].valid
    }

    /// Frame holding `vpn`, or `None` when the page is not resident
    pub fn frame_of(&self, vpn: usize) -> Option<usize> {
        let entry = &self.entries[vpn];
        if entry.valid { entry.frame } else { None }
    }

    /// Load `vpn` into `frame` as a freshly faulted page.
    pub fn map(&mut self, vpn: usize, frame: usize, is_write: bool) {
        self.entries[vpn] = PageEntry {
            valid: true,
            dirty: is_write,
            referenced: true,
            frame: Some(frame),
        };
    }

    /// Mark `vpn` non-resident, returning the frame it occupied.
    /// The dirty and referenced bits are left as they were.
    pub fn unmap(&mut self, vpn: usize) -> Option<usize> {
        let entry = &mut self.entries[vpn];
        entry.valid = false;
        entry.frame.take()
    }

    /// Copy a TLB entry's bits back into the page record
    pub fn write_back(&mut self, vpn: usize, dirty: bool, referenced: bool) {
        let entry = &mut self.entries[vpn];
        entry.dirty = dirty;
        entry.referenced = referenced;
    }

    pub fn clear_referenced_bits(&mut self) {
        for entry in &mut self.entries {
            entry.referenced = false;
        }
    }

    pub fn resident_count(&self) -> usize {
        self.entries.iter().filter(|e| e.valid).count()
    }

    /// Resident pages falling in `class`, in ascending page order
    pub fn resident_in_class(&self, class: PageClass) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.valid && PageClass::of(e) == class)
            .map(|(vpn, _)| vpn)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &PageEntry)> {
        self.entries.iter().enumerate()
    }

    pub fn clear(&mut self) {
        self.entries.fill(PageEntry::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_start_invalid() {
        let pt = PageTable::new(1024);
        assert_eq!(pt.len(), 1024);
        assert_eq!(pt.resident_count(), 0);
        assert_eq!(*pt.entry(0), PageEntry::default());
        assert!(!pt.is_resident(1023));
    }

    #[test]
    fn test_map_sets_fault_bits() {
        let mut pt = PageTable::new(8);
        pt.map(3, 5, true);

        let entry = pt.entry(3);
        assert!(entry.valid);
        assert!(entry.dirty);
        assert!(entry.referenced);
        assert_eq!(pt.frame_of(3), Some(5));

        pt.map(4, 6, false);
        assert!(!pt.entry(4).dirty);
    }

    #[test]
    fn test_unmap_keeps_bits() {
        let mut pt = PageTable::new(8);
        pt.map(2, 1, true);
        assert_eq!(pt.unmap(2), Some(1));
        assert!(!pt.is_resident(2));
        assert!(pt.entry(2).dirty);
        assert_eq!(pt.frame_of(2), None);
    }

    #[test]
    fn test_write_back_overwrites_both_bits() {
        let mut pt = PageTable::new(4);
        pt.map(1, 0, true);
        pt.write_back(1, false, false);
        assert!(!pt.entry(1).dirty);
        assert!(!pt.entry(1).referenced);
        assert!(pt.is_resident(1));
        assert_eq!(pt.frame_of(1), Some(0));
    }

    #[test]
    fn test_page_classes() {
        let mut pt = PageTable::new(8);
        pt.map(0, 0, false);
        pt.write_back(0, false, false); // A
        pt.map(1, 1, true);
        pt.write_back(1, true, false); // B
        pt.map(2, 2, false); // C
        pt.map(3, 3, true); // D
        pt.map(4, 4, true);
        pt.unmap(4); // not resident, never a candidate

        assert_eq!(pt.resident_in_class(PageClass::A), vec![0]);
        assert_eq!(pt.resident_in_class(PageClass::B), vec![1]);
        assert_eq!(pt.resident_in_class(PageClass::C), vec![2]);
        assert_eq!(pt.resident_in_class(PageClass::D), vec![3]);
    }

    #[test]
    fn test_clear_referenced_bits() {
        let mut pt = PageTable::new(4);
        pt.map(0, 0, true);
        pt.map(1, 1, false);
        pt.clear_referenced_bits();
        assert!(pt.iter().all(|(_, e)| !e.referenced));
        assert!(pt.entry(0).dirty);
    }
}
