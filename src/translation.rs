use std::fmt;

/// Represents the decomposed components of a virtual address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualAddress {
    pub va: u64,
    pub vpn: usize,
    pub offset: u64,
}

impl VirtualAddress {
    /// Split a raw address into page number and offset
    pub fn from_raw(va: u64, page_size: u64) -> Self {
        VirtualAddress {
            va,
            vpn: (va / page_size) as usize,
            offset: va % page_size,
        }
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VA({}) = (vpn={}, offset={})", self.va, self.vpn, self.offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

impl AccessKind {
    #[inline]
    pub fn is_write(self) -> bool {
        matches!(self, AccessKind::Write)
    }

    /// Single-letter tag used in traces and reports
    pub fn tag(self) -> char {
        match self {
            AccessKind::Read => 'r',
            AccessKind::Write => 'w',
        }
    }
}

impl From<bool> for AccessKind {
    fn from(is_write: bool) -> Self {
        if is_write { AccessKind::Write } else { AccessKind::Read }
    }
}

/// One memory reference in a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub address: u64,
    pub kind: AccessKind,
}

impl Access {
    pub fn read(address: u64) -> Self {
        Access { address, kind: AccessKind::Read }
    }

    pub fn write(address: u64) -> Self {
        Access { address, kind: AccessKind::Write }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.tag(), self.address)
    }
}

/// Path an access took through the translation hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    /// Served from the TLB
    TlbHit { frame: usize },
    /// TLB miss, page already resident
    TlbMissResident { frame: usize },
    /// TLB miss and page fault
    PageFault { frame: usize, evicted: Option<usize> },
}

impl AccessOutcome {
    pub fn frame(&self) -> usize {
        match *self {
            AccessOutcome::TlbHit { frame }
            | AccessOutcome::TlbMissResident { frame }
            | AccessOutcome::PageFault { frame, .. } => frame,
        }
    }

    /// Physical address for `va` under this outcome
    pub fn physical_address(&self, va: &VirtualAddress, page_size: u64) -> u64 {
        self.frame() as u64 * page_size + va.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_va_decomposition_default_page_size() {
        let va = VirtualAddress::from_raw(178406, 1024);
        assert_eq!(va.vpn, 174);
        assert_eq!(va.offset, 178406 - 174 * 1024);
    }

    #[test]
    fn test_va_first_page() {
        for &raw in &[51, 374, 846, 219, 433] {
            assert_eq!(VirtualAddress::from_raw(raw, 1024).vpn, 0);
        }
    }

    #[test]
    fn test_va_page_boundaries() {
        assert_eq!(VirtualAddress::from_raw(1023, 1024).vpn, 0);
        assert_eq!(VirtualAddress::from_raw(1024, 1024).vpn, 1);
        let last = VirtualAddress::from_raw(1_048_575, 1024);
        assert_eq!(last.vpn, 1023);
        assert_eq!(last.offset, 1023);
    }

    #[test]
    fn test_display() {
        let va = VirtualAddress::from_raw(2100, 1024);
        let display = format!("{}", va);
        assert!(display.contains("2100"));
        assert!(display.contains("vpn=2"));
        assert!(display.contains("offset=52"));
    }

    #[test]
    fn test_access_kind_from_bool() {
        assert_eq!(AccessKind::from(true), AccessKind::Write);
        assert_eq!(AccessKind::from(false), AccessKind::Read);
        assert!(Access::write(3).kind.is_write());
        assert_eq!(Access::read(12).to_string(), "r12");
    }

    #[test]
    fn test_physical_address() {
        let va = VirtualAddress::from_raw(1030, 1024);
        let outcome = AccessOutcome::TlbMissResident { frame: 9 };
        assert_eq!(outcome.physical_address(&va, 1024), 9 * 1024 + 6);
    }
}
