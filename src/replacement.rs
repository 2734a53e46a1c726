use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, SimError};
use crate::page_table::{PageClass, PageTable};
use crate::tlb::Tlb;

/// Victim selection for TLB shootdowns and page evictions.
///
/// Both rules are stateless over the tables; the only state carried here
/// is the random source used to break ties.
#[derive(Debug, Clone)]
pub struct ReplacementPolicy {
    rng: StdRng,
}

impl ReplacementPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        ReplacementPolicy { rng }
    }

    /// Pick the TLB slot to shoot down.
    ///
    /// Prefers a valid entry with its referenced bit clear. When every valid
    /// entry is referenced, any slot may be chosen.
    pub fn select_tlb_victim(&mut self, tlb: &Tlb) -> usize {
        let candidates = tlb.unreferenced_slots();
        if candidates.is_empty() {
            return self.rng.gen_range(0..tlb.capacity());
        }
        candidates[self.rng.gen_range(0..candidates.len())]
    }

    /// Pick the resident page to evict, searching classes A, B, C, D in order
    /// and choosing uniformly inside the first non-empty one.
    pub fn select_page_victim(&mut self, page_table: &PageTable) -> Result<usize> {
        for class in PageClass::ORDER {
            let candidates = page_table.resident_in_class(class);
            if !candidates.is_empty() {
                return Ok(candidates[self.rng.gen_range(0..candidates.len())]);
            }
        }
        Err(SimError::NoEvictionCandidate)
    }

    /// Mutable access to the random source, for generating workloads from
    /// the same seeded stream.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn full_tlb(pt: &PageTable, capacity: usize) -> Tlb {
        let mut tlb = Tlb::new(capacity);
        for slot in 0..capacity {
            tlb.fill(slot, slot, pt);
        }
        tlb
    }

    fn resident(count: usize) -> PageTable {
        let mut pt = PageTable::new(32);
        for vpn in 0..count {
            pt.map(vpn, vpn, false);
        }
        pt
    }

    #[test]
    fn test_tlb_victim_prefers_unreferenced() {
        let pt = resident(8);
        let mut tlb = full_tlb(&pt, 8);
        tlb.clear_referenced_bits();
        for slot in 0..8 {
            if slot != 5 {
                tlb.touch(slot, false);
            }
        }

        let mut policy = ReplacementPolicy::new(Some(1));
        for _ in 0..50 {
            assert_eq!(policy.select_tlb_victim(&tlb), 5);
        }
    }

    #[test]
    fn test_tlb_victim_all_referenced_covers_every_slot() {
        let pt = resident(8);
        let tlb = full_tlb(&pt, 8);
        let mut policy = ReplacementPolicy::new(Some(2));

        let seen: HashSet<usize> = (0..500).map(|_| policy.select_tlb_victim(&tlb)).collect();
        assert_eq!(seen.len(), 8);
        assert!(seen.iter().all(|&slot| slot < 8));
    }

    #[test]
    fn test_page_victim_priority() {
        let mut pt = resident(6);
        // 0: A, 1: B, rest stay C
        pt.write_back(0, false, false);
        pt.write_back(1, true, false);
        pt.write_back(2, true, true);

        let mut policy = ReplacementPolicy::new(Some(3));
        for _ in 0..50 {
            assert_eq!(policy.select_page_victim(&pt).unwrap(), 0);
        }

        pt.unmap(0);
        assert_eq!(policy.select_page_victim(&pt).unwrap(), 1);

        pt.unmap(1);
        let victim = policy.select_page_victim(&pt).unwrap();
        assert!((3..6).contains(&victim), "class C expected, got {victim}");

        for vpn in 3..6 {
            pt.unmap(vpn);
        }
        assert_eq!(policy.select_page_victim(&pt).unwrap(), 2);
    }

    #[test]
    fn test_page_victim_uniform_within_class() {
        let pt = resident(4);
        let mut policy = ReplacementPolicy::new(Some(4));
        let seen: HashSet<usize> =
            (0..200).map(|_| policy.select_page_victim(&pt).unwrap()).collect();
        assert_eq!(seen, (0..4).collect::<HashSet<usize>>());
    }

    #[test]
    fn test_page_victim_with_nothing_resident() {
        let pt = PageTable::new(16);
        let mut policy = ReplacementPolicy::new(Some(5));
        assert!(matches!(
            policy.select_page_victim(&pt),
            Err(SimError::NoEvictionCandidate)
        ));
    }

    #[test]
    fn test_seeded_policies_agree() {
        let pt = resident(16);
        let mut a = ReplacementPolicy::new(Some(99));
        let mut b = ReplacementPolicy::new(Some(99));
        for _ in 0..20 {
            assert_eq!(a.select_page_victim(&pt).unwrap(), b.select_page_victim(&pt).unwrap());
        }
    }
}
