use log::{debug, info, trace};
use rand::rngs::StdRng;

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::memory::FrameTable;
use crate::page_table::PageTable;
use crate::replacement::ReplacementPolicy;
use crate::stats::Statistics;
use crate::tlb::Tlb;
use crate::translation::{Access, AccessKind, AccessOutcome, VirtualAddress};

/// Owns the TLB, page table, frame table and counters of one simulation,
/// and drives them one access at a time.
#[derive(Debug, Clone)]
pub struct TranslationEngine {
    config: SimConfig,
    page_table: PageTable,
    tlb: Tlb,
    frames: FrameTable,
    policy: ReplacementPolicy,
    stats: Statistics,
}

impl TranslationEngine {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(TranslationEngine {
            config,
            page_table: PageTable::new(config.page_count),
            tlb: Tlb::new(config.tlb_capacity),
            frames: FrameTable::new(config.frame_count),
            policy: ReplacementPolicy::new(config.seed),
            stats: Statistics::new(),
        })
    }

    /// Empty every table and zero the counters. The random stream is not
    /// reseeded, so consecutive runs draw fresh tie-breaks.
    pub fn reset(&mut self) {
        self.page_table.clear();
        self.tlb.clear();
        self.frames.clear();
        self.stats.reset();
        info!(
            "reset: {} pages, {} TLB entries, {} frames, page size {}",
            self.config.page_count, self.config.tlb_capacity, self.config.frame_count, self.config.page_size
        );
    }

    /// Process one memory reference to completion.
    pub fn access(&mut self, address: u64, kind: AccessKind) -> Result<AccessOutcome> {
        let limit = self.config.address_space();
        if address >= limit {
            return Err(SimError::AddressOutOfRange { address, limit });
        }

        let va = VirtualAddress::from_raw(address, self.config.page_size);
        let vpn = va.vpn;

        if let Some(slot) = self.tlb.lookup(vpn) {
            self.stats.tlb_hits += 1;
            self.tlb.touch(slot, kind.is_write());
            let frame = self.tlb.entry(slot).frame;
            trace!("{}: TLB hit in slot {} -> frame {}", va, slot, frame);
            return Ok(AccessOutcome::TlbHit { frame });
        }

        self.stats.tlb_misses += 1;

        if self.page_table.is_resident(vpn) {
            self.stats.page_table_hits += 1;
            self.stats.page_table_accesses += 1;
            self.insert_free_or_evict(vpn);
            let frame = self.page_table.frame_of(vpn).unwrap_or_default();
            trace!("{}: TLB miss, resident in frame {}", va, frame);
            Ok(AccessOutcome::TlbMissResident { frame })
        } else {
            self.stats.page_faults += 1;
            self.stats.page_table_accesses += 1;
            let (frame, evicted) = self.service_fault(vpn, kind.is_write())?;
            self.insert_free_or_evict(vpn);
            debug!("{}: page fault, loaded into frame {}", va, frame);
            Ok(AccessOutcome::PageFault { frame, evicted })
        }
    }

    /// Replay a whole trace, stopping at the first failing access
    pub fn replay(&mut self, accesses: &[Access]) -> Result<Vec<AccessOutcome>> {
        accesses.iter().map(|a| self.access(a.address, a.kind)).collect()
    }

    /// Replay a trace, clearing every referenced bit after each `every`
    /// accesses. An `every` of zero never sweeps.
    pub fn replay_with_sweep(&mut self, accesses: &[Access], every: usize) -> Result<Vec<AccessOutcome>> {
        let mut outcomes = Vec::with_capacity(accesses.len());
        for (i, a) in accesses.iter().enumerate() {
            outcomes.push(self.access(a.address, a.kind)?);
            if every > 0 && (i + 1) % every == 0 {
                self.clear_reference_bits();
            }
        }
        Ok(outcomes)
    }

    /// Clear the referenced bit of every TLB entry and every page.
    /// Never called by `access`; the harness decides when it runs.
    pub fn clear_reference_bits(&mut self) {
        self.tlb.clear_referenced_bits();
        self.page_table.clear_referenced_bits();
        info!("cleared referenced bits");
    }

    pub fn snapshot(&self) -> Statistics {
        self.stats
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    pub fn frames(&self) -> &FrameTable {
        &self.frames
    }

    /// The engine's random source, shared with workload generation so one
    /// seed reproduces both the trace and the tie-breaks.
    pub fn rng(&mut self) -> &mut StdRng {
        self.policy.rng()
    }

    /// Cache the translation for resident page `vpn`, shooting down an entry
    /// when no slot is free. Returns whether a shootdown happened.
    fn insert_free_or_evict(&mut self, vpn: usize) -> bool {
        self.stats.tlb_writes += 1;

        if let Some(slot) = self.tlb.free_slot() {
            self.tlb.fill(slot, vpn, &self.page_table);
            return false;
        }

        let slot = self.policy.select_tlb_victim(&self.tlb);
        self.shootdown(slot);
        self.tlb.fill(slot, vpn, &self.page_table);
        true
    }

    /// Bring non-resident page `vpn` into a frame, evicting a page first
    /// when memory is full. Returns the frame and the evicted page, if any.
    fn service_fault(&mut self, vpn: usize, is_write: bool) -> Result<(usize, Option<usize>)> {
        let (frame, evicted) = match self.frames.claim(vpn) {
            Some(frame) => (frame, None),
            None => {
                let victim = self.policy.select_page_victim(&self.page_table)?;
                self.evict(victim);
                let frame = self.frames.claim(vpn).ok_or(SimError::NoEvictionCandidate)?;
                (frame, Some(victim))
            }
        };

        self.page_table.map(vpn, frame, is_write);
        self.stats.page_table_writes += 1;
        self.stats.disk_reads += 1;
        Ok((frame, evicted))
    }

    /// Invalidate TLB `slot` and write its bits back to the page table
    fn shootdown(&mut self, slot: usize) {
        self.stats.tlb_shootdowns += 1;
        if let Some(entry) = self.tlb.invalidate(slot) {
            self.page_table.write_back(entry.vpn, entry.dirty, entry.referenced);
            debug!(
                "shootdown slot {} (vpn {}, dirty={}, referenced={})",
                slot, entry.vpn, entry.dirty, entry.referenced
            );
        }
    }

    /// Remove resident page `vpn` from memory
    fn evict(&mut self, vpn: usize) {
        if let Some(slot) = self.tlb.lookup(vpn) {
            self.shootdown(slot);
        }

        let dirty = self.page_table.entry(vpn).dirty;
        if dirty {
            self.stats.disk_writes += 1;
        }

        if let Some(frame) = self.page_table.unmap(vpn) {
            self.frames.release(frame);
        }
        self.stats.page_evictions += 1;
        debug!("evicted vpn {} (dirty={})", vpn, dirty);
    }
}
