use crate::constants::*;
use crate::error::{Result, SimError};

/// Table sizes and the optional RNG seed for one simulator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub page_count: usize,
    pub tlb_capacity: usize,
    pub frame_count: usize,
    pub page_size: u64,
    pub seed: Option<u64>,
}

impl SimConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of addressable bytes, `page_count * page_size`.
    ///
    /// Only meaningful on a validated config.
    pub fn address_space(&self) -> u64 {
        self.page_count as u64 * self.page_size
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_count == 0 || self.tlb_capacity == 0 || self.frame_count == 0 {
            return Err(SimError::InvalidConfig(
                "page, TLB and frame counts must be non-zero".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(SimError::InvalidConfig("page size must be non-zero".to_string()));
        }
        if self.frame_count > self.page_count {
            return Err(SimError::InvalidConfig(format!(
                "{} frames exceed {} virtual pages",
                self.frame_count, self.page_count
            )));
        }
        if (self.page_count as u64).checked_mul(self.page_size).is_none() {
            return Err(SimError::InvalidConfig(
                "address space does not fit in 64 bits".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            page_count: PAGE_COUNT,
            tlb_capacity: TLB_CAPACITY,
            frame_count: FRAME_COUNT,
            page_size: PAGE_SIZE,
            seed: None,
        }
    }
}
