//! Canned access traces used to exercise the simulator.
//!
//! Cases 1-3 are fixed address lists. Cases 4-8 are random and draw from
//! the caller's generator, so a seeded generator reproduces them.

use rand::Rng;

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::translation::{Access, AccessKind};

const CASE_1: [(u64, bool); 5] = [(51, true), (374, false), (846, true), (219, true), (433, true)];

const CASE_2: [(u64, bool); 5] = [
    (178406, true),
    (442630, false),
    (507896, true),
    (212346, false),
    (439947, false),
];

const CASE_3: [(u64, bool); 20] = [
    (845, false),
    (1857, true),
    (2103, true),
    (4081, true),
    (5068, true),
    (5535, true),
    (6345, true),
    (7304, false),
    (8704, true),
    (9315, true),
    (10374, false),
    (12160, false),
    (12961, true),
    (13553, false),
    (14405, true),
    (15578, false),
    (16960, true),
    (18067, false),
    (18734, true),
    (20470, false),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workload {
    /// Five accesses inside page 0
    FirstPage,
    /// Five scattered accesses
    Scattered,
    /// Twenty accesses walking upward through low memory
    Ascending,
    /// 500 uniform random addresses, mixed reads and writes
    UniformMixed,
    /// 500 uniform random addresses, all writes
    UniformWrites,
    /// 25 page-local bursts of 40 accesses
    ShortBursts,
    /// 300 page-local bursts of 10 accesses
    LongSweep,
    /// 4 bursts of 40 accesses on every other page
    StridedBursts,
}

impl Workload {
    pub const ALL: [Workload; 8] = [
        Workload::FirstPage,
        Workload::Scattered,
        Workload::Ascending,
        Workload::UniformMixed,
        Workload::UniformWrites,
        Workload::ShortBursts,
        Workload::LongSweep,
        Workload::StridedBursts,
    ];

    /// Look up a workload by its menu number, 1 through 8
    pub fn from_case(case: u8) -> Result<Self> {
        match case {
            1..=8 => Ok(Self::ALL[usize::from(case - 1)]),
            _ => Err(SimError::UnknownCase(case)),
        }
    }

    pub fn case(self) -> u8 {
        Self::ALL.iter().position(|&w| w == self).map_or(0, |i| i as u8 + 1)
    }

    pub fn description(self) -> &'static str {
        match self {
            Workload::FirstPage => "five accesses within the first page",
            Workload::Scattered => "five scattered accesses",
            Workload::Ascending => "twenty ascending accesses",
            Workload::UniformMixed => "500 random accesses, reads and writes",
            Workload::UniformWrites => "500 random writes",
            Workload::ShortBursts => "25 page-local bursts of 40",
            Workload::LongSweep => "300 page-local bursts of 10",
            Workload::StridedBursts => "4 bursts of 40 on alternating pages",
        }
    }

    /// Build the trace for `config`'s address space.
    pub fn generate<R: Rng + ?Sized>(self, config: &SimConfig, rng: &mut R) -> Vec<Access> {
        let space = config.address_space();
        let page_size = config.page_size;

        match self {
            Workload::FirstPage => fixed(&CASE_1),
            Workload::Scattered => fixed(&CASE_2),
            Workload::Ascending => fixed(&CASE_3),
            Workload::UniformMixed => uniform(rng, space, 500, None),
            Workload::UniformWrites => uniform(rng, space, 500, Some(AccessKind::Write)),
            Workload::ShortBursts => bursts(rng, page_size, space, (0..25).collect(), 40),
            Workload::LongSweep => bursts(rng, page_size, space, (0..300).collect(), 10),
            Workload::StridedBursts => bursts(rng, page_size, space, (0..8).step_by(2).collect(), 40),
        }
    }
}

fn fixed(entries: &[(u64, bool)]) -> Vec<Access> {
    entries
        .iter()
        .map(|&(address, is_write)| Access { address, kind: is_write.into() })
        .collect()
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, space: u64, count: usize, kind: Option<AccessKind>) -> Vec<Access> {
    (0..count)
        .map(|_| Access {
            address: rng.gen_range(0..space),
            kind: kind.unwrap_or_else(|| rng.gen_bool(0.5).into()),
        })
        .collect()
}

/// `per_group` accesses for each group `i`, drawn from
/// `[i * page_size, (i + 1) * page_size]`. The upper end is inclusive, so a
/// burst occasionally touches the first byte of the following page.
fn bursts<R: Rng + ?Sized>(
    rng: &mut R,
    page_size: u64,
    space: u64,
    groups: Vec<u64>,
    per_group: usize,
) -> Vec<Access> {
    let last = space - 1;
    let mut trace = Vec::with_capacity(groups.len() * per_group);
    for group in groups {
        let low = (group * page_size).min(last);
        let high = (low + page_size).min(last);
        for _ in 0..per_group {
            trace.push(Access {
                address: rng.gen_range(low..=high),
                kind: rng.gen_bool(0.5).into(),
            });
        }
    }
    trace
}
