//! Text rendering of a finished run.

use std::fmt::Write;

use crate::stats::Statistics;
use crate::translation::Access;

const RULE: &str = "-----------------------------------------------------------------------------";

/// Per-access listing: step, kind, address and page number
pub fn render_trace(accesses: &[Access], page_size: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{:^77}", "VIRTUAL MEMORY SIMULATION");
    let _ = writeln!(out, "{RULE}");
    for (t, access) in accesses.iter().enumerate() {
        let _ = writeln!(
            out,
            "T: {:6}     Address: {} {:7}            VPN: {}",
            t + 1,
            access.kind.tag(),
            access.address,
            access.address / page_size
        );
    }
    out
}

pub fn render_stats(stats: &Statistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{:^77}", "SIMULATION RESULTS");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "TLB hits: {:<12}TLB misses: {:<12}TLB hit rate: {}",
        stats.tlb_hits,
        stats.tlb_misses,
        percent(stats.tlb_hit_rate())
    );
    let _ = writeln!(
        out,
        "TLB shootdowns: {:<6}TLB writes: {}",
        stats.tlb_shootdowns, stats.tlb_writes
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Pg table accesses: {}", stats.page_table_accesses);
    let _ = writeln!(
        out,
        "Pg table hits: {:<7}Pg faults: {:<13}Pg table hit rate: {}",
        stats.page_table_hits,
        stats.page_faults,
        percent(stats.page_table_hit_rate())
    );
    let _ = writeln!(
        out,
        "Pg evictions: {:<8}Pg table writes: {}",
        stats.page_evictions, stats.page_table_writes
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Hard disk reads: {:<5}Hard disk writes: {}",
        stats.disk_reads, stats.disk_writes
    );
    let _ = writeln!(out, "{RULE}");
    out
}

fn percent(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:.2}%", rate * 100.0),
        None => "n/a".to_string(),
    }
}
