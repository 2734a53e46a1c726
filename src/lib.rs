pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod memory;
pub mod page_table;
pub mod replacement;
pub mod report;
pub mod stats;
pub mod tlb;
pub mod translation;
pub mod vm_manager;
pub mod workload;

// Re-export commonly used items for convenience
pub use config::SimConfig;
pub use constants::*;
pub use error::{Result, SimError};
pub use stats::Statistics;
pub use translation::{Access, AccessKind, AccessOutcome, VirtualAddress};
pub use vm_manager::TranslationEngine;
pub use workload::Workload;
