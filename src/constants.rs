// number of virtual pages covered by the page table
pub const PAGE_COUNT: usize = 1024;
pub const TLB_CAPACITY: usize = 8;
pub const FRAME_COUNT: usize = 256;

// bytes per page, so the default address space is 0..1_048_576
pub const PAGE_SIZE: u64 = 1024;

pub const ADDRESS_SPACE: u64 = PAGE_COUNT as u64 * PAGE_SIZE;
