/// Physical memory, one slot per frame.
///
/// Each occupied frame records the virtual page it holds, so the frame
/// table can answer "who owns frame F" without scanning the page table.
#[derive(Debug, Clone)]
pub struct FrameTable {
    owners: Vec<Option<usize>>,
}

impl FrameTable {
    /// Create a frame table with every frame free
    pub fn new(frame_count: usize) -> Self {
        FrameTable { owners: vec![None; frame_count] }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.owners.len()
    }

    #[inline]
    pub fn is_occupied(&self, frame: usize) -> bool {
        self.owners[frame].is_some()
    }

    /// Page currently held by `frame`, if any
    #[inline]
    pub fn owner(&self, frame: usize) -> Option<usize> {
        self.owners[frame]
    }

    pub fn occupied_count(&self) -> usize {
        self.owners.iter().filter(|owner| owner.is_some()).count()
    }

    pub fn free_count(&self) -> usize {
        self.capacity() - self.occupied_count()
    }

    pub fn is_full(&self) -> bool {
        self.owners.iter().all(Option::is_some)
    }

    /// Claim the lowest-numbered free frame for `vpn`.
    /// Returns `None` when every frame is occupied.
    pub fn claim(&mut self, vpn: usize) -> Option<usize> {
        let frame = self.owners.iter().position(Option::is_none)?;
        self.owners[frame] = Some(vpn);
        Some(frame)
    }

    /// Release `frame`, returning the page that held it
    pub fn release(&mut self, frame: usize) -> Option<usize> {
        self.owners[frame].take()
    }

    pub fn clear(&mut self) {
        self.owners.fill(None);
    }
}
