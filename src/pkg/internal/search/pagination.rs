/// Offset/limit pair handed to a store. Both are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

/// Requested page, 1-indexed, as the client sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        PageRequest { page, limit }
    }

    /// offset = (page - 1) * limit, clamped at zero. A non-positive limit
    /// yields an empty window; page 0 and below read from the start.
    pub fn window(&self) -> PageWindow {
        let limit = self.limit.max(0);
        let offset = self.page.saturating_sub(1).saturating_mul(limit).max(0);
        PageWindow { offset, limit }
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 || self.limit <= 0 {
            return 0;
        }
        // ceil without overflowing on huge totals
        total / self.limit + i64::from(total % self.limit != 0)
    }
}
