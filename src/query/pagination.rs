use serde::Serialize;

/// State tombol paging di bawah tabel. Total berasal dari server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl PageInfo {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        (self.page as u64) < self.total_pages
    }

    /// Nomor baris pertama dan terakhir yang tampil, untuk teks "1-10 dari 42".
    pub fn visible_range(&self, rows_on_page: usize) -> Option<(u64, u64)> {
        if rows_on_page == 0 {
            return None;
        }
        let first = (self.page as u64 - 1) * self.page_size as u64 + 1;
        Some((first, first + rows_on_page as u64 - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(page: u32, total_pages: u64) -> PageInfo {
        PageInfo {
            page,
            page_size: 10,
            total: total_pages * 10,
            total_pages,
        }
    }

    #[test]
    fn bounds_disable_navigation() {
        assert!(!info(1, 3).has_prev());
        assert!(info(1, 3).has_next());
        assert!(info(3, 3).has_prev());
        assert!(!info(3, 3).has_next());
        assert!(!info(1, 0).has_next());
    }

    #[test]
    fn visible_range_follows_page() {
        assert_eq!(info(2, 5).visible_range(10), Some((11, 20)));
        assert_eq!(info(5, 5).visible_range(3), Some((41, 43)));
        assert_eq!(info(1, 0).visible_range(0), None);
    }
}
