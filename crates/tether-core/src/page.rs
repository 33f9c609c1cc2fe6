use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Stateless offset/limit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Page {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// Applies the window to an already materialized list.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn slice_skips_then_takes() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(Page::new(3, 4).slice(items.clone()), vec![3, 4, 5, 6]);
        assert_eq!(Page::new(8, 100).slice(items.clone()), vec![8, 9]);
        assert!(Page::new(20, 5).slice(items).is_empty());
    }

    #[test]
    fn zero_limit_yields_nothing() {
        assert!(Page::new(0, 0).slice(vec![1, 2, 3]).is_empty());
    }
}
