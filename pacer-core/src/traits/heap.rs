//! Allocator statistics

/// Source of free-heap figures
pub trait HeapStats {
    /// Current free heap in bytes, or `None` if the query failed
    fn free_bytes(&self) -> Option<usize>;
}

impl<T: HeapStats + ?Sized> HeapStats for &T {
    fn free_bytes(&self) -> Option<usize> {
        (**self).free_bytes()
    }
}
