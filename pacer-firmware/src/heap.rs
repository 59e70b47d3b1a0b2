//! Global allocator

use embedded_alloc::LlffHeap as Heap;
use pacer_core::traits::HeapStats;

#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 32KB
const HEAP_SIZE: usize = 32 * 1024;

/// Hand the heap its backing memory; call once before the first allocation
pub fn init() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}

/// Free-heap figures read from the global allocator
pub struct AllocatorStats;

impl HeapStats for AllocatorStats {
    fn free_bytes(&self) -> Option<usize> {
        Some(HEAP.free())
    }
}
