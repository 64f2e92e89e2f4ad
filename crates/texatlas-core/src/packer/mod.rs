//! Page-level packing machinery: free-region tracking, region scoring and
//! splitting, and page allocation.

pub mod allocator;
pub mod free_space;
pub mod heuristic;

pub use allocator::{Page, PageAllocator};
pub use free_space::FreeSpace;
