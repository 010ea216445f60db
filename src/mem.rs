//! Allocator Configuration
//!
//! Optional global-allocator features:
//! - `mimalloc`: use mimalloc as the global allocator
//! - `memory_tracking`: wrap the allocator to count live and peak bytes
//!
//! Both are off by default; a library should not install a global
//! allocator unless the embedding build asks for one.

#[cfg(feature = "memory_tracking")]
mod tracking {
    use std::alloc::{GlobalAlloc, Layout};
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub static ALLOCATED: AtomicUsize = AtomicUsize::new(0);
    pub static PEAK_ALLOCATED: AtomicUsize = AtomicUsize::new(0);

    pub struct TrackingAllocator;

    #[cfg(feature = "mimalloc")]
    static UNDERLYING: mimalloc::MiMalloc = mimalloc::MiMalloc;

    #[cfg(not(feature = "mimalloc"))]
    static UNDERLYING: std::alloc::System = std::alloc::System;

    unsafe impl GlobalAlloc for TrackingAllocator {
        unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
            let ptr = UNDERLYING.alloc(layout);
            if !ptr.is_null() {
                let current = ALLOCATED.fetch_add(layout.size(), Ordering::Relaxed) + layout.size();
                let mut peak = PEAK_ALLOCATED.load(Ordering::Relaxed);
                while current > peak {
                    match PEAK_ALLOCATED.compare_exchange_weak(
                        peak,
                        current,
                        Ordering::Relaxed,
                        Ordering::Relaxed,
                    ) {
                        Ok(_) => break,
                        Err(p) => peak = p,
                    }
                }
            }
            ptr
        }

        unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
            ALLOCATED.fetch_sub(layout.size(), Ordering::Relaxed);
            UNDERLYING.dealloc(ptr, layout)
        }
    }
}

#[cfg(feature = "memory_tracking")]
#[global_allocator]
static GLOBAL: tracking::TrackingAllocator = tracking::TrackingAllocator;

#[cfg(all(feature = "mimalloc", not(feature = "memory_tracking")))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Bytes currently allocated through the tracking allocator
#[cfg(feature = "memory_tracking")]
pub fn current_allocated() -> usize {
    tracking::ALLOCATED.load(std::sync::atomic::Ordering::SeqCst)
}

/// Peak bytes allocated since start (or last reset)
#[cfg(feature = "memory_tracking")]
pub fn peak_allocated() -> usize {
    tracking::PEAK_ALLOCATED.load(std::sync::atomic::Ordering::SeqCst)
}

/// Reset peak tracking to the current allocation level
///
/// Returns (current, previous peak).
#[cfg(feature = "memory_tracking")]
pub fn reset_stats() -> (usize, usize) {
    use std::sync::atomic::Ordering;
    let current = tracking::ALLOCATED.load(Ordering::SeqCst);
    let peak = tracking::PEAK_ALLOCATED.swap(current, Ordering::SeqCst);
    (current, peak)
}

#[cfg(not(feature = "memory_tracking"))]
pub fn current_allocated() -> usize {
    0
}

#[cfg(not(feature = "memory_tracking"))]
pub fn peak_allocated() -> usize {
    0
}

#[cfg(not(feature = "memory_tracking"))]
pub fn reset_stats() -> (usize, usize) {
    (0, 0)
}
