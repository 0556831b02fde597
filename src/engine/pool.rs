//! Transmit buffer pool
//!
//! The build path acquires exactly-sized buffers from a [`BufferPool`] and
//! hands them off fully populated; pool lifecycle and locking discipline
//! belong to the I/O engine. [`HeapPool`] is a fixed-capacity, heap-backed
//! implementation with mempool semantics: exhaustion is an error, never a
//! fresh allocation, and there is no retry inside the codec.

use std::sync::{Arc, Mutex};

use crate::{Error, Result};

/// An owned, contiguous frame buffer obtained from a pool
#[derive(Debug)]
pub struct FrameBuffer {
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Wrap an engine-owned allocation. The vector's length is the frame
    /// length on the wire.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

/// Buffer lifecycle contract the codec builds against
pub trait BufferPool {
    /// Hand out a zeroed buffer of exactly `size` bytes, or
    /// [`Error::AllocationFailed`] if the pool cannot.
    fn acquire(&self, size: usize) -> Result<FrameBuffer>;

    /// Return a buffer for reuse.
    fn release(&self, buffer: FrameBuffer);

    /// Largest frame this pool can supply; build requests are validated
    /// against it before any allocation.
    fn max_frame_size(&self) -> usize;
}

/// Fixed-size free-list pool over heap allocations
#[derive(Debug, Clone)]
pub struct HeapPool {
    free: Arc<Mutex<Vec<Vec<u8>>>>,
    buffer_size: usize,
}

impl HeapPool {
    /// Pre-allocate `count` buffers of `buffer_size` capacity each.
    pub fn new(buffer_size: usize, count: usize) -> Self {
        let mut free = Vec::with_capacity(count);
        for _ in 0..count {
            free.push(Vec::with_capacity(buffer_size));
        }
        Self {
            free: Arc::new(Mutex::new(free)),
            buffer_size,
        }
    }

    /// Number of buffers currently available
    pub fn available(&self) -> usize {
        self.free.lock().unwrap().len()
    }
}

impl BufferPool for HeapPool {
    fn acquire(&self, size: usize) -> Result<FrameBuffer> {
        if size > self.buffer_size {
            return Err(Error::AllocationFailed { requested: size });
        }

        let mut data = self
            .free
            .lock()
            .unwrap()
            .pop()
            .ok_or(Error::AllocationFailed { requested: size })?;

        data.clear();
        data.resize(size, 0);
        Ok(FrameBuffer { data })
    }

    fn release(&self, buffer: FrameBuffer) {
        let mut data = buffer.into_vec();
        data.clear();
        self.free.lock().unwrap().push(data);
    }

    fn max_frame_size(&self) -> usize {
        self.buffer_size
    }
}
