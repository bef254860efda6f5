//! The queue seams between the driver and the application.
//!
//! The driver never owns a queue. It borrows one half of an externally owned
//! single-producer/single-consumer queue per bound pipe, so the other half can
//! be used concurrently from a different execution context.

use heapless::spsc::{Consumer, Producer};

use crate::Package;

/// The inbound side of an RX data pipe. The driver pushes received packages.
pub trait PackageSink {
    /// Push a package into the queue.
    ///
    /// The package is handed back if the queue is full.
    fn enqueue(&mut self, package: Package) -> Result<(), Package>;
}

/// The outbound side of the TX pipe. The driver pops packages to upload.
pub trait PackageSource {
    /// Pop the oldest queued package, if any.
    fn dequeue(&mut self) -> Option<Package>;

    /// Is there nothing left to transmit?
    fn is_empty(&self) -> bool;
}

impl<const N: usize> PackageSink for Producer<'_, Package, N> {
    fn enqueue(&mut self, package: Package) -> Result<(), Package> {
        Producer::enqueue(self, package)
    }
}

impl<const N: usize> PackageSource for Consumer<'_, Package, N> {
    fn dequeue(&mut self) -> Option<Package> {
        Consumer::dequeue(self)
    }

    fn is_empty(&self) -> bool {
        !Consumer::ready(self)
    }
}
