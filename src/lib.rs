//! An interrupt-driven driver for the nRF24L01+ transceiver.
//!
//! The driver frames every SPI transaction itself, tracks the radio's
//! operating mode, and multiplexes the six RX data pipes and the single
//! TX pipe through externally owned single-producer/single-consumer queues.
//!
//! ## Basic API
//!
//! - [`Nrf24::new()`](fn@crate::radio::Nrf24::new)
//! - [`Nrf24::init()`](radio/struct.Nrf24.html#method.init)
//! - [`Nrf24::configure_rx_pipe()`](fn@crate::radio::Nrf24::configure_rx_pipe)
//! - [`Nrf24::configure_tx_pipe()`](fn@crate::radio::Nrf24::configure_tx_pipe)
//! - [`Nrf24::enable_data_pipe()`](fn@crate::radio::Nrf24::enable_data_pipe)
//! - [`Nrf24::disable_data_pipe()`](fn@crate::radio::Nrf24::disable_data_pipe)
//! - [`Nrf24::set_mode()`](radio/struct.Nrf24.html#method.set_mode)
//! - [`Nrf24::dispatch()`](fn@crate::radio::Nrf24::dispatch)
//!
//! ## Deferred interrupt handling
//!
//! The IRQ line's callback only bumps an [`IrqNotifier`]. All SPI traffic
//! happens in task context through [`RadioTask::poll()`](fn@crate::radio::RadioTask::poll),
//! which drains the RX FIFO into the per-pipe queues and refills the
//! TX FIFO from the outbound queue. After pushing outbound packages, call
//! [`IrqNotifier::notify()`] so the next poll starts the transmission.
//!
//! [`IrqNotifier`] relies on the `critical-section` crate. The final binary
//! has to link an implementation of it (most HAL crates ship one).
//!
//! ```ignore
//! static NOTIFIER: IrqNotifier = IrqNotifier::new();
//!
//! let mut inbound: Queue<Package, 8> = Queue::new();
//! let (mut producer, mut consumer) = inbound.split();
//!
//! let radio = Nrf24::new(ce_pin, spi, delay);
//! let mut task = RadioTask::new(radio, irq_pin, &NOTIFIER);
//! task.setup()?;
//! task.radio().configure_rx_pipe(1, &mut producer, 0xC2C2C2C2C2)?;
//! task.radio().set_mode(OperatingMode::Rx)?;
//! loop {
//!     task.poll();
//!     while let Some(package) = consumer.dequeue() {
//!         // ...
//!     }
//! }
//! ```
#![no_std]

#[macro_use]
mod fmt;

mod types;
pub use types::{
    CrcLength, DataRate, FifoState, OperatingMode, Package, PaLevel, PipeIndex, StatusFlags,
};
mod queue;
pub use queue::{PackageSink, PackageSource};
mod irq;
pub use irq::{EventHandler, InterruptLine, IrqNotifier};
pub mod radio;
