//! I2C1 slave receiver
//!
//! The embassy driver brings up clocks, pins and timing in master mode;
//! giving the peripheral an own address and enabling ACK then makes it
//! answer as a slave. Reception is polled from the event flags:
//!
//! ```text
//! ADDR  -> read SR1 then SR2 to release the clock stretch
//! RXNE  -> read DR, remember the byte
//! STOPF -> read SR1 then write CR1; the transfer is complete
//! AF    -> master NACKed (only on reads), clear it
//! ```
//!
//! Only the last byte of each write is kept, so the master's leading idle
//! byte never reaches the dispatcher.

use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::mode::Blocking;
use embassy_stm32::pac;
use embassy_stm32::pac::i2c::vals::Addmode;

/// Polled slave receiver on I2C1
pub struct SlaveReceiver {
    /// Held so the peripheral stays clocked
    _i2c: I2c<'static, Blocking, i2c::Master>,
    regs: pac::i2c::I2c,
    pending: Option<u8>,
}

impl SlaveReceiver {
    /// Take over an initialized I2C1 and listen on `address` (7-bit)
    pub fn new(i2c: I2c<'static, Blocking, i2c::Master>, address: u8) -> Self {
        let regs = pac::I2C1;
        regs.oar1().write(|w| {
            w.set_addmode(Addmode::BIT7);
            w.set_add((address as u16) << 1);
        });
        regs.cr1().modify(|w| {
            w.set_pe(true);
            w.set_ack(true);
        });
        Self {
            _i2c: i2c,
            regs,
            pending: None,
        }
    }

    /// Service the event flags
    ///
    /// Returns the last byte of a write once its stop condition is seen.
    pub fn poll(&mut self) -> Option<u8> {
        let sr1 = self.regs.sr1().read();

        if sr1.addr() {
            let _ = self.regs.sr2().read();
        }

        if sr1.rxne() {
            self.pending = Some(self.regs.dr().read().dr());
        }

        if sr1.af() {
            self.regs.sr1().modify(|w| w.set_af(false));
        }

        if sr1.stopf() {
            self.regs.cr1().modify(|w| w.set_pe(true));
            return self.pending.take();
        }

        None
    }
}
