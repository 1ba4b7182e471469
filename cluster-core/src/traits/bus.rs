//! Master-to-slave command link

/// Errors from the command link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Slave did not acknowledge
    Nack,
    /// Bus fault (arbitration, misplaced start/stop)
    Bus,
}

/// Write-only link to the slave MCU
///
/// Delivery is fire-and-forget: the caller never retries, and the next
/// periodic update supersedes a lost byte.
pub trait CommandSink {
    /// Write one opcode byte to the slave
    fn send(&mut self, opcode: u8) -> Result<(), BusError>;
}
