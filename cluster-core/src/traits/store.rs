//! Byte-addressed persistent store

/// Errors from the persistent store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Device did not respond
    Bus,
    /// Address outside the device
    OutOfRange,
}

/// Byte-addressed non-volatile memory
pub trait ByteStore {
    /// Read one byte
    fn read(&mut self, address: u8) -> Result<u8, StoreError>;

    /// Write one byte
    ///
    /// Returns once the write has been accepted by the device.
    fn write(&mut self, address: u8, value: u8) -> Result<(), StoreError>;
}
