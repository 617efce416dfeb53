use crate::error::MemoryError;

/// A source of game memory: a live process or a dump of one.
pub trait MemoryBackend {
    fn name(&self) -> &str;
    fn is_connected(&self) -> bool;
    fn read_bytes(&self, address: u32, length: usize) -> Result<Vec<u8>, MemoryError>;

    /// Reads a pointer at `address`, adds the first offset, reads the pointer
    /// there, and so on; returns the final address.
    fn follow_pointers(&self, address: u32, offsets: &[u32]) -> Result<u32, MemoryError>;
}

#[derive(Default)]
pub struct NullBackend;

impl MemoryBackend for NullBackend {
    fn name(&self) -> &str {
        "Nothing"
    }

    fn is_connected(&self) -> bool {
        false
    }

    fn read_bytes(&self, _address: u32, _length: usize) -> Result<Vec<u8>, MemoryError> {
        Err(MemoryError::Unavailable)
    }

    fn follow_pointers(&self, _address: u32, _offsets: &[u32]) -> Result<u32, MemoryError> {
        Err(MemoryError::Unavailable)
    }
}

/// A MEM1 dump loaded from disk.
pub struct BytesBackend {
    data: Vec<u8>,
}

impl BytesBackend {
    pub const MEM1_START: u32 = 0x8000_0000;
    pub const MEM1_SIZE: u32 = 0x0180_0000;

    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, MemoryError> {
        Ok(Self::new(std::fs::read(path)?))
    }

    fn check_valid_address(address: u32) -> Result<(), MemoryError> {
        if (Self::MEM1_START..Self::MEM1_START + Self::MEM1_SIZE).contains(&address) {
            Ok(())
        } else {
            Err(MemoryError::InvalidAddress(u64::from(address)))
        }
    }
}

impl MemoryBackend for BytesBackend {
    fn name(&self) -> &str {
        "File"
    }

    fn is_connected(&self) -> bool {
        true
    }

    fn read_bytes(&self, address: u32, length: usize) -> Result<Vec<u8>, MemoryError> {
        Self::check_valid_address(address)?;
        let start = (address - Self::MEM1_START) as usize;
        let end = (start + length).min(self.data.len());
        Ok(self.data.get(start..end).unwrap_or_default().to_vec())
    }

    fn follow_pointers(&self, address: u32, offsets: &[u32]) -> Result<u32, MemoryError> {
        let mut current = address;
        for offset in offsets {
            let bytes = self.read_bytes(current, 4)?;
            let pointer: [u8; 4] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| MemoryError::InvalidAddress(u64::from(current)))?;
            current = u32::from_be_bytes(pointer);
            Self::check_valid_address(current)?;
            current = current.wrapping_add(*offset);
        }
        Ok(current)
    }
}
