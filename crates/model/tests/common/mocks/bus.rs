use std::collections::HashMap;

use mockall::mock;
use rvmodel_core::common::BusError;
use rvmodel_core::soc::DeviceBus;
use rvmodel_core::soc::traits::check_alignment;

mock! {
    pub Bus {}
    impl DeviceBus for Bus {
        fn read_u16(&mut self, addr: u64) -> Result<u16, BusError>;
        fn read_u32(&mut self, addr: u64) -> Result<u32, BusError>;
        fn write_u32(&mut self, addr: u64, val: u32) -> Result<(), BusError>;
    }
}

/// A flat, fully mapped bus that remembers every store in order.
#[derive(Debug, Default)]
pub struct RecordingBus {
    words: HashMap<u64, u32>,
    pub writes: Vec<(u64, u32)>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preloads a word without logging it.
    pub fn poke(&mut self, addr: u64, val: u32) {
        self.words.insert(addr & !3, val);
    }

    /// Preloads a halfword without logging it.
    pub fn poke_u16(&mut self, addr: u64, val: u16) {
        let shift = (addr & 2) * 8;
        let word = self.words.entry(addr & !3).or_default();
        *word = (*word & !(0xFFFF << shift)) | (u32::from(val) << shift);
    }

    pub fn peek(&self, addr: u64) -> u32 {
        self.words.get(&(addr & !3)).copied().unwrap_or(0)
    }

    /// Values stored to `addr`, in order.
    pub fn writes_to(&self, addr: u64) -> Vec<u32> {
        self.writes
            .iter()
            .filter(|(a, _)| *a == addr)
            .map(|(_, v)| *v)
            .collect()
    }
}

impl DeviceBus for RecordingBus {
    fn read_u16(&mut self, addr: u64) -> Result<u16, BusError> {
        check_alignment(addr, 2)?;
        Ok((self.peek(addr) >> ((addr & 2) * 8)) as u16)
    }

    fn read_u32(&mut self, addr: u64) -> Result<u32, BusError> {
        check_alignment(addr, 4)?;
        Ok(self.peek(addr))
    }

    fn write_u32(&mut self, addr: u64, val: u32) -> Result<(), BusError> {
        check_alignment(addr, 4)?;
        self.words.insert(addr, val);
        self.writes.push((addr, val));
        Ok(())
    }
}
