pub mod io;
pub mod periph;
mod ram;
mod rom;
pub mod timer;

pub use io::AgcIoSpace;

use crate::consts;
use crate::consts::io as io_consts;
use crate::rupt::AgcRupt;
use crate::utils::{s15_normalize, s15_odd_parity};

use crossbeam_channel::Sender;
use log::{trace, warn};

// ============================================================================
// Trait Declarations
// ============================================================================
trait AgcMemType {
    fn read(&self, bank_idx: usize, bank_offset: usize) -> u16;
    fn write(&mut self, bank_idx: usize, bank_offset: usize, value: u16);
}

///
/// The memory map glues the erasable and fixed stores, the channel file and
/// the timer block together and owns the bank registers that page them.
/// Erasable addressing runs through EB, fixed addressing through FB, and the
/// packed BB is kept consistent by the one bank-update helper.
///
pub struct AgcMemoryMap {
    ram: ram::AgcRam,
    rom: rom::AgcRom,
    io: io::AgcIoSpace,
    timers: timer::AgcTimers,

    ebank: u16,
    fbank: u16,
    bbank: u16,

    parity_fail: bool,
}

impl AgcMemoryMap {
    pub fn new(rupt_tx: Sender<AgcRupt>) -> AgcMemoryMap {
        let dsky = periph::dsky::AgcDsky::new(rupt_tx.clone());
        AgcMemoryMap {
            ram: ram::AgcRam::new(),
            rom: rom::AgcRom::new(),
            io: io::AgcIoSpace::new(dsky, rupt_tx.clone()),
            timers: timer::AgcTimers::new(rupt_tx),
            ebank: 0,
            fbank: 0,
            bbank: 0,
            parity_fail: false,
        }
    }

    #[allow(dead_code)]
    pub fn reset(&mut self) {
        self.ram.reset();
        self.timers.reset();
        self.ebank = 0;
        self.fbank = 0;
        self.bbank = 0;
        self.parity_fail = false;
    }

    ///
    /// Erasable read through the EB window. The flat address is
    /// `EB * 256 + offset`, wrapped to the store; an offset past the store
    /// entirely latches the parity fault and reads zero.
    ///
    pub fn read_erasable(&mut self, offset: usize) -> u16 {
        if offset >= consts::RAM_NUM_WORDS {
            warn!("Erasable read out of range: 0o{:o}", offset);
            self.parity_fail = true;
            return 0;
        }

        let idx = (self.ebank as usize * consts::RAM_BANK_NUM_WORDS + offset)
            % consts::RAM_NUM_WORDS;
        s15_normalize(self.ram.read(
            idx / consts::RAM_BANK_NUM_WORDS,
            idx % consts::RAM_BANK_NUM_WORDS,
        ))
    }

    pub fn write_erasable(&mut self, offset: usize, value: u16) {
        if offset >= consts::RAM_NUM_WORDS {
            warn!("Erasable write out of range: 0o{:o}", offset);
            self.parity_fail = true;
            return;
        }

        let idx = (self.ebank as usize * consts::RAM_BANK_NUM_WORDS + offset)
            % consts::RAM_NUM_WORDS;
        let stored = s15_normalize(value);
        self.ram.write(
            idx / consts::RAM_BANK_NUM_WORDS,
            idx % consts::RAM_BANK_NUM_WORDS,
            stored,
        );
        self.check_parity(stored);
    }

    ///
    /// Fixed read through the FB window, flat address `FB * 1024 + offset`
    /// wrapped to the store.
    ///
    pub fn read_fixed(&mut self, offset: usize) -> u16 {
        if offset >= consts::ROM_NUM_WORDS {
            warn!("Fixed read out of range: 0o{:o}", offset);
            self.parity_fail = true;
            return 0;
        }

        let idx = (self.fbank as usize * consts::ROM_BANK_NUM_WORDS + offset)
            % consts::ROM_NUM_WORDS;
        s15_normalize(self.rom.read(
            idx / consts::ROM_BANK_NUM_WORDS,
            idx % consts::ROM_BANK_NUM_WORDS,
        ))
    }

    pub fn write_fixed(&mut self, offset: usize, value: u16) {
        if offset >= consts::ROM_NUM_WORDS {
            warn!("Fixed write out of range: 0o{:o}", offset);
            self.parity_fail = true;
            return;
        }

        let idx = (self.fbank as usize * consts::ROM_BANK_NUM_WORDS + offset)
            % consts::ROM_NUM_WORDS;
        let stored = s15_normalize(value);
        self.rom.write(
            idx / consts::ROM_BANK_NUM_WORDS,
            idx % consts::ROM_BANK_NUM_WORDS,
            stored,
        );
        self.check_parity(stored);
    }

    // Odd parity is expected on every stored word; an even-popcount store
    // latches the fault for software to inspect.
    fn check_parity(&mut self, stored: u16) {
        if !s15_odd_parity(stored) {
            trace!("Parity fail on stored word 0o{:o}", stored);
            self.parity_fail = true;
        }
    }

    pub fn read_io(&mut self, channel_idx: usize) -> Option<u16> {
        self.io.read(channel_idx)
    }

    ///
    /// Channel write. The channel 12 side effect on the bank registers is
    /// applied here, before the next instruction fetch can observe it.
    ///
    pub fn write_io(&mut self, channel_idx: usize, value: u16) {
        if channel_idx == io_consts::CHANNEL_BANKSET {
            self.update_banks(value);
        }
        self.io.write(channel_idx, value);
    }

    pub fn peek_io(&self, channel_idx: usize) -> Option<u16> {
        self.io.peek(channel_idx)
    }

    pub fn clear_io(&mut self, channel_idx: usize) {
        self.io.clear(channel_idx);
    }

    // The one place the bank registers change. EB and FB come out of the
    // channel word and BB is recomputed to pack them.
    fn update_banks(&mut self, value: u16) {
        self.ebank = (value >> 3) & 0o7;
        self.fbank = (value >> 9) & 0o37;
        self.bbank = (self.fbank << 3) | self.ebank;
        trace!(
            "Bank update: EB 0o{:o} FB 0o{:o} BB 0o{:o}",
            self.ebank,
            self.fbank,
            self.bbank
        );
    }

    pub fn ebank(&self) -> u16 {
        self.ebank
    }

    pub fn fbank(&self) -> u16 {
        self.fbank
    }

    pub fn bbank(&self) -> u16 {
        self.bbank
    }

    pub fn parity_fail(&self) -> bool {
        self.parity_fail
    }

    pub fn fetch_timers(&mut self) -> &mut timer::AgcTimers {
        &mut self.timers
    }

    pub fn dsky(&self) -> &periph::dsky::AgcDsky {
        self.io.dsky()
    }

    pub fn dsky_mut(&mut self) -> &mut periph::dsky::AgcDsky {
        self.io.dsky_mut()
    }

    pub fn service_dsky(&mut self) {
        self.io.dsky_mut().poll_keypresses();
    }

    ///
    /// Binary program loader. The byte stream is taken as big-endian 16-bit
    /// quantities, masked to 15 bits, and placed sequentially into fixed
    /// memory beginning at offset 0 of the current fixed bank. A trailing
    /// odd byte is ignored.
    ///
    pub fn load_program(&mut self, bytes: &[u8]) {
        let base = self.fbank as usize * consts::ROM_BANK_NUM_WORDS;
        for (word_idx, c) in bytes.chunks_exact(2).enumerate() {
            let word = (c[0] as u16) << 8 | c[1] as u16;
            self.rom
                .load_raw((base + word_idx) % consts::ROM_NUM_WORDS, word);
        }
    }
}
