use crate::consts::io;
use crate::consts::S15_MASK;
use crate::mem::periph::dsky::AgcDsky;
use crate::rupt::AgcRupt;

use crossbeam_channel::Sender;
use log::{error, trace, warn};

///
/// The IO channel file: 33 numbered channels of 15-bit words on the channel
/// bus. Channels 10 and 11 alias the DSKY verb and noun latches, and a read
/// of channel 30 or 31 pends UPRUPT or DOWNRUPT for the telemetry software.
/// The bank-register side effect of a channel 12 write lives on the memory
/// map, which owns the bank registers.
///
pub struct AgcIoSpace {
    channels: [u16; io::NUM_CHANNELS],
    dsky: AgcDsky,
    rupt_tx: Sender<AgcRupt>,
}

impl AgcIoSpace {
    pub fn new(dsky: AgcDsky, rupt_tx: Sender<AgcRupt>) -> AgcIoSpace {
        AgcIoSpace {
            channels: [0; io::NUM_CHANNELS],
            dsky,
            rupt_tx,
        }
    }

    ///
    /// Channel read with its bus side effects. A nonexistent channel reads
    /// as the absent sentinel.
    ///
    pub fn read(&mut self, channel_idx: usize) -> Option<u16> {
        let val = match channel_idx {
            io::CHANNEL_DSKY_VERB => self.dsky.verb(),
            io::CHANNEL_DSKY_NOUN => self.dsky.noun(),
            io::CHANNEL_UPLINK => {
                self.raise(AgcRupt::UpRupt);
                self.channels[channel_idx]
            }
            io::CHANNEL_DOWNLINK => {
                self.raise(AgcRupt::DownRupt);
                self.channels[channel_idx]
            }
            _ if channel_idx < io::NUM_CHANNELS => self.channels[channel_idx],
            _ => {
                return None;
            }
        };
        trace!("IO Read: {:?}: 0o{:o}", channel_idx, val);
        Some(val)
    }

    ///
    /// Channel write. Out-of-range indices are silently dropped; in-range
    /// values are masked to 15 bits. Writes to the DSKY channels also latch
    /// the verb/noun registers.
    ///
    pub fn write(&mut self, channel_idx: usize, value: u16) {
        if channel_idx >= io::NUM_CHANNELS {
            warn!("IO Write to nonexistent channel {:?}", channel_idx);
            return;
        }

        let value = value & S15_MASK;
        trace!("IO Write: {:?}: 0o{:o}", channel_idx, value);
        self.channels[channel_idx] = value;

        match channel_idx {
            io::CHANNEL_DSKY_VERB => self.dsky.set_verb(value),
            io::CHANNEL_DSKY_NOUN => self.dsky.set_noun(value),
            _ => {}
        }
    }

    ///
    /// Plain stored word, without the read side effects. Used by RAND.
    ///
    pub fn peek(&self, channel_idx: usize) -> Option<u16> {
        match channel_idx {
            io::CHANNEL_DSKY_VERB => Some(self.dsky.verb()),
            io::CHANNEL_DSKY_NOUN => Some(self.dsky.noun()),
            _ if channel_idx < io::NUM_CHANNELS => Some(self.channels[channel_idx]),
            _ => None,
        }
    }

    ///
    /// Zero the backing word of a channel without re-running write side
    /// effects. Used by RAND; in particular a RAND of channel 12 must not
    /// clear the bank registers.
    ///
    pub fn clear(&mut self, channel_idx: usize) {
        if channel_idx >= io::NUM_CHANNELS {
            return;
        }
        self.channels[channel_idx] = 0;
        match channel_idx {
            io::CHANNEL_DSKY_VERB => self.dsky.set_verb(0),
            io::CHANNEL_DSKY_NOUN => self.dsky.set_noun(0),
            _ => {}
        }
    }

    pub fn dsky(&self) -> &AgcDsky {
        &self.dsky
    }

    pub fn dsky_mut(&mut self) -> &mut AgcDsky {
        &mut self.dsky
    }

    fn raise(&self, kind: AgcRupt) {
        if self.rupt_tx.send(kind).is_err() {
            error!("Unable to pend {:?}; rupt channel closed", kind);
        }
    }
}
