use crate::consts::rupt::*;

use log::{debug, warn};

///
/// Interrupt sources known to the machine. Each fixed source carries a
/// service priority and a vectored entry address; EDRUPT is the one source
/// whose vector is supplied by the instruction that pends it.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgcRupt {
    T3Rupt,
    T4Rupt,
    T5Rupt,
    DsRupt,
    KeyRupt,
    UpRupt,
    DownRupt,
    EdRupt,
}

impl AgcRupt {
    pub fn priority(self) -> u8 {
        match self {
            AgcRupt::T3Rupt => PRIO_T3RUPT,
            AgcRupt::T4Rupt => PRIO_T4RUPT,
            AgcRupt::T5Rupt => PRIO_T5RUPT,
            AgcRupt::DsRupt => PRIO_DSRUPT,
            AgcRupt::KeyRupt => PRIO_KEYRUPT,
            AgcRupt::UpRupt => PRIO_UPRUPT,
            AgcRupt::DownRupt => PRIO_DOWNRUPT,
            AgcRupt::EdRupt => PRIO_EDRUPT,
        }
    }

    pub fn vector(self) -> Option<u16> {
        match self {
            AgcRupt::T3Rupt => Some(VEC_T3RUPT),
            AgcRupt::T4Rupt => Some(VEC_T4RUPT),
            AgcRupt::T5Rupt => Some(VEC_T5RUPT),
            AgcRupt::DsRupt => Some(VEC_DSRUPT),
            AgcRupt::KeyRupt => Some(VEC_KEYRUPT),
            AgcRupt::UpRupt => Some(VEC_UPRUPT),
            AgcRupt::DownRupt => Some(VEC_DOWNRUPT),
            AgcRupt::EdRupt => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PendingRupt {
    pub kind: AgcRupt,
    pub priority: u8,
    pub vector: u16,
}

///
/// `AgcRuptQueue` holds the interrupts waiting to be serviced, ordered by
/// descending priority with arrival order preserved among equals. The queue
/// stays small by construction; a depth beyond `RUPT_LOCK_DEPTH` means a
/// flood has gone unserviced and latches the RUPT LOCK fault.
///
pub struct AgcRuptQueue {
    pending: Vec<PendingRupt>,
    rupt_lock: bool,
}

impl AgcRuptQueue {
    pub fn new() -> AgcRuptQueue {
        AgcRuptQueue {
            pending: Vec::with_capacity(RUPT_LOCK_DEPTH + 1),
            rupt_lock: false,
        }
    }

    pub fn trigger(&mut self, kind: AgcRupt) {
        let vector = match kind.vector() {
            Some(v) => v,
            None => {
                warn!("EDRUPT pended without a vector; ignoring");
                return;
            }
        };
        self.insert(PendingRupt {
            kind,
            priority: kind.priority(),
            vector,
        });
    }

    ///
    /// EDRUPT carries its vector in the instruction word rather than the
    /// vector table, so it gets its own entry point.
    ///
    pub fn trigger_edrupt(&mut self, vector: u16) {
        self.insert(PendingRupt {
            kind: AgcRupt::EdRupt,
            priority: PRIO_EDRUPT,
            vector,
        });
    }

    // Sorted insertion: after every entry of greater or equal priority.
    fn insert(&mut self, entry: PendingRupt) {
        let pos = self
            .pending
            .iter()
            .position(|p| p.priority < entry.priority)
            .unwrap_or(self.pending.len());
        self.pending.insert(pos, entry);
        debug!(
            "Pending {:?} (prio {}) at depth {}",
            entry.kind,
            entry.priority,
            self.pending.len()
        );

        if self.pending.len() > RUPT_LOCK_DEPTH {
            debug!("RUPT LOCK: {} interrupts pending", self.pending.len());
            self.rupt_lock = true;
        }
    }

    pub fn pop(&mut self) -> Option<PendingRupt> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn rupt_lock(&self) -> bool {
        self.rupt_lock
    }

    // RESUME is the only thing that releases the RUPT LOCK latch.
    pub fn clear_lock(&mut self) {
        self.rupt_lock = false;
    }
}
