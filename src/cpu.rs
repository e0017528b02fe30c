use crate::consts::S15_MASK;
use crate::instr;
use crate::instr::{AgcArith, AgcControlFlow, AgcInterrupt, AgcIo, AgcLoadStore, AgcLogic};
use crate::instr::{AgcInst, AgcMnem};
use crate::mem::AgcMemoryMap;
use crate::rupt::{AgcRupt, AgcRuptQueue};
use crate::utils::s15_add;
use crate::AgcError;

use crossbeam_channel::Receiver;
use log::{debug, trace, warn};

///
/// The machine. Owns the register file, the extended-opcode latch, the
/// interrupt state and the memory map, and runs one instruction at a time:
/// interrupts are only ever serviced at the boundary between instructions.
///
pub struct AgcCpu {
    pub mem: AgcMemoryMap,

    pub a: u16,
    pub l: u16,
    pub q: u16,
    pub z: u16,

    // Extended-opcode latch. Set by EXTEND, held through exactly one
    // following instruction unless that instruction is EXTEND again.
    pub ec_flag: bool,

    pub gint: bool,
    pub is_irupt: bool,
    pub rupt_return: u16,
    pub rupt: AgcRuptQueue,

    pub tc_trap: bool,

    pub total_cycles: usize,
    pub cycles: u16,

    rupt_rx: Receiver<AgcRupt>,
    z_latched: bool,
}

impl AgcCpu {
    pub fn new(mem: AgcMemoryMap, rupt_rx: Receiver<AgcRupt>) -> AgcCpu {
        let mut cpu = AgcCpu {
            mem,
            a: 0,
            l: 0,
            q: 0,
            z: 0,
            ec_flag: false,
            gint: true,
            is_irupt: false,
            rupt_return: 0,
            rupt: AgcRuptQueue::new(),
            tc_trap: false,
            total_cycles: 0,
            cycles: 0,
            rupt_rx,
            z_latched: false,
        };

        cpu.reset();
        cpu
    }

    pub fn reset(&mut self) {
        self.a = 0;
        self.l = 0;
        self.q = 0;
        self.z = 0;
        self.ec_flag = false;
        self.gint = true;
        self.is_irupt = false;
        self.rupt_return = 0;
        self.rupt = AgcRuptQueue::new();
        self.tc_trap = false;
    }

    // ------------------------------------------------------------------
    // Memory and channel access for the instruction handlers
    // ------------------------------------------------------------------

    pub fn read_erasable(&mut self, offset: usize) -> u16 {
        self.mem.read_erasable(offset)
    }

    pub fn write_erasable(&mut self, offset: usize, value: u16) {
        self.mem.write_erasable(offset, value)
    }

    pub fn read_fixed(&mut self, offset: usize) -> u16 {
        self.mem.read_fixed(offset)
    }

    pub fn read_io(&mut self, channel_idx: usize) -> Option<u16> {
        self.mem.read_io(channel_idx)
    }

    pub fn write_io(&mut self, channel_idx: usize, value: u16) {
        self.mem.write_io(channel_idx, value)
    }

    pub fn peek_io(&self, channel_idx: usize) -> Option<u16> {
        self.mem.peek_io(channel_idx)
    }

    pub fn clear_io(&mut self, channel_idx: usize) {
        self.mem.clear_io(channel_idx)
    }

    ///
    /// Control transfer. An instruction that lands here owns the program
    /// counter for this cycle; the post-instruction advance is suppressed so
    /// branch targets are not double-advanced.
    ///
    pub(crate) fn jump(&mut self, target: u16) {
        self.z = target & S15_MASK;
        self.z_latched = true;
    }

    // ------------------------------------------------------------------
    // Interrupts
    // ------------------------------------------------------------------

    ///
    /// Pend an interrupt. Requires the enable flag; an inhibited machine
    /// drops the event on the floor.
    ///
    pub fn trigger_rupt(&mut self, kind: AgcRupt) {
        if !self.gint {
            debug!("Dropping {:?}; interrupts inhibited", kind);
            return;
        }
        self.rupt.trigger(kind);
    }

    // Pull in everything the peripherals have raised since the last
    // instruction boundary.
    fn drain_rupts(&mut self) {
        while let Ok(kind) = self.rupt_rx.try_recv() {
            self.trigger_rupt(kind);
        }
    }

    ///
    /// Service at most one pending interrupt: save the program counter,
    /// mark the service active, and vector. Nothing happens while inhibited,
    /// while another service is active, or under a freshly latched EXTEND
    /// (the extended instruction must run before anything vectors).
    ///
    pub fn process_interrupts(&mut self) {
        self.drain_rupts();

        if !self.gint || self.is_irupt || self.ec_flag {
            return;
        }

        if let Some(entry) = self.rupt.pop() {
            debug!(
                "Servicing {:?} at 0x{:04x}, return 0x{:04x}",
                entry.kind, entry.vector, self.z
            );
            self.rupt_return = self.z;
            self.is_irupt = true;
            self.z = entry.vector & S15_MASK;
        }
    }

    ///
    /// Number of interrupts waiting, after draining the peripheral events.
    ///
    pub fn pending_rupts(&mut self) -> usize {
        self.drain_rupts();
        self.rupt.len()
    }

    pub fn rupt_lock(&self) -> bool {
        self.rupt.rupt_lock()
    }

    pub fn parity_fail(&self) -> bool {
        self.mem.parity_fail()
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    fn dispatch(&mut self, inst: &AgcInst) -> u16 {
        match inst.mnem {
            AgcMnem::TC => self.tc(inst),
            AgcMnem::CCS => self.ccs(inst),
            AgcMnem::INDEX => self.index(inst),
            AgcMnem::XCH => self.xch(inst),
            AgcMnem::CA => self.ca(inst),
            AgcMnem::CS => self.cs(inst),
            AgcMnem::TS => self.ts(inst),
            AgcMnem::AD => self.ad(inst),
            AgcMnem::MSK => self.msk(inst),
            AgcMnem::EXTEND => {
                self.ec_flag = true;
                1
            }
            AgcMnem::RELINT => self.relint(inst),
            AgcMnem::INHINT => self.inhint(inst),
            AgcMnem::MP => self.mp(inst),
            AgcMnem::DV => self.dv(inst),
            AgcMnem::SU => self.su(inst),
            AgcMnem::DCA => self.dca(inst),
            AgcMnem::DCS => self.dcs(inst),
            AgcMnem::DAD => self.dad(inst),
            AgcMnem::DAS => self.das(inst),
            AgcMnem::DSU => self.dsu(inst),
            AgcMnem::LXCH => self.lxch(inst),
            AgcMnem::QXCH => self.qxch(inst),
            AgcMnem::INCR => self.incr(inst),
            AgcMnem::AUG => self.aug(inst),
            AgcMnem::DIM => self.dim(inst),
            AgcMnem::BZF => self.bzf(inst),
            AgcMnem::BZM => self.bzm(inst),
            AgcMnem::EDRUPT => self.edrupt(inst),
            AgcMnem::RESUME => self.resume(inst),
            AgcMnem::CYR => self.cyr(inst),
            AgcMnem::SR => self.sr(inst),
            AgcMnem::SL => self.sl(inst),
            AgcMnem::PINC => self.pinc(inst),
            AgcMnem::MINC => self.minc(inst),
            AgcMnem::DXCH => self.dxch(inst),
            AgcMnem::CAF => self.caf(inst),
            AgcMnem::TCAF => self.tcaf(inst),
            AgcMnem::RAND => self.rand(inst),
            AgcMnem::READ => self.read_instr(inst),
            AgcMnem::WRITE => self.write_instr(inst),
            AgcMnem::NOOP => self.noop(inst),
            AgcMnem::INOT | AgcMnem::INOTR => {
                warn!("Reserved instruction {:?}; treated as NOOP", inst.mnem);
                1
            }
            AgcMnem::INVALID => {
                warn!("Invalid instruction word at 0o{:o}", inst.pc);
                1
            }
        }
    }

    ///
    /// Run one instruction through the full boundary sequence: dispatch,
    /// advance the program counter unless the instruction transferred
    /// control, drop the extended latch unless the instruction was EXTEND,
    /// service at most one interrupt, and account the MCT cost.
    ///
    pub fn execute(&mut self, inst: &AgcInst) {
        trace!("0o{:o}: {:?} 0o{:o}", inst.pc, inst.mnem, inst.operand);

        let was_extended = self.ec_flag;
        self.z_latched = false;
        self.cycles = self.dispatch(inst);

        if !self.z_latched {
            self.z = s15_add(self.z, 1);
        }

        if was_extended && inst.mnem != AgcMnem::EXTEND {
            self.ec_flag = false;
        }

        self.process_interrupts();
        self.total_cycles += self.cycles as usize;
    }

    ///
    /// Fetch-execute step: drain host keypresses, give the timer block its
    /// wall tick, then run the word under the program counter.
    ///
    pub fn step(&mut self) -> u16 {
        self.mem.service_dsky();
        self.mem.fetch_timers().tick();

        let pc = self.z;
        let word = self.mem.read_fixed(pc as usize);
        let inst = instr::decode(pc, word, self.ec_flag);
        self.execute(&inst);
        self.cycles
    }

    ///
    /// Symbolic instruction interface: execute one `(mnemonic, operand)`
    /// tuple through the same boundary sequence as a fetched word. An
    /// unknown mnemonic is a programmer error. Returns the MCT cost.
    ///
    pub fn execute_symbolic(&mut self, mnemonic: &str, operand: Option<u16>) -> Result<u16, AgcError> {
        let inst = instr::from_symbolic(self.z, mnemonic, operand)?;
        self.execute(&inst);
        Ok(self.cycles)
    }

    ///
    /// Deterministic timer advance for hosts and tests; MCTs pumped here
    /// bypass the wall clock entirely.
    ///
    pub fn pump_timers(&mut self, mcts: u16) {
        self.mem.fetch_timers().pump_mcts(mcts);
    }

    pub fn print_state(&self) {
        debug!(
            "A: {:05o} L: {:05o} Q: {:05o} Z: {:05o} EB: {:o} FB: {:o} BB: {:o}",
            self.a,
            self.l,
            self.q,
            self.z,
            self.mem.ebank(),
            self.mem.fbank(),
            self.mem.bbank()
        );
        debug!(
            "EC: {:?} GINT: {:?} IRUPT: {:?} pending: {:?} cycles: {:?}",
            self.ec_flag,
            self.gint,
            self.is_irupt,
            self.rupt.len(),
            self.total_cycles
        );
    }
}
