use super::AgcInst;
use crate::cpu::AgcCpu;

pub trait AgcInterrupt {
    fn inhint(&mut self, inst: &AgcInst) -> u16;
    fn relint(&mut self, inst: &AgcInst) -> u16;
    fn edrupt(&mut self, inst: &AgcInst) -> u16;
    fn resume(&mut self, inst: &AgcInst) -> u16;
}

impl AgcInterrupt for AgcCpu {
    fn inhint(&mut self, _inst: &AgcInst) -> u16 {
        self.gint = false;
        1
    }

    fn relint(&mut self, _inst: &AgcInst) -> u16 {
        self.gint = true;
        1
    }

    // Synthesize a pending interrupt at the vector in the operand.
    fn edrupt(&mut self, inst: &AgcInst) -> u16 {
        if self.gint {
            self.rupt.trigger_edrupt(inst.operand);
        }
        1
    }

    ///
    /// Return from interrupt service: drop the active flag, release the
    /// RUPT LOCK latch, and pop back to the interrupted program counter.
    ///
    fn resume(&mut self, _inst: &AgcInst) -> u16 {
        self.is_irupt = false;
        self.rupt.clear_lock();
        let ret = self.rupt_return;
        self.jump(ret);
        1
    }
}
