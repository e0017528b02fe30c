use super::AgcInst;
use crate::cpu::AgcCpu;
use crate::utils::s15_normalize;

use log::warn;

pub trait AgcIo {
    fn read_instr(&mut self, inst: &AgcInst) -> u16;
    fn write_instr(&mut self, inst: &AgcInst) -> u16;
    fn rand(&mut self, inst: &AgcInst) -> u16;
}

impl AgcIo for AgcCpu {
    ///
    /// READ pulls a channel into the accumulator with the full channel bus
    /// side effects (UPRUPT/DOWNRUPT on the telemetry channels). An absent
    /// channel leaves A alone.
    ///
    fn read_instr(&mut self, inst: &AgcInst) -> u16 {
        let k = inst.operand as usize;
        match self.read_io(k) {
            Some(v) => {
                self.a = s15_normalize(v);
            }
            None => {
                warn!("READ from absent channel {:?}", k);
            }
        }
        2
    }

    fn write_instr(&mut self, inst: &AgcInst) -> u16 {
        let a = self.a;
        self.write_io(inst.operand as usize, a);
        2
    }

    ///
    /// Read-and-clear of the plain stored word, without the bus side
    /// effects of READ.
    ///
    fn rand(&mut self, inst: &AgcInst) -> u16 {
        let k = inst.operand as usize;
        match self.peek_io(k) {
            Some(v) => {
                self.a = s15_normalize(v);
                self.clear_io(k);
            }
            None => {
                warn!("RAND from absent channel {:?}", k);
            }
        }
        2
    }
}
