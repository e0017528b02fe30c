use super::AgcInst;
use crate::consts::RAM_NUM_WORDS;
use crate::cpu::AgcCpu;
use crate::rupt::AgcRupt;
use crate::utils::{s15_add, s15_is_negative, s15_normalize, s15_sign, s15_sub};

use log::debug;

// Double-precision operand pair at (k, k+1), wrapped to the erasable store.
fn double_read(cpu: &mut AgcCpu, k: usize) -> (u16, u16) {
    let hi = cpu.read_erasable(k);
    let lo = cpu.read_erasable((k + 1) % RAM_NUM_WORDS);
    (hi, lo)
}

///
/// Double add of `(A, L)` against the memory pair. The carry into the upper
/// word comes off the pre-normalized native sum of the low words; the low
/// result itself is then normalized.
///
fn double_sum(cpu: &mut AgcCpu, k: usize) -> (u16, u16) {
    let (m_hi, m_lo) = double_read(cpu, k);

    let lo_native = cpu.l as u32 + m_lo as u32;
    let carry = (lo_native >> 15) as u16;
    let lo = s15_normalize((lo_native & 0o77777) as u16);
    let hi = s15_add(s15_add(cpu.a, m_hi), carry);

    (hi, lo)
}

pub trait AgcArith {
    fn ad(&mut self, inst: &AgcInst) -> u16;
    fn su(&mut self, inst: &AgcInst) -> u16;
    fn mp(&mut self, inst: &AgcInst) -> u16;
    fn dv(&mut self, inst: &AgcInst) -> u16;
    fn incr(&mut self, inst: &AgcInst) -> u16;
    fn aug(&mut self, inst: &AgcInst) -> u16;
    fn dim(&mut self, inst: &AgcInst) -> u16;
    fn dad(&mut self, inst: &AgcInst) -> u16;
    fn das(&mut self, inst: &AgcInst) -> u16;
    fn dsu(&mut self, inst: &AgcInst) -> u16;
    fn pinc(&mut self, inst: &AgcInst) -> u16;
    fn minc(&mut self, inst: &AgcInst) -> u16;
}

impl AgcArith for AgcCpu {
    fn ad(&mut self, inst: &AgcInst) -> u16 {
        let k = self.read_erasable(inst.operand as usize);
        self.a = s15_add(self.a, k);
        2
    }

    fn su(&mut self, inst: &AgcInst) -> u16 {
        let k = self.read_erasable(inst.operand as usize);
        self.a = s15_sub(self.a, k);
        2
    }

    ///
    /// Raw 15x15 multiply: the low word of the product lands in A, the high
    /// word in L.
    ///
    fn mp(&mut self, inst: &AgcInst) -> u16 {
        let k = self.read_erasable(inst.operand as usize);
        let product = self.a as u32 * k as u32;

        self.l = s15_normalize(((product >> 15) & 0o77777) as u16);
        self.a = s15_normalize((product & 0o77777) as u16);
        6
    }

    ///
    /// Divide the 30-bit `(L, A)` dividend by the memory word. Division by
    /// zero clears both registers and pends DSRUPT so the software can
    /// observe the alarm, rather than faulting the simulator.
    ///
    fn dv(&mut self, inst: &AgcInst) -> u16 {
        let divisor = self.read_erasable(inst.operand as usize);
        if divisor == 0 {
            debug!("DV by zero at 0o{:o}; pending DSRUPT", inst.pc);
            self.a = 0;
            self.l = 0;
            self.trigger_rupt(AgcRupt::DsRupt);
            return 6;
        }

        let dividend = (self.l as u32) << 15 | self.a as u32;
        self.a = s15_normalize((dividend / divisor as u32 & 0o77777) as u16);
        self.l = s15_normalize((dividend % divisor as u32) as u16);
        6
    }

    fn incr(&mut self, inst: &AgcInst) -> u16 {
        let k = inst.operand as usize;
        let v = self.read_erasable(k);
        self.write_erasable(k, s15_add(v, 1));
        2
    }

    fn aug(&mut self, _inst: &AgcInst) -> u16 {
        self.a = s15_add(self.a, 1);
        1
    }

    // Positive words step down, everything else steps up.
    fn dim(&mut self, inst: &AgcInst) -> u16 {
        let k = inst.operand as usize;
        let v = self.read_erasable(k);
        let newv = if s15_sign(v) > 0 {
            s15_sub(v, 1)
        } else {
            s15_add(v, 1)
        };
        self.write_erasable(k, newv);
        2
    }

    fn dad(&mut self, inst: &AgcInst) -> u16 {
        let (hi, lo) = double_sum(self, inst.operand as usize);
        self.a = hi;
        self.l = lo;
        6
    }

    ///
    /// Same double sum as DAD, but the result goes back to the memory pair
    /// and A/L are left alone.
    ///
    fn das(&mut self, inst: &AgcInst) -> u16 {
        let k = inst.operand as usize;
        let (hi, lo) = double_sum(self, k);
        self.write_erasable(k, hi);
        self.write_erasable((k + 1) % RAM_NUM_WORDS, lo);
        6
    }

    fn dsu(&mut self, inst: &AgcInst) -> u16 {
        let (m_hi, m_lo) = double_read(self, inst.operand as usize);

        // Borrow comes off the native difference of the low words
        let borrow = if (self.l as i32) < (m_lo as i32) { 1 } else { 0 };
        let lo = s15_sub(self.l, m_lo);
        let hi = s15_sub(s15_sub(self.a, m_hi), borrow);

        self.a = hi;
        self.l = lo;
        6
    }

    fn pinc(&mut self, inst: &AgcInst) -> u16 {
        let k = inst.operand as usize;
        let v = self.read_erasable(k);
        if !s15_is_negative(v) {
            self.write_erasable(k, s15_add(v, 1));
        }
        2
    }

    fn minc(&mut self, inst: &AgcInst) -> u16 {
        let k = inst.operand as usize;
        let v = self.read_erasable(k);
        if s15_is_negative(v) {
            self.write_erasable(k, s15_add(v, 1));
        }
        2
    }
}
