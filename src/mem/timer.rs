use crate::consts::cpu::MCT_MICROS;
use crate::consts::S15_NEG_ZERO;
use crate::rupt::AgcRupt;
use crate::utils::s15_add;

use crossbeam_channel::Sender;
use log::{debug, error};

use std::time::Instant;

#[derive(Clone, Copy, Debug)]
pub enum TimerType {
    Time1,
    Time3,
    Time4,
    Time5,
    Time6,
}

///
/// The five hardware counters. TIME3, TIME4 and TIME5 raise their RUPT when
/// the counter steps off the top of the word; TIME1 and TIME6 count the same
/// way but never interrupt. There is no TIME2 in this machine.
///
/// The counters move in Memory Cycle Times. `tick` paces them against the
/// wall clock through a monotonic anchor; `pump_mcts` advances them a known
/// number of MCTs for deterministic use.
///
pub struct AgcTimers {
    time1: u16,
    time3: u16,
    time4: u16,
    time5: u16,
    time6: u16,

    last_tick: Instant,
    rupt_tx: Sender<AgcRupt>,
}

impl AgcTimers {
    pub fn new(rupt_tx: Sender<AgcRupt>) -> AgcTimers {
        AgcTimers {
            time1: 0,
            time3: 0,
            time4: 0,
            time5: 0,
            time6: 0,
            last_tick: Instant::now(),
            rupt_tx,
        }
    }

    pub fn reset(&mut self) {
        self.time1 = 0;
        self.time3 = 0;
        self.time4 = 0;
        self.time5 = 0;
        self.time6 = 0;
        self.last_tick = Instant::now();
    }

    pub fn read(&self, timer: TimerType) -> u16 {
        match timer {
            TimerType::Time1 => self.time1,
            TimerType::Time3 => self.time3,
            TimerType::Time4 => self.time4,
            TimerType::Time5 => self.time5,
            TimerType::Time6 => self.time6,
        }
    }

    ///
    /// Raw counter load for hosts and tests. The counters are hardware
    /// registers, so the load is not normalized; a counter parked on the
    /// negative zero pattern overflows on its next step.
    ///
    pub fn set(&mut self, timer: TimerType, value: u16) {
        let slot = match timer {
            TimerType::Time1 => &mut self.time1,
            TimerType::Time3 => &mut self.time3,
            TimerType::Time4 => &mut self.time4,
            TimerType::Time5 => &mut self.time5,
            TimerType::Time6 => &mut self.time6,
        };
        *slot = value & crate::consts::S15_MASK;
    }

    ///
    /// Wall-clock pacing. Once at least one MCT has elapsed since the last
    /// anchor, re-anchor and advance the counters one step. Coarse pacing is
    /// acceptable; the anchor only has to be monotonic.
    ///
    pub fn tick(&mut self) {
        let elapsed_micros = self.last_tick.elapsed().as_micros() as f64;
        if elapsed_micros >= MCT_MICROS {
            self.last_tick = Instant::now();
            self.pump_mcts(1);
        }
    }

    ///
    /// Deterministic override that bypasses the clock and advances all
    /// counters by `mcts` steps.
    ///
    pub fn pump_mcts(&mut self, mcts: u16) {
        for _ in 0..mcts {
            self.time1 = self.bump(self.time1, None);
            self.time3 = self.bump(self.time3, Some(AgcRupt::T3Rupt));
            self.time4 = self.bump(self.time4, Some(AgcRupt::T4Rupt));
            self.time5 = self.bump(self.time5, Some(AgcRupt::T5Rupt));
            self.time6 = self.bump(self.time6, None);
        }
    }

    // One counter step. A counter sitting on the top pattern wraps to plus
    // zero and fires its interrupt; everything else takes the one's
    // complement +1.
    fn bump(&self, value: u16, rupt: Option<AgcRupt>) -> u16 {
        if value == S15_NEG_ZERO {
            if let Some(kind) = rupt {
                debug!("Timer overflow: {:?}", kind);
                if self.rupt_tx.send(kind).is_err() {
                    error!("Unable to pend {:?}; rupt channel closed", kind);
                }
            }
            0o00000
        } else {
            s15_add(value, 1)
        }
    }
}

#[cfg(test)]
mod agc_timer_tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn init_timers() -> (AgcTimers, crossbeam_channel::Receiver<AgcRupt>) {
        let (tx, rx) = unbounded();
        (AgcTimers::new(tx), rx)
    }

    #[test]
    fn pump_increments_all_timers_test() {
        let (mut timers, rx) = init_timers();
        timers.pump_mcts(3);

        assert_eq!(3, timers.read(TimerType::Time1));
        assert_eq!(3, timers.read(TimerType::Time3));
        assert_eq!(3, timers.read(TimerType::Time4));
        assert_eq!(3, timers.read(TimerType::Time5));
        assert_eq!(3, timers.read(TimerType::Time6));
        assert_eq!(true, rx.is_empty(), "No interrupt expected from count-up");
    }

    #[test]
    ///
    /// A TIME3 parked on the top pattern must wrap to plus zero and pend
    /// T3RUPT on the next step.
    ///
    fn time3_overflow_test() {
        let (mut timers, rx) = init_timers();
        timers.set(TimerType::Time3, 0o77777);
        timers.pump_mcts(1);

        assert_eq!(0o00000, timers.read(TimerType::Time3));
        assert_eq!(AgcRupt::T3Rupt, rx.try_recv().unwrap());
        assert_eq!(true, rx.is_empty());
    }

    #[test]
    fn time4_time5_overflow_test() {
        let (mut timers, rx) = init_timers();
        timers.set(TimerType::Time4, 0o77777);
        timers.set(TimerType::Time5, 0o77777);
        timers.pump_mcts(1);

        assert_eq!(AgcRupt::T4Rupt, rx.try_recv().unwrap());
        assert_eq!(AgcRupt::T5Rupt, rx.try_recv().unwrap());
        assert_eq!(true, rx.is_empty());
    }

    #[test]
    ///
    /// TIME1 and TIME6 count but never interrupt.
    ///
    fn time1_time6_silent_overflow_test() {
        let (mut timers, rx) = init_timers();
        timers.set(TimerType::Time1, 0o77777);
        timers.set(TimerType::Time6, 0o77777);
        timers.pump_mcts(1);

        assert_eq!(0o00000, timers.read(TimerType::Time1));
        assert_eq!(0o00000, timers.read(TimerType::Time6));
        assert_eq!(true, rx.is_empty());
    }
}
