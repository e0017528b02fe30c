use crate::cpu::AgcCpu;
use crate::mem::AgcMemoryMap;

use crossbeam_channel::unbounded;

pub fn init_agc() -> AgcCpu {
    let (rupt_tx, rupt_rx) = unbounded();
    let mm = AgcMemoryMap::new(rupt_tx);
    AgcCpu::new(mm, rupt_rx)
}

pub fn validate_cpu_state(cpu: &AgcCpu, expect_pc: u16) {
    assert_eq!(cpu.z, expect_pc);
}

mod init_tests {
    #[test]
    fn helloworld() {
        let _ = env_logger::builder().is_test(true).try_init();
    }
}

mod arith;
