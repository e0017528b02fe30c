use super::{init_agc, validate_cpu_state};

#[test]
///
/// Add, store, reload and subtract through the accumulator:
///
///     AD 1; TS 2; CA 2; SU 1
///
/// with erasable[0] = 5, erasable[1] = 10 and A starting at 5. The stored
/// sum must be 15 and the accumulator must come back around to 5.
///
fn add_store_reload_sub_test() {
    let mut cpu = init_agc();

    cpu.write_erasable(0, 5);
    cpu.write_erasable(1, 10);
    cpu.a = 5;

    cpu.execute_symbolic("AD", Some(1)).unwrap();
    assert_eq!(15, cpu.a);

    cpu.execute_symbolic("TS", Some(2)).unwrap();
    assert_eq!(0, cpu.a);

    cpu.execute_symbolic("CA", Some(2)).unwrap();
    assert_eq!(15, cpu.a);

    cpu.execute_symbolic("SU", Some(1)).unwrap();
    assert_eq!(5, cpu.a);
    assert_eq!(15, cpu.read_erasable(2));
    validate_cpu_state(&cpu, 4);
}

#[test]
fn ad_negative_operand_test() {
    let mut cpu = init_agc();

    // 5 + -5 folds through negative zero to plus zero
    cpu.write_erasable(0o20, 0o77772);
    cpu.a = 5;
    cpu.execute_symbolic("AD", Some(0o20)).unwrap();
    assert_eq!(0, cpu.a);
}

#[test]
fn mp_test() {
    let mut cpu = init_agc();

    cpu.a = 3;
    cpu.write_erasable(5, 4);
    cpu.execute_symbolic("MP", Some(5)).unwrap();
    assert_eq!(12, cpu.a);
    assert_eq!(0, cpu.l);

    // 0o20000 * 4 carries one bit into the upper word
    cpu.a = 0o20000;
    cpu.write_erasable(5, 4);
    cpu.execute_symbolic("MP", Some(5)).unwrap();
    assert_eq!(0, cpu.a);
    assert_eq!(1, cpu.l);
}

#[test]
fn dv_test() {
    let mut cpu = init_agc();

    cpu.a = 15;
    cpu.l = 0;
    cpu.write_erasable(6, 4);
    cpu.execute_symbolic("DV", Some(6)).unwrap();
    assert_eq!(3, cpu.a);
    assert_eq!(3, cpu.l);

    // The upper word of the dividend weighs 2^15
    cpu.a = 0;
    cpu.l = 1;
    cpu.write_erasable(6, 2);
    cpu.execute_symbolic("DV", Some(6)).unwrap();
    assert_eq!(0o40000, cpu.a);
    assert_eq!(0, cpu.l);
}

#[test]
///
/// Division by zero clears both registers and pends DSRUPT instead of
/// faulting the simulator.
///
fn dv_by_zero_test() {
    let mut cpu = init_agc();

    cpu.a = 15;
    cpu.l = 1;
    cpu.write_erasable(6, 0);
    cpu.execute_symbolic("DV", Some(6)).unwrap();

    assert_eq!(0, cpu.a);
    assert_eq!(0, cpu.l);
    assert_eq!(true, cpu.is_irupt, "DSRUPT should have been serviced");
    assert_eq!(crate::consts::rupt::VEC_DSRUPT, cpu.z);
}

#[test]
fn incr_aug_dim_test() {
    let mut cpu = init_agc();

    cpu.write_erasable(0o30, 7);
    cpu.execute_symbolic("INCR", Some(0o30)).unwrap();
    assert_eq!(8, cpu.read_erasable(0o30));

    cpu.a = 0o77776; // -1
    cpu.execute_symbolic("AUG", None).unwrap();
    assert_eq!(0, cpu.a);

    // DIM steps positive words down and negative words up, toward zero
    let cases = [(0o00005u16, 0o00004u16), (0o77772, 0o77773), (0o77776, 0o00000)];
    for (value, expect) in cases.iter() {
        cpu.write_erasable(0o31, *value);
        cpu.execute_symbolic("DIM", Some(0o31)).unwrap();
        assert_eq!(
            *expect,
            cpu.read_erasable(0o31),
            "DIM failed for 0o{:o}",
            value
        );
    }
}

#[test]
fn pinc_minc_test() {
    let mut cpu = init_agc();

    // PINC counts non-negative words only
    cpu.write_erasable(0o40, 0);
    cpu.execute_symbolic("PINC", Some(0o40)).unwrap();
    assert_eq!(1, cpu.read_erasable(0o40));

    cpu.write_erasable(0o40, 0o40001);
    cpu.execute_symbolic("PINC", Some(0o40)).unwrap();
    assert_eq!(0o40001, cpu.read_erasable(0o40));

    // MINC counts negative words only
    cpu.execute_symbolic("MINC", Some(0o40)).unwrap();
    assert_eq!(0o40002, cpu.read_erasable(0o40));

    cpu.write_erasable(0o40, 3);
    cpu.execute_symbolic("MINC", Some(0o40)).unwrap();
    assert_eq!(3, cpu.read_erasable(0o40));
}

#[test]
fn dad_test() {
    let mut cpu = init_agc();

    cpu.a = 1;
    cpu.l = 2;
    cpu.write_erasable(0o10, 3);
    cpu.write_erasable(0o11, 4);
    cpu.execute_symbolic("DAD", Some(0o10)).unwrap();
    assert_eq!(4, cpu.a);
    assert_eq!(6, cpu.l);

    // A low-word carry propagates into the upper word
    cpu.a = 1;
    cpu.l = 0o40000;
    cpu.write_erasable(0o10, 2);
    cpu.write_erasable(0o11, 0o40000);
    cpu.execute_symbolic("DAD", Some(0o10)).unwrap();
    assert_eq!(4, cpu.a);
    assert_eq!(0, cpu.l);
}

#[test]
fn das_test() {
    let mut cpu = init_agc();

    cpu.a = 1;
    cpu.l = 2;
    cpu.write_erasable(0o10, 3);
    cpu.write_erasable(0o11, 4);
    cpu.execute_symbolic("DAS", Some(0o10)).unwrap();

    // The sum lands in memory; A and L are untouched
    assert_eq!(4, cpu.read_erasable(0o10));
    assert_eq!(6, cpu.read_erasable(0o11));
    assert_eq!(1, cpu.a);
    assert_eq!(2, cpu.l);
}

#[test]
fn dsu_test() {
    let mut cpu = init_agc();

    cpu.a = 5;
    cpu.l = 3;
    cpu.write_erasable(0o10, 2);
    cpu.write_erasable(0o11, 4);
    cpu.execute_symbolic("DSU", Some(0o10)).unwrap();

    // The low borrow comes out of the upper word
    assert_eq!(2, cpu.a);
    assert_eq!(0o77776, cpu.l);
}

#[test]
fn dca_negative_zero_pair_test() {
    let mut cpu = init_agc();

    // Negative zero never survives a store; loading the pair back gives
    // plus zero in both registers.
    cpu.write_erasable(3, 0o77777);
    cpu.write_erasable(4, 0o77777);
    cpu.a = 0o12345;
    cpu.l = 0o54321;
    cpu.execute_symbolic("DCA", Some(3)).unwrap();
    assert_eq!(0, cpu.a);
    assert_eq!(0, cpu.l);
}

#[test]
fn dv_by_zero_inhibited_stays_pending_free_test() {
    let mut cpu = init_agc();

    // With interrupts inhibited the DSRUPT is dropped entirely
    cpu.execute_symbolic("INHINT", None).unwrap();
    cpu.write_erasable(6, 0);
    cpu.execute_symbolic("DV", Some(6)).unwrap();

    assert_eq!(false, cpu.is_irupt);
    assert_eq!(0, cpu.pending_rupts());
}
