/* Number of Erasable Banks within a given AGC computer */
pub const RAM_NUM_BANKS: usize = 8;

/* Number of words within a given Erasable memory bank */
pub const RAM_BANK_NUM_WORDS: usize = 256;

/* Total number of Erasable words across all banks */
pub const RAM_NUM_WORDS: usize = RAM_NUM_BANKS * RAM_BANK_NUM_WORDS;

/* Number of Fixed Banks within a given AGC computer */
pub const ROM_NUM_BANKS: usize = 36;

/* Number of words within a given Fixed memory bank */
pub const ROM_BANK_NUM_WORDS: usize = 1024;

/* Total number of Fixed words across all banks */
pub const ROM_NUM_WORDS: usize = ROM_NUM_BANKS * ROM_BANK_NUM_WORDS;

/* Mask down to the 15 bits of an AGC word */
pub const S15_MASK: u16 = 0o77777;

/* The one's complement negative zero bit pattern. Never stored; every
 * write path normalizes it back to plus zero. */
pub const S15_NEG_ZERO: u16 = 0o77777;

/* Sign bit of a s15 one's complement word */
pub const S15_SIGN_BIT: u16 = 0o40000;

pub mod cpu {
    // One Memory Cycle Time is 11.7us (12 ticks of the 1.024MHz clock).
    // The wall-clock timer pacing is derived from this.
    pub const MCT_MICROS: f64 = 11.7;
}

pub mod io {
    /* Number of addressable IO channels on the channel bus */
    pub const NUM_CHANNELS: usize = 33;

    pub const CHANNEL_DSKY_VERB: usize = 10;
    pub const CHANNEL_DSKY_NOUN: usize = 11;
    pub const CHANNEL_BANKSET: usize = 12;
    pub const CHANNEL_UPLINK: usize = 30;
    pub const CHANNEL_DOWNLINK: usize = 31;
}

pub mod rupt {
    // Vectored entry addresses for each interrupt source.
    pub const VEC_T3RUPT: u16 = 0x4004;
    pub const VEC_T4RUPT: u16 = 0x4008;
    pub const VEC_T5RUPT: u16 = 0x400C;
    pub const VEC_DSRUPT: u16 = 0x4010;
    pub const VEC_KEYRUPT: u16 = 0x4014;
    pub const VEC_UPRUPT: u16 = 0x4018;
    pub const VEC_DOWNRUPT: u16 = 0x401C;

    // Service priorities, higher is more urgent. Ties break by arrival.
    pub const PRIO_T3RUPT: u8 = 3;
    pub const PRIO_T4RUPT: u8 = 2;
    pub const PRIO_DSRUPT: u8 = 2;
    pub const PRIO_T5RUPT: u8 = 1;
    pub const PRIO_KEYRUPT: u8 = 1;
    pub const PRIO_UPRUPT: u8 = 1;
    pub const PRIO_DOWNRUPT: u8 = 1;
    pub const PRIO_EDRUPT: u8 = 1;

    // More than this many interrupts pending at once latches RUPT LOCK.
    pub const RUPT_LOCK_DEPTH: usize = 5;
}

pub mod opcodes {
    /* Basic opcodes live in bits 14..12 of the instruction word */
    pub const BASIC_TCCLASS: u16 = 0o0;
    pub const BASIC_CCS: u16 = 0o1;
    pub const BASIC_INDEX: u16 = 0o2;
    pub const BASIC_XCH: u16 = 0o3;
    pub const BASIC_CA: u16 = 0o4;
    pub const BASIC_CS: u16 = 0o5;
    pub const BASIC_TS: u16 = 0o6;
    pub const BASIC_AD: u16 = 0o7;

    /* Opcode 0 uses bits 11..10 to select within the TC class */
    pub const SUB_TC: u16 = 0o0;
    pub const SUB_RELINT: u16 = 0o1;
    pub const SUB_INHINT: u16 = 0o2;
    pub const SUB_EXTEND: u16 = 0o3;

    /* Extended opcodes live in bits 14..10 after an EXTEND prefix */
    pub const EXT_MP: u16 = 0o00;
    pub const EXT_DV: u16 = 0o01;
    pub const EXT_SU: u16 = 0o02;
    pub const EXT_DCA: u16 = 0o03;
    pub const EXT_DCS: u16 = 0o04;
    pub const EXT_DAD: u16 = 0o05;
    pub const EXT_DAS: u16 = 0o06;
    pub const EXT_DSU: u16 = 0o07;
    pub const EXT_LXCH: u16 = 0o10;
    pub const EXT_QXCH: u16 = 0o11;
    pub const EXT_INCR: u16 = 0o12;
    pub const EXT_AUG: u16 = 0o13;
    pub const EXT_DIM: u16 = 0o14;
    pub const EXT_BZF: u16 = 0o15;
    pub const EXT_BZM: u16 = 0o16;
    pub const EXT_EDRUPT: u16 = 0o17;
    pub const EXT_RESUME: u16 = 0o20;
    pub const EXT_CYR: u16 = 0o21;
    pub const EXT_SR: u16 = 0o22;
    pub const EXT_SL: u16 = 0o23;
    pub const EXT_PINC: u16 = 0o24;
    pub const EXT_MINC: u16 = 0o25;
    pub const EXT_DXCH: u16 = 0o26;
    pub const EXT_CAF: u16 = 0o27;
    pub const EXT_TCAF: u16 = 0o30;
    pub const EXT_RAND: u16 = 0o31;
    pub const EXT_MSK: u16 = 0o32;
    pub const EXT_READ: u16 = 0o33;
    pub const EXT_WRITE: u16 = 0o34;
    pub const EXT_NOOP: u16 = 0o35;

    /* Reserved tokens. Outside the 5-bit fetchable opcode space; accepted
     * on the symbolic interface only. */
    pub const EXT_INOT: u16 = 0o52;
    pub const EXT_INOTR: u16 = 0o53;
}
