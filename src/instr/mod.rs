pub mod arith;
pub mod cf;
pub mod intrpt;
pub mod io;
pub mod ldst;
pub mod logic;

pub use arith::AgcArith;
pub use cf::AgcControlFlow;
pub use intrpt::AgcInterrupt;
pub use io::AgcIo;
pub use ldst::AgcLoadStore;
pub use logic::AgcLogic;

#[cfg(test)]
pub mod tests;

use crate::consts::opcodes::*;
use crate::consts::S15_MASK;
use crate::AgcError;

const DATA_MASK: u16 = 0o7777; // Basic address field, bits 11..0
const DATA_MASK_TC: u16 = 0o1777; // TC-class address field, bits 9..0
const DATA_MASK_EXTENDED: u16 = 0o1777; // Extended address field, bits 9..0
const OPCODE_OFFSET: u16 = 12;
const OPCODE_OFFSET_EXTENDED: u16 = 10;
const SUBCODE_OFFSET: u16 = 10;
const SUBCODE_MASK: u16 = 0o3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgcMnem {
    TC,
    CCS,
    INDEX,
    XCH,
    CA,
    CS,
    TS,
    AD,
    MSK,
    EXTEND,
    RELINT,
    INHINT,
    MP,
    DV,
    SU,
    DCA,
    DCS,
    DAD,
    DAS,
    DSU,
    LXCH,
    QXCH,
    INCR,
    AUG,
    DIM,
    BZF,
    BZM,
    EDRUPT,
    RESUME,
    CYR,
    SR,
    SL,
    PINC,
    MINC,
    DXCH,
    CAF,
    TCAF,
    RAND,
    READ,
    WRITE,
    NOOP,
    INOT,
    INOTR,
    INVALID,
}

impl AgcMnem {
    ///
    /// Mnemonic lookup for the symbolic instruction interface. `MASK` is
    /// accepted as the alternate spelling of `MSK`. An unknown mnemonic is a
    /// programmer error raised to the caller.
    ///
    pub fn from_mnemonic(s: &str) -> Result<AgcMnem, AgcError> {
        let mnem = match s {
            "TC" => AgcMnem::TC,
            "CCS" => AgcMnem::CCS,
            "INDEX" => AgcMnem::INDEX,
            "XCH" => AgcMnem::XCH,
            "CA" => AgcMnem::CA,
            "CS" => AgcMnem::CS,
            "TS" => AgcMnem::TS,
            "AD" => AgcMnem::AD,
            "MSK" | "MASK" => AgcMnem::MSK,
            "EXTEND" => AgcMnem::EXTEND,
            "RELINT" => AgcMnem::RELINT,
            "INHINT" => AgcMnem::INHINT,
            "MP" => AgcMnem::MP,
            "DV" => AgcMnem::DV,
            "SU" => AgcMnem::SU,
            "DCA" => AgcMnem::DCA,
            "DCS" => AgcMnem::DCS,
            "DAD" => AgcMnem::DAD,
            "DAS" => AgcMnem::DAS,
            "DSU" => AgcMnem::DSU,
            "LXCH" => AgcMnem::LXCH,
            "QXCH" => AgcMnem::QXCH,
            "INCR" => AgcMnem::INCR,
            "AUG" => AgcMnem::AUG,
            "DIM" => AgcMnem::DIM,
            "BZF" => AgcMnem::BZF,
            "BZM" => AgcMnem::BZM,
            "EDRUPT" => AgcMnem::EDRUPT,
            "RESUME" => AgcMnem::RESUME,
            "CYR" => AgcMnem::CYR,
            "SR" => AgcMnem::SR,
            "SL" => AgcMnem::SL,
            "PINC" => AgcMnem::PINC,
            "MINC" => AgcMnem::MINC,
            "DXCH" => AgcMnem::DXCH,
            "CAF" => AgcMnem::CAF,
            "TCAF" => AgcMnem::TCAF,
            "RAND" => AgcMnem::RAND,
            "READ" => AgcMnem::READ,
            "WRITE" => AgcMnem::WRITE,
            "NOOP" => AgcMnem::NOOP,
            "INOT" => AgcMnem::INOT,
            "INOTR" => AgcMnem::INOTR,
            _ => {
                return Err(AgcError::UnknownMnemonic(s.to_string()));
            }
        };
        Ok(mnem)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AgcInst {
    pub pc: u16,
    pub mnem: AgcMnem,
    pub operand: u16,
}

///
/// Decode a fetched instruction word. The extended flag selects between the
/// two field layouts:
///
///  - Basic: opcode in bits 14..12, address in bits 11..0. Opcode 0 carries
///    a subcode in bits 11..10 selecting within the TC class, with the TC
///    address narrowed to bits 9..0.
///  - Extended: opcode in bits 14..10, address in bits 9..0.
///
pub fn decode(pc: u16, word: u16, extended: bool) -> AgcInst {
    let word = word & S15_MASK;

    if extended {
        let opcode = (word >> OPCODE_OFFSET_EXTENDED) & 0o37;
        let operand = word & DATA_MASK_EXTENDED;
        let mnem = match opcode {
            EXT_MP => AgcMnem::MP,
            EXT_DV => AgcMnem::DV,
            EXT_SU => AgcMnem::SU,
            EXT_DCA => AgcMnem::DCA,
            EXT_DCS => AgcMnem::DCS,
            EXT_DAD => AgcMnem::DAD,
            EXT_DAS => AgcMnem::DAS,
            EXT_DSU => AgcMnem::DSU,
            EXT_LXCH => AgcMnem::LXCH,
            EXT_QXCH => AgcMnem::QXCH,
            EXT_INCR => AgcMnem::INCR,
            EXT_AUG => AgcMnem::AUG,
            EXT_DIM => AgcMnem::DIM,
            EXT_BZF => AgcMnem::BZF,
            EXT_BZM => AgcMnem::BZM,
            EXT_EDRUPT => AgcMnem::EDRUPT,
            EXT_RESUME => AgcMnem::RESUME,
            EXT_CYR => AgcMnem::CYR,
            EXT_SR => AgcMnem::SR,
            EXT_SL => AgcMnem::SL,
            EXT_PINC => AgcMnem::PINC,
            EXT_MINC => AgcMnem::MINC,
            EXT_DXCH => AgcMnem::DXCH,
            EXT_CAF => AgcMnem::CAF,
            EXT_TCAF => AgcMnem::TCAF,
            EXT_RAND => AgcMnem::RAND,
            EXT_MSK => AgcMnem::MSK,
            EXT_READ => AgcMnem::READ,
            EXT_WRITE => AgcMnem::WRITE,
            EXT_NOOP => AgcMnem::NOOP,
            _ => AgcMnem::INVALID,
        };
        return AgcInst { pc, mnem, operand };
    }

    let opcode = (word >> OPCODE_OFFSET) & 0o7;
    match opcode {
        BASIC_TCCLASS => {
            let subcode = (word >> SUBCODE_OFFSET) & SUBCODE_MASK;
            let (mnem, operand) = match subcode {
                SUB_TC => (AgcMnem::TC, word & DATA_MASK_TC),
                SUB_RELINT => (AgcMnem::RELINT, 0),
                SUB_INHINT => (AgcMnem::INHINT, 0),
                _ => (AgcMnem::EXTEND, 0),
            };
            AgcInst { pc, mnem, operand }
        }
        _ => {
            let mnem = match opcode {
                BASIC_CCS => AgcMnem::CCS,
                BASIC_INDEX => AgcMnem::INDEX,
                BASIC_XCH => AgcMnem::XCH,
                BASIC_CA => AgcMnem::CA,
                BASIC_CS => AgcMnem::CS,
                BASIC_TS => AgcMnem::TS,
                _ => AgcMnem::AD,
            };
            AgcInst {
                pc,
                mnem,
                operand: word & DATA_MASK,
            }
        }
    }
}

///
/// Build an instruction from the symbolic test interface: a mnemonic plus an
/// optional operand. Unknown mnemonics fail; a missing operand is taken as
/// zero.
///
pub fn from_symbolic(pc: u16, mnemonic: &str, operand: Option<u16>) -> Result<AgcInst, AgcError> {
    let mnem = AgcMnem::from_mnemonic(mnemonic)?;
    Ok(AgcInst {
        pc,
        mnem,
        operand: operand.unwrap_or(0) & S15_MASK,
    })
}

#[cfg(test)]
mod decode_tests {
    use super::*;

    #[test]
    fn decode_basic_opcodes_test() {
        let cases = [
            (0o10000u16, AgcMnem::CCS),
            (0o20000, AgcMnem::INDEX),
            (0o30000, AgcMnem::XCH),
            (0o40000, AgcMnem::CA),
            (0o50000, AgcMnem::CS),
            (0o60000, AgcMnem::TS),
            (0o70000, AgcMnem::AD),
        ];

        for (word, expect) in cases.iter() {
            let inst = decode(0, word | 0o123, false);
            assert_eq!(*expect, inst.mnem, "Decode failed for 0o{:o}", word);
            assert_eq!(0o123, inst.operand);
        }
    }

    #[test]
    ///
    /// Opcode 0 splits on bits 11..10: TC keeps a 10-bit address, the other
    /// subcodes take none.
    ///
    fn decode_tc_class_test() {
        let inst = decode(0, 0o0000 | 0o456, false);
        assert_eq!(AgcMnem::TC, inst.mnem);
        assert_eq!(0o456, inst.operand);

        assert_eq!(AgcMnem::RELINT, decode(0, 0o2000, false).mnem);
        assert_eq!(AgcMnem::INHINT, decode(0, 0o4000, false).mnem);
        assert_eq!(AgcMnem::EXTEND, decode(0, 0o6000, false).mnem);
    }

    #[test]
    fn decode_extended_opcodes_test() {
        let cases = [
            (EXT_MP, AgcMnem::MP),
            (EXT_DV, AgcMnem::DV),
            (EXT_DCA, AgcMnem::DCA),
            (EXT_BZF, AgcMnem::BZF),
            (EXT_RESUME, AgcMnem::RESUME),
            (EXT_DXCH, AgcMnem::DXCH),
            (EXT_WRITE, AgcMnem::WRITE),
            (EXT_NOOP, AgcMnem::NOOP),
        ];

        for (opcode, expect) in cases.iter() {
            let word = (opcode << OPCODE_OFFSET_EXTENDED) | 0o777;
            let inst = decode(0, word, true);
            assert_eq!(*expect, inst.mnem, "Decode failed for opcode 0o{:o}", opcode);
            assert_eq!(0o777, inst.operand);
        }

        // Unassigned extended opcodes decode as INVALID
        let word = 0o37 << OPCODE_OFFSET_EXTENDED;
        assert_eq!(AgcMnem::INVALID, decode(0, word, true).mnem);
    }

    #[test]
    ///
    /// The same word decodes differently under the extended latch.
    ///
    fn decode_mode_dependence_test() {
        // Basic: opcode 3 (XCH). Extended: bits 14..10 are 0o14 (DIM).
        let word = 0o30123;
        assert_eq!(AgcMnem::XCH, decode(0, word, false).mnem);
        assert_eq!(AgcMnem::DIM, decode(0, word, true).mnem);
    }

    #[test]
    fn from_symbolic_test() {
        let inst = from_symbolic(0o100, "AD", Some(0o17)).unwrap();
        assert_eq!(AgcMnem::AD, inst.mnem);
        assert_eq!(0o17, inst.operand);
        assert_eq!(0o100, inst.pc);

        let inst = from_symbolic(0, "MASK", Some(0o7070)).unwrap();
        assert_eq!(AgcMnem::MSK, inst.mnem);

        let inst = from_symbolic(0, "NOOP", None).unwrap();
        assert_eq!(0, inst.operand);

        match from_symbolic(0, "FROB", None) {
            Err(crate::AgcError::UnknownMnemonic(s)) => assert_eq!("FROB", s),
            other => panic!("Expected UnknownMnemonic, got {:?}", other),
        }
    }
}
