use crate::rupt::AgcRupt;
use crate::AgcError;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, error, warn};

use std::collections::VecDeque;
use std::str::FromStr;

/* Verb and noun latches are 7 bits wide */
const VERB_NOUN_MASK: u16 = 0o177;

/* Number of display rows. Only R1 and R2 are driven by verb/noun output */
const NUM_ROWS: usize = 6;

const BLANK_ROW: &str = "00000";

pub const NUM_LAMPS: usize = 8;

///
/// The DSKY indicator lamps. The numeric value is the index into the lamp
/// bank.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgcLamp {
    UplinkActy = 0,
    NoAtt = 1,
    Stby = 2,
    KeyRel = 3,
    OprErr = 4,
    Temp = 5,
    GimbalLock = 6,
    Prog = 7,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgcDskyMode {
    Dec,
    Oct,
}

impl FromStr for AgcDskyMode {
    type Err = AgcError;

    fn from_str(s: &str) -> Result<AgcDskyMode, AgcError> {
        match s {
            "DEC" => Ok(AgcDskyMode::Dec),
            "OCT" => Ok(AgcDskyMode::Oct),
            _ => Err(AgcError::UnknownDskyMode(s.to_string())),
        }
    }
}

///
/// Display/Keyboard state. Key input latches the verb/noun pair and queues
/// it for display; `output` drains the queue into the six-row display bank.
/// A host thread can inject keypresses through the sender handed out by
/// `keypress_sender`, which the machine drains at each step.
///
pub struct AgcDsky {
    verb: u16,
    noun: u16,
    buffer: VecDeque<(u16, u16)>,
    display: [String; NUM_ROWS],
    lamps: [bool; NUM_LAMPS],
    mode: AgcDskyMode,

    rupt_tx: Sender<AgcRupt>,
    keypress_tx: Sender<(u16, u16)>,
    keypress_rx: Receiver<(u16, u16)>,
}

fn blank_display() -> [String; NUM_ROWS] {
    [
        String::from(BLANK_ROW),
        String::from(BLANK_ROW),
        String::from(BLANK_ROW),
        String::from(BLANK_ROW),
        String::from(BLANK_ROW),
        String::from(BLANK_ROW),
    ]
}

impl AgcDsky {
    pub fn new(rupt_tx: Sender<AgcRupt>) -> AgcDsky {
        let (keypress_tx, keypress_rx) = unbounded();

        AgcDsky {
            verb: 0,
            noun: 0,
            buffer: VecDeque::new(),
            display: blank_display(),
            lamps: [false; NUM_LAMPS],
            mode: AgcDskyMode::Dec,
            rupt_tx,
            keypress_tx,
            keypress_rx,
        }
    }

    ///
    /// # Description
    ///
    /// Operator key input of a verb/noun pair. A value that does not fit the
    /// 7-bit latch lights OPR ERR and is discarded; a good pair is latched,
    /// queued for display, and lights KEY REL. Either way the keyboard pends
    /// a KEYRUPT for the software to notice.
    ///
    pub fn input(&mut self, verb: u16, noun: u16) {
        if verb > VERB_NOUN_MASK || noun > VERB_NOUN_MASK {
            warn!("DSKY: key input out of range: {:o}/{:o}", verb, noun);
            self.set_lamp(AgcLamp::OprErr, true);
            self.raise_keyrupt();
            return;
        }

        self.verb = verb & VERB_NOUN_MASK;
        self.noun = noun & VERB_NOUN_MASK;
        self.buffer.push_back((self.verb, self.noun));
        debug!(
            "DSKY: key input {:o}/{:o}, {} queued",
            self.verb,
            self.noun,
            self.buffer.len()
        );
        self.set_lamp(AgcLamp::KeyRel, true);
        self.raise_keyrupt();
    }

    ///
    /// # Description
    ///
    /// Pop the oldest queued verb/noun pair into the display bank. Rows R1
    /// and R2 carry the pair, the remaining rows are zero-filled, and the
    /// PROG lamp comes on. Returns the whole display bank, or `None` when
    /// nothing is queued.
    ///
    pub fn output(&mut self) -> Option<[String; NUM_ROWS]> {
        let (verb, noun) = self.buffer.pop_front()?;

        self.display[0] = self.format_row(verb);
        self.display[1] = self.format_row(noun);
        for row in self.display[2..].iter_mut() {
            *row = String::from(BLANK_ROW);
        }
        self.set_lamp(AgcLamp::Prog, true);

        Some(self.display.clone())
    }

    // Five characters, zero padded, in the current numeric mode.
    fn format_row(&self, value: u16) -> String {
        match self.mode {
            AgcDskyMode::Dec => format!("{:05}", value),
            AgcDskyMode::Oct => format!("{:05o}", value),
        }
    }

    pub fn set_mode(&mut self, mode: AgcDskyMode) {
        self.mode = mode;
    }

    ///
    /// Textual mode selection. Anything but "DEC" or "OCT" is an operator
    /// error and lights OPR ERR.
    ///
    pub fn set_mode_str(&mut self, mode: &str) {
        match mode.parse() {
            Ok(m) => self.mode = m,
            Err(e) => {
                warn!("DSKY: {}", e);
                self.set_lamp(AgcLamp::OprErr, true);
            }
        }
    }

    pub fn mode(&self) -> AgcDskyMode {
        self.mode
    }

    pub fn verb(&self) -> u16 {
        self.verb
    }

    pub fn noun(&self) -> u16 {
        self.noun
    }

    pub fn set_verb(&mut self, value: u16) {
        self.verb = value & VERB_NOUN_MASK;
    }

    pub fn set_noun(&mut self, value: u16) {
        self.noun = value & VERB_NOUN_MASK;
    }

    pub fn lamp(&self, lamp: AgcLamp) -> bool {
        self.lamps[lamp as usize]
    }

    pub fn set_lamp(&mut self, lamp: AgcLamp, lit: bool) {
        self.lamps[lamp as usize] = lit;
    }

    pub fn display(&self) -> &[String; NUM_ROWS] {
        &self.display
    }

    ///
    /// Handle for a host thread to inject keypresses without touching the
    /// machine. The machine drains the channel into `input` once per step.
    ///
    pub fn keypress_sender(&self) -> Sender<(u16, u16)> {
        self.keypress_tx.clone()
    }

    pub fn poll_keypresses(&mut self) {
        while let Ok((verb, noun)) = self.keypress_rx.try_recv() {
            self.input(verb, noun);
        }
    }

    fn raise_keyrupt(&self) {
        if self.rupt_tx.send(AgcRupt::KeyRupt).is_err() {
            error!("Unable to pend KEYRUPT; rupt channel closed");
        }
    }
}
