// termcheck-core/src/script.rs
//
// The exerciser's program as data: an ordered table of writes and pauses.

use crate::ansi::{ControlSequence, EraseMode};

/// Line terminator the test terminal expects after every text line.
pub const CRLF: &[u8] = b"\r\n";

/// Screen filler written before the cursor and erase checks. An empty entry
/// is the blank line between stanzas.
pub const POEM: [&str; 12] = [
    "Once upon a midnight dreary, while I pondered, weak and weary,",
    "Over many a quaint and curious volume of forgotten lore,",
    "While I nodded, nearly napping, suddenly there came a tapping,",
    "As of some one gently rapping, rapping at my chamber door.",
    "'Tis some visitor,' I muttered, 'tapping at my chamber door Only this, and nothing more.'",
    "",
    "Ah, distinctly I remember it was in the bleak December,",
    "And each separate dying ember wrought its ghost upon the floor.",
    "Eagerly I wished the morrow;- vainly I had sought to borrow",
    "From my books surcease of sorrow- sorrow for the lost Lenore-",
    "For the rare and radiant maiden whom the angels name Lenore-",
    "Nameless here for evermore.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Text,
    Control,
}

/// One payload handed to the channel in a single write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteUnit {
    pub kind: UnitKind,
    pub payload: Vec<u8>,
}

impl WriteUnit {
    pub fn text(text: &str) -> Self {
        Self {
            kind: UnitKind::Text,
            payload: text.as_bytes().to_vec(),
        }
    }

    /// Text followed by CR LF.
    pub fn line(text: &str) -> Self {
        let mut payload = Vec::with_capacity(text.len() + CRLF.len());
        payload.extend_from_slice(text.as_bytes());
        payload.extend_from_slice(CRLF);
        Self {
            kind: UnitKind::Text,
            payload,
        }
    }

    pub fn control(seq: ControlSequence) -> Self {
        Self {
            kind: UnitKind::Control,
            payload: seq.encode(),
        }
    }

    /// Bytes outside the typed catalog.
    pub fn raw(bytes: &[u8]) -> Self {
        Self {
            kind: UnitKind::Control,
            payload: bytes.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Write(WriteUnit),
    /// Pause, in time units of the running exerciser.
    Pause(u32),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_write(&mut self, unit: WriteUnit) {
        self.steps.push(Step::Write(unit));
    }

    pub fn push_pause(&mut self, units: u32) {
        self.steps.push(Step::Pause(units));
    }

    pub fn write(mut self, unit: WriteUnit) -> Self {
        self.push_write(unit);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.write(WriteUnit::text(text))
    }

    pub fn line(self, text: &str) -> Self {
        self.write(WriteUnit::line(text))
    }

    pub fn control(self, seq: ControlSequence) -> Self {
        self.write(WriteUnit::control(seq))
    }

    pub fn pause(mut self, units: u32) -> Self {
        self.push_pause(units);
        self
    }

    /// The cursor positioning and erase check.
    ///
    /// Clears the screen, fills it with text, moves the cursor around and
    /// erases line and screen regions with pauses in between so each effect
    /// can be observed, then clears the screen again.
    pub fn ansi_demo() -> Self {
        use ControlSequence as Cs;

        let mut script = Script::new().control(Cs::CLEAR_SCREEN).control(Cs::HOME);

        for line in POEM {
            script = script.line(line);
        }

        script
            .control(Cs::goto(0, 14))
            .line("this is line 14")
            .control(Cs::goto(20, 15))
            .line("col 20")
            .pause(2)
            // clear line to right
            .control(Cs::goto(20, 5))
            .control(Cs::EraseLine(EraseMode::ToEnd))
            // clear line to left
            .control(Cs::goto(20, 3))
            .control(Cs::EraseLine(EraseMode::ToStart))
            .pause(2)
            .control(Cs::goto(5, 8))
            .control(Cs::EraseDisplay(EraseMode::ToEnd))
            .pause(2)
            .control(Cs::goto(6, 7))
            .control(Cs::EraseDisplay(EraseMode::ToStart))
            .control(Cs::CLEAR_SCREEN)
            .control(Cs::HOME)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn write_units(&self) -> impl Iterator<Item = &WriteUnit> {
        self.steps.iter().filter_map(|step| match step {
            Step::Write(unit) => Some(unit),
            Step::Pause(_) => None,
        })
    }

    /// Every byte the script writes, in order.
    pub fn payload(&self) -> Vec<u8> {
        self.write_units()
            .flat_map(|unit| unit.payload.iter().copied())
            .collect()
    }

    pub fn total_pause_units(&self) -> u64 {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Pause(units) => u64::from(*units),
                Step::Write(_) => 0,
            })
            .sum()
    }
}
