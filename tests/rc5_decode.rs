#![allow(missing_docs)]
//! End-to-end RC5 decoding: synthetic receiver waveforms through `Rc5Receiver`.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};
use ir_matrix::config::RC5_TIMING;
use ir_matrix::rc5::{Rc5Isr, Rc5Mailbox, Rc5Receiver, Rc5Word};
use test_case::test_case;

/// Ticks per half bit at 31 250 Hz (889 µs).
const HALF_BIT: usize = 28;
const LEAD_IN: usize = 100;
const TRAIL: usize = 200;

/// Plays back a recorded level per read, then idles high.
struct ScriptedPin {
    levels: std::vec::IntoIter<bool>,
}

impl ScriptedPin {
    fn new(levels: Vec<bool>) -> Self {
        Self {
            levels: levels.into_iter(),
        }
    }

    fn remaining(&self) -> usize {
        self.levels.len()
    }
}

impl ErrorType for ScriptedPin {
    type Error = Infallible;
}

impl InputPin for ScriptedPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.levels.next().unwrap_or(true))
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

/// Receiver output for `word`'s top `bit_count` bits: a `1` reads high then low.
fn waveform(word: u16, bit_count: usize, half_bit: usize) -> Vec<bool> {
    let bits = (0..bit_count)
        .rev()
        .map(|index| (word >> (14 - bit_count + index)) & 1 != 0);
    frame(bits, half_bit)
}

/// Receiver output for an arbitrary bit sequence, framed by idle time.
fn frame(bits: impl IntoIterator<Item = bool>, half_bit: usize) -> Vec<bool> {
    let mut levels = vec![true; LEAD_IN];
    for bit in bits {
        levels.extend(std::iter::repeat_n(bit, half_bit));
        levels.extend(std::iter::repeat_n(!bit, half_bit));
    }
    levels.extend(std::iter::repeat_n(true, TRAIL));
    levels
}

/// Invert `width` ticks starting at `start`.
fn inject_glitch(levels: &mut [bool], start: usize, width: usize) {
    for level in &mut levels[start..start + width] {
        *level = !*level;
    }
}

/// Tick index of the mid-bit transition of bit `index` (0 = first start bit).
fn mid_edge(index: usize) -> usize {
    LEAD_IN + 2 * HALF_BIT * index + HALF_BIT
}

/// Run every scripted level through a receiver and collect what reached the mailbox.
fn decode(levels: Vec<bool>) -> Vec<Rc5Word> {
    let ticks = levels.len();
    let mailbox = Rc5Mailbox::new();
    let mut receiver = Rc5Receiver::new(ScriptedPin::new(levels), RC5_TIMING, &mailbox);
    let mut words = Vec::new();
    for _ in 0..ticks {
        receiver.tick();
        if let Some(word) = mailbox.take_word() {
            words.push(word);
        }
    }
    assert_eq!(receiver.into_pin().remaining(), 0);
    words
}

fn word(raw: u16) -> Rc5Word {
    Rc5Word::try_from(raw).expect("valid word")
}

#[test]
fn clean_word_yields_its_command() {
    let mailbox = Rc5Mailbox::new();
    let mut receiver = Rc5Receiver::new(
        ScriptedPin::new(waveform(0b11_0_00001_000011, 14, HALF_BIT)),
        RC5_TIMING,
        &mailbox,
    );
    let frame_len = LEAD_IN + 28 * HALF_BIT + TRAIL;
    for _ in 0..frame_len {
        receiver.tick();
    }
    assert_eq!(mailbox.take(), Some(3));
    assert_eq!(mailbox.take(), None);
}

#[test]
fn word_fields_survive_decoding() {
    assert_eq!(decode(waveform(0x3843, 14, HALF_BIT)), [word(0x3843)]);
    assert_eq!(decode(waveform(0x3FFF, 14, HALF_BIT)), [word(0x3FFF)]);
    assert_eq!(word(0x3FFF).reduced(), 63);
}

#[test]
fn back_to_back_words_each_arrive() {
    let mut levels = waveform(0x3043, 14, HALF_BIT);
    levels.extend(waveform(0x3802, 14, HALF_BIT));
    assert_eq!(decode(levels), [word(0x3043), word(0x3802)]);
}

#[test_case(23 ; "fast remote")]
#[test_case(24 ; "slightly fast")]
#[test_case(28 ; "nominal")]
#[test_case(31 ; "slightly slow")]
#[test_case(33 ; "slow remote")]
fn tolerates_bit_rate_drift(half_bit: usize) {
    assert_eq!(decode(waveform(0x3043, 14, half_bit)), [word(0x3043)]);
}

#[test_case(22 ; "too fast")]
#[test_case(34 ; "too slow")]
fn rejects_bit_rate_far_off(half_bit: usize) {
    assert!(decode(waveform(0x3043, 14, half_bit)).is_empty());
}

#[test_case(1 ; "start bit")]
#[test_case(2 ; "toggle bit")]
#[test_case(7 ; "address")]
#[test_case(13 ; "last command bit")]
fn glitch_after_mid_bit_edge_discards_the_word(bit: usize) {
    let mut levels = waveform(0x3043, 14, HALF_BIT);
    inject_glitch(&mut levels, mid_edge(bit) + 5, 2);
    assert!(decode(levels).is_empty());
}

#[test_case(1 ; "start bit")]
#[test_case(6 ; "address")]
#[test_case(12 ; "command")]
fn glitch_near_bit_boundary_discards_the_word(bit: usize) {
    // Lands more than `min_ticks` after the mid-bit edge, close to the next boundary.
    let mut levels = waveform(0x3043, 14, HALF_BIT);
    inject_glitch(&mut levels, mid_edge(bit) + HALF_BIT - 2, 1);
    assert!(decode(levels).is_empty());
}

#[test_case(0x3043 ; "command 3")]
#[test_case(0x3FFF ; "all ones")]
#[test_case(0x2AAA ; "alternating")]
fn glitch_anywhere_in_the_frame_discards_the_word(raw: u16) {
    let clean = waveform(raw, 14, HALF_BIT);
    let frame_end = LEAD_IN + 28 * HALF_BIT;
    for width in [1, 2, 5, 10, 21] {
        for start in mid_edge(0) + 1..frame_end {
            // Only pulses strictly inside a steady stretch add two new edges.
            let Some(around) = clean.get(start - 1..=start + width) else {
                continue;
            };
            if around.iter().any(|&level| level != around[0]) {
                continue;
            }
            let mut levels = clean.clone();
            inject_glitch(&mut levels, start, width);
            assert!(
                decode(levels).is_empty(),
                "{width}-tick glitch at tick {start} let 0x{raw:04X} through"
            );
        }
    }
}

#[test]
fn glitch_long_before_the_frame_is_forgotten() {
    let mut levels = waveform(0x3043, 14, HALF_BIT);
    inject_glitch(&mut levels, LEAD_IN - 80, 2);
    assert_eq!(decode(levels), [word(0x3043)]);
}

#[test]
fn next_clean_word_after_a_glitch_decodes() {
    let mut levels = waveform(0x3043, 14, HALF_BIT);
    inject_glitch(&mut levels, mid_edge(2) + 5, 2);
    levels.extend(waveform(0x3043, 14, HALF_BIT));
    assert_eq!(decode(levels), [word(0x3043)]);
}

#[test]
fn fifteen_bit_frame_publishes_nothing() {
    // An extra leading `1` pushes the first start bit out to bit 14.
    let mut bits = vec![true];
    bits.extend((0..14).rev().map(|index| (0x3043_u16 >> index) & 1 != 0));
    assert!(decode(frame(bits, HALF_BIT)).is_empty());
}

#[test]
fn truncated_word_publishes_nothing() {
    assert!(decode(waveform(0x3043, 13, HALF_BIT)).is_empty());
}

#[test]
fn isr_slot_drives_an_installed_receiver() {
    static MAILBOX: Rc5Mailbox = Rc5Mailbox::new();
    static ISR: Rc5Isr<ScriptedPin> = Rc5Isr::new();

    let levels = waveform(0x3043, 14, HALF_BIT);
    let ticks = levels.len();
    ISR.install(Rc5Receiver::new(ScriptedPin::new(levels), RC5_TIMING, &MAILBOX))
        .expect("first install");
    for _ in 0..ticks {
        ISR.on_tick();
    }
    assert_eq!(MAILBOX.take(), Some(3));
}
