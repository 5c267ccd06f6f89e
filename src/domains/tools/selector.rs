//! Sound selection.

use rand::Rng;
use rand::rngs::StdRng;

use super::definition::{SoundOrder, ToolDefinition};

/// Source of randomness for random sound order.
///
/// Sessions take this as a parameter so tests can pin the picks.
pub trait RandomSource {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl RandomSource for StdRng {
    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Pick the next sound of `definition`.
///
/// Returns the sound (if any) and the cursor to use for the next call. The
/// cursor only moves for selective order.
pub fn select<'a>(
    definition: &'a ToolDefinition,
    cursor: usize,
    rng: &mut dyn RandomSource,
) -> (Option<&'a str>, usize) {
    let sounds = &definition.sounds;
    if sounds.is_empty() {
        return (None, cursor);
    }

    match definition.sound_order {
        SoundOrder::Random => {
            let index = if sounds.len() == 1 { 0 } else { rng.pick(sounds.len()) };
            (sounds.get(index).map(String::as_str), cursor)
        }
        SoundOrder::Selective => {
            let index = cursor % sounds.len();
            (Some(sounds[index].as_str()), (index + 1) % sounds.len())
        }
    }
}
