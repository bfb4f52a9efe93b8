//! DNA mutation operator.
//!
//! Each mutable field rolls independently. A roll draws two integers from
//! `[0, denominator)` and fires when they are equal, which lands close to, but
//! not exactly on, `1 / denominator`.

use phyta_data::{Cycle, Decision, Dna};
use rand::seq::SliceRandom;
use rand::Rng;
use std::num::NonZeroU32;

/// Brood sizes a reproductive gene can take.
pub const BROOD_CHOICES: [u32; 3] = [0, 1, 2];

/// Largest brood a configured template may ask for: one child per neighbour.
pub const MAX_BROOD: u32 = 8;

/// Green channel units per point of longevity.
pub const GREEN_PER_LONGEVITY: u32 = 16;

/// The closed set of DNA fields the operator touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutableField {
    Longevity,
    Decisions,
    ReproductiveDecisions,
}

impl MutableField {
    pub const ALL: [MutableField; 3] = [
        MutableField::Longevity,
        MutableField::Decisions,
        MutableField::ReproductiveDecisions,
    ];

    /// Mutates this field of `dna` unconditionally.
    pub fn apply<R: Rng + ?Sized>(self, dna: &mut Dna, rng: &mut R) {
        match self {
            Self::Longevity => {
                mutate_longevity(dna, rng);
            }
            Self::Decisions => {
                let edit = SequenceEdit::random(rng);
                apply_sequence_edit(dna.decisions_mut(), edit, &Decision::ALL, rng);
            }
            Self::ReproductiveDecisions => {
                let edit = SequenceEdit::random(rng);
                apply_sequence_edit(dna.reproductive_decisions_mut(), edit, &BROOD_CHOICES, rng);
            }
        }
    }
}

/// One step of the array-mutate operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceEdit {
    /// Drop the last element; ignored on a single-element sequence.
    Pop,
    /// Append a random choice.
    Push,
    /// Replace a random index with a random choice.
    Overwrite,
}

impl SequenceEdit {
    pub const ALL: [SequenceEdit; 3] = [SequenceEdit::Pop, SequenceEdit::Push, SequenceEdit::Overwrite];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Applies `edit` to `seq`, drawing replacement values from `choices`.
///
/// Returns whether the sequence changed shape or content slot. An empty
/// `choices` makes `Push` and `Overwrite` no-ops.
pub fn apply_sequence_edit<T: Copy, R: Rng + ?Sized>(
    seq: &mut Cycle<T>,
    edit: SequenceEdit,
    choices: &[T],
    rng: &mut R,
) -> bool {
    match edit {
        SequenceEdit::Pop => seq.pop().is_some(),
        SequenceEdit::Push => match pick(choices, rng) {
            Some(value) => {
                seq.push(value);
                true
            }
            None => false,
        },
        SequenceEdit::Overwrite => {
            let idx = rng.gen_range(0..seq.len());
            match pick(choices, rng) {
                Some(value) => seq.set(idx, value),
                None => false,
            }
        }
    }
}

fn pick<T: Copy, R: Rng + ?Sized>(choices: &[T], rng: &mut R) -> Option<T> {
    choices.choose(rng).copied()
}

/// Moves longevity one step up or down. A step below 1 is discarded.
///
/// Returns whether longevity changed.
pub fn mutate_longevity<R: Rng + ?Sized>(dna: &mut Dna, rng: &mut R) -> bool {
    let original = i64::from(dna.longevity());
    let candidate = if rng.gen_bool(0.5) { original + 1 } else { original - 1 };
    if candidate < 1 || candidate > original + 1 {
        return false;
    }
    match u32::try_from(candidate).ok().and_then(NonZeroU32::new) {
        Some(longevity) => {
            dna.set_longevity(longevity);
            true
        }
        None => false,
    }
}

/// Equal-draws trigger with probability close to `1 / denominator`.
///
/// A zero denominator never fires.
pub fn mutation_triggered<R: Rng + ?Sized>(denominator: u64, rng: &mut R) -> bool {
    if denominator == 0 {
        return false;
    }
    rng.gen_range(0..denominator) == rng.gen_range(0..denominator)
}

/// Green channel derived from longevity, saturating at 255.
#[must_use]
pub fn green_for_longevity(longevity: u32) -> u8 {
    let g = u64::from(longevity) * u64::from(GREEN_PER_LONGEVITY);
    u8::try_from(g).unwrap_or(u8::MAX)
}

/// Mutation behaviour on [`Dna`].
pub trait DnaLogic {
    /// A mutated copy; `self` is left untouched.
    fn mutated<R: Rng + ?Sized>(&self, denominator: u64, rng: &mut R) -> Dna;

    /// Re-derives the cosmetic green channel from longevity.
    fn recolor(&mut self);
}

impl DnaLogic for Dna {
    fn mutated<R: Rng + ?Sized>(&self, denominator: u64, rng: &mut R) -> Dna {
        let mut child = self.clone();
        for field in MutableField::ALL {
            if mutation_triggered(denominator, rng) {
                field.apply(&mut child, rng);
                child.recolor();
            }
        }
        child
    }

    fn recolor(&mut self) {
        let color = self.color().with_green(green_for_longevity(self.longevity()));
        self.set_color(color);
    }
}
