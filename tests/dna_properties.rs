use phyta_core::mutation::{
    apply_sequence_edit, green_for_longevity, mutation_triggered, DnaLogic, SequenceEdit, BROOD_CHOICES,
};
use phyta_core::placement::can_displace;
use phyta_data::{Cycle, Decision, Dna};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn arb_decision() -> impl Strategy<Value = Decision> {
    prop_oneof![Just(Decision::Homeostasis), Just(Decision::Invest)]
}

prop_compose! {
    fn arb_dna()(
        longevity in 1u32..40,
        decisions in prop::collection::vec(arb_decision(), 1..6),
        reproductive in prop::collection::vec(0u32..4, 1..6)
    ) -> Dna {
        Dna::new(longevity, decisions, reproductive).unwrap()
    }
}

fn arb_edit() -> impl Strategy<Value = SequenceEdit> {
    prop_oneof![
        Just(SequenceEdit::Pop),
        Just(SequenceEdit::Push),
        Just(SequenceEdit::Overwrite)
    ]
}

proptest! {
    #[test]
    fn mutated_child_stays_in_bounds(parent in arb_dna(), seed in any::<u64>(), denominator in 1u64..4) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let child = parent.mutated(denominator, &mut rng);

        let l = parent.longevity();
        prop_assert!(child.longevity() >= 1);
        prop_assert!(child.longevity() + 1 >= l && child.longevity() <= l + 1);

        let decisions = (child.decisions().len() as i64 - parent.decisions().len() as i64).abs();
        prop_assert!(decisions <= 1);
        let brood = (child.reproductive_decisions().len() as i64
            - parent.reproductive_decisions().len() as i64)
            .abs();
        prop_assert!(brood <= 1);

        for value in child.reproductive_decisions() {
            prop_assert!(
                BROOD_CHOICES.contains(value) || parent.reproductive_decisions().as_slice().contains(value)
            );
        }
    }

    #[test]
    fn color_tracks_longevity_after_mutation(parent in arb_dna(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let child = parent.mutated(1, &mut rng);
        // Denominator 1 triggers every field, so the colour is always re-derived.
        prop_assert_eq!(child.color().g, green_for_longevity(child.longevity()));
        prop_assert_eq!(child.color().r, parent.color().r);
        prop_assert_eq!(child.color().b, parent.color().b);
    }

    #[test]
    fn sequence_edits_never_empty(
        items in prop::collection::vec(arb_decision(), 1..5),
        edits in prop::collection::vec(arb_edit(), 0..20),
        seed in any::<u64>()
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut seq = Cycle::new(items).unwrap();
        for edit in edits {
            let before = seq.len();
            apply_sequence_edit(&mut seq, edit, &Decision::ALL, &mut rng);
            prop_assert!(!seq.as_slice().is_empty());
            prop_assert!(seq.len() + 1 >= before && seq.len() <= before + 1);
        }
    }

    #[test]
    fn cycle_indexes_modulo_length(items in prop::collection::vec(0u32..10, 1..8), turn in any::<u64>()) {
        let cycle = Cycle::new(items.clone()).unwrap();
        prop_assert_eq!(*cycle.at(turn), items[(turn % items.len() as u64) as usize]);
    }

    #[test]
    fn displacement_needs_a_third(occupant in 1u32..1000, longevity in 1u32..1000) {
        prop_assert_eq!(can_displace(occupant, longevity), 3 * occupant < longevity);
    }

    #[test]
    fn denominator_one_always_fires(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        prop_assert!(mutation_triggered(1, &mut rng));
    }
}
