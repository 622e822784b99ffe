#![forbid(unsafe_code)]
use oncall_rota::{
    detect_conflicts, generate_schedule, MemberId, RotationOptions, Slot, SlotPlan, Team,
    TeamMember, Variant,
};
use proptest::prelude::*;

/// Matrice d'indisponibilités : une ligne par membre, une colonne par créneau.
fn availability() -> impl Strategy<Value = Vec<Vec<bool>>> {
    (1usize..6, 1usize..12).prop_flat_map(|(people, slots)| {
        prop::collection::vec(prop::collection::vec(any::<bool>(), slots), people)
    })
}

fn slot_id(idx: usize) -> String {
    format!("s{idx:02}")
}

fn build(matrix: &[Vec<bool>]) -> (Team, Vec<String>) {
    let slots: Vec<String> = (0..matrix[0].len()).map(slot_id).collect();
    let team = matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let off: Vec<String> = row
                .iter()
                .enumerate()
                .filter(|(_, blocked)| **blocked)
                .map(|(j, _)| slot_id(j))
                .collect();
            // homonymes volontaires : seule l'identité compte
            TeamMember::new(format!("m{}", i % 2), off).unwrap()
        })
        .collect();
    (team, slots)
}

proptest! {
    #[test]
    fn keyed_schedule_is_sound(matrix in availability()) {
        let (team, ids) = build(&matrix);
        let plan = SlotPlan::keyed(ids.iter().map(|id| Slot::rotated(id).unwrap()));
        let opts = RotationOptions::for_variant(Variant::Keyed);
        let schedule = generate_schedule(&team, &plan, opts).unwrap();

        // chaque créneau est soit pourvu, soit signalé, jamais les deux
        prop_assert_eq!(schedule.len() + schedule.gaps().len(), ids.len());
        for gap in schedule.gaps() {
            prop_assert!(schedule.get(gap).is_none());
        }

        for (slot, assignment) in schedule.iter() {
            prop_assert!(plan.get(slot).is_some());
            let id = assignment.member_id().unwrap();
            let member = team.find_by_id(id).unwrap();
            prop_assert!(member.is_available_for(slot));
        }

        let assigned: Vec<MemberId> = plan
            .slots()
            .iter()
            .filter_map(|s| schedule.get(&s.id).and_then(|a| a.member_id()))
            .collect();
        for pair in assigned.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }

        prop_assert!(detect_conflicts(&team, &plan, &schedule, opts).is_empty());
    }

    #[test]
    fn ordered_schedule_honours_unavailability(matrix in availability()) {
        let (team, ids) = build(&matrix);
        let plan = SlotPlan::ordered(ids.iter().rev().map(|id| Slot::rotated(id).unwrap()));
        let opts = RotationOptions::for_variant(Variant::Ordered);
        let schedule = generate_schedule(&team, &plan, opts).unwrap();

        prop_assert_eq!(schedule.len() + schedule.gaps().len(), ids.len());
        prop_assert!(detect_conflicts(&team, &plan, &schedule, opts).is_empty());

        // sans la règle du dernier assigné, un créneau n'est vide que si tout le monde est indisponible
        for gap in schedule.gaps() {
            prop_assert!(team.members().iter().all(|m| !m.is_available_for(gap)));
        }
    }

    #[test]
    fn generation_is_deterministic(matrix in availability()) {
        let (team, ids) = build(&matrix);
        let plan = SlotPlan::keyed(ids.iter().map(|id| Slot::rotated(id).unwrap()));
        let first = generate_schedule(&team, &plan, RotationOptions::default()).unwrap();
        let second = generate_schedule(&team, &plan, RotationOptions::default()).unwrap();
        prop_assert_eq!(first, second);
    }
}
