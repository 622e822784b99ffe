use super::{Conflict, ConflictKind, RotationOptions};
use crate::model::{MemberId, Schedule, SlotPlan, Team};

/// Vérifie un planning contre l'équipe et le plan de créneaux.
///
/// Les créneaux vides ne remettent pas à zéro le « dernier assigné » : deux
/// entrées tournées successives restent consécutives même séparées par un trou
/// ou un créneau fixe.
pub fn detect_conflicts(
    team: &Team,
    plan: &SlotPlan,
    schedule: &Schedule,
    opts: RotationOptions,
) -> Vec<Conflict> {
    let mut out = Vec::new();

    for (slot, assignment) in schedule.iter() {
        if plan.get(slot).is_none() {
            out.push(Conflict {
                slot: slot.to_string(),
                member: assignment.member_id(),
                kind: ConflictKind::UnknownSlot,
            });
        }
    }

    let mut previous: Option<MemberId> = None;
    for slot in plan.slots().iter().filter(|s| s.needs_rotation()) {
        let Some(id) = schedule.get(&slot.id).and_then(|a| a.member_id()) else {
            continue;
        };

        if let Some(member) = team.find_by_id(id) {
            if !member.is_available_for(&slot.id) {
                out.push(Conflict {
                    slot: slot.id.clone(),
                    member: Some(id),
                    kind: ConflictKind::Unavailable,
                });
            }
        }

        if opts.avoid_back_to_back && previous == Some(id) {
            out.push(Conflict {
                slot: slot.id.clone(),
                member: Some(id),
                kind: ConflictKind::BackToBack,
            });
        }
        previous = Some(id);
    }

    out
}
