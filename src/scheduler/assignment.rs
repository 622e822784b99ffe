use super::Scheduler;
use crate::model::{Assignment, Slot, TeamMember};
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Unavailable,
    AssignedPreviousSlot,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rejection::Unavailable => "not available",
            Rejection::AssignedPreviousSlot => "already did the previous slot",
        })
    }
}

pub(super) fn assign_slot(scheduler: &mut Scheduler<'_>, slot: &Slot) -> Option<Assignment> {
    debug!(slot = %slot.id, "processing time slot");

    if let Some(text) = &slot.fixed {
        debug!(slot = %slot.id, fixed = %text, "needs no rotation");
        return Some(Assignment::Fixed { text: text.clone() });
    }

    if let Some(assignment) = take_from_skipped(scheduler, &slot.id) {
        return Some(assignment);
    }

    if let Some(assignment) = rotate(scheduler, &slot.id) {
        return Some(assignment);
    }

    warn!(slot = %slot.id, "no team member available");
    None
}

/// Premier reporté éligible, du plus ancien au plus récent. Les autres
/// restent à leur place dans la file.
fn take_from_skipped(scheduler: &mut Scheduler<'_>, slot: &str) -> Option<Assignment> {
    if scheduler.skipped.is_empty() {
        return None;
    }
    debug!(slot, waiting = scheduler.skipped.len(), "checking skipped people");

    let mut found = None;
    for (pos, member) in scheduler.skipped.iter().enumerate() {
        match scheduler.rejection(member, slot) {
            Some(reason) => debug!(pos, member = %member, %reason, "skipped person rejected"),
            None => {
                found = Some(pos);
                break;
            }
        }
    }

    let Some(pos) = found else {
        debug!(slot, "skipped people exhausted, continuing with the roster");
        return None;
    };
    let member = scheduler.skipped.remove(pos);
    debug!(pos, member = %member, "skipped person assigned");
    scheduler.last_assigned = Some(member.id());
    Some(Assignment::member(member))
}

/// Tour complet de l'équipe depuis le curseur. Chaque refusé est ajouté à la
/// file, même s'il y attend déjà.
fn rotate(scheduler: &mut Scheduler<'_>, slot: &str) -> Option<Assignment> {
    let team = scheduler.team;
    let total = team.len();
    debug!(slot, start = scheduler.cursor, "checking team");

    for offset in 0..total {
        let idx = (scheduler.cursor + offset) % total;
        let member = &team.members()[idx];
        if let Some(reason) = scheduler.rejection(member, slot) {
            debug!(idx, member = %member, %reason, "postponing");
            scheduler.skipped.push(member);
            continue;
        }
        debug!(idx, member = %member, "team member assigned");
        scheduler.last_assigned = Some(member.id());
        scheduler.cursor = (idx + 1) % total;
        return Some(Assignment::member(member));
    }
    None
}

impl Scheduler<'_> {
    fn rejection(&self, member: &TeamMember, slot: &str) -> Option<Rejection> {
        if !member.is_available_for(slot) {
            return Some(Rejection::Unavailable);
        }
        if self.opts.avoid_back_to_back && self.last_assigned == Some(member.id()) {
            return Some(Rejection::AssignedPreviousSlot);
        }
        None
    }
}
