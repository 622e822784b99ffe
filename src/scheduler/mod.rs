mod assignment;
mod conflicts;
mod types;

pub use conflicts::detect_conflicts;
pub use types::{Conflict, ConflictKind, RotationOptions, SchedError, Variant};

use crate::model::{Assignment, MemberId, Schedule, Slot, SlotPlan, Team, TeamMember};
use tracing::debug;

/// Scheduler : porte l'état de la rotation le temps d'une génération.
///
/// Le curseur, la file des personnes reportées et l'identité du dernier
/// assigné vivent ici et nulle part ailleurs ; l'équipe est empruntée en
/// lecture seule.
#[derive(Debug)]
pub struct Scheduler<'t> {
    team: &'t Team,
    opts: RotationOptions,
    cursor: usize,
    skipped: Vec<&'t TeamMember>,
    last_assigned: Option<MemberId>,
}

impl<'t> Scheduler<'t> {
    pub fn new(team: &'t Team, opts: RotationOptions) -> Result<Self, SchedError> {
        if team.is_empty() {
            return Err(SchedError::EmptyRoster);
        }
        Ok(Self {
            team,
            opts,
            cursor: 0,
            skipped: Vec::new(),
            last_assigned: None,
        })
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn skipped(&self) -> &[&'t TeamMember] {
        &self.skipped
    }
    pub fn last_assigned(&self) -> Option<MemberId> {
        self.last_assigned
    }

    /// Traite un seul créneau ; `None` si personne n'est éligible.
    pub fn assign_slot(&mut self, slot: &Slot) -> Option<Assignment> {
        assignment::assign_slot(self, slot)
    }

    /// Génère le planning complet, créneau par créneau dans l'ordre du plan.
    pub fn generate(self, plan: &SlotPlan) -> Schedule {
        self.generate_with(plan, |_| {})
    }

    /// Comme [`Scheduler::generate`], `on_gap` étant appelé dès qu'un créneau
    /// reste sans personne.
    pub fn generate_with<F>(mut self, plan: &SlotPlan, mut on_gap: F) -> Schedule
    where
        F: FnMut(&str),
    {
        let mut schedule = Schedule::default();
        for slot in plan.slots() {
            match self.assign_slot(slot) {
                Some(assignment) => schedule.insert(&slot.id, assignment),
                None => {
                    on_gap(&slot.id);
                    schedule.record_gap(&slot.id);
                }
            }
        }
        debug!(
            assigned = schedule.len(),
            gaps = schedule.gaps().len(),
            still_skipped = self.skipped.len(),
            "schedule generated"
        );
        schedule
    }
}

/// Raccourci : valide les entrées puis génère le planning.
pub fn generate_schedule(
    team: &Team,
    plan: &SlotPlan,
    opts: RotationOptions,
) -> Result<Schedule, SchedError> {
    let scheduler = Scheduler::new(team, opts)?;
    if plan.is_empty() {
        return Err(SchedError::NoSlots);
    }
    Ok(scheduler.generate(plan))
}
