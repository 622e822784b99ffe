#![forbid(unsafe_code)]
//! Oncall-rota : génération de rotation d'astreinte pour une petite équipe.
//!
//! - Équipe et créneaux lus depuis des fichiers texte.
//! - Rotation round-robin avec file des personnes reportées.
//! - Pas deux créneaux tournés consécutifs pour la même personne (mode indexé).
//! - Détection de conflits, exports JSON/CSV.

pub mod io;
pub mod model;
pub mod render;
pub mod scheduler;

pub use model::{Assignment, MemberId, ModelError, Schedule, Slot, SlotPlan, Team, TeamMember};
pub use render::{gap_warning, ScheduleRenderer, TextRenderer};
pub use scheduler::{
    detect_conflicts, generate_schedule, Conflict, ConflictKind, RotationOptions, SchedError,
    Scheduler, Variant,
};
