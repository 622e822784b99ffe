use crate::model::Schedule;

/// Permet de customiser le rendu du planning.
pub trait ScheduleRenderer {
    fn render(&self, schedule: &Schedule) -> String;
}

/// Une ligne `creneau: valeur` par entrée, triée par créneau.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl ScheduleRenderer for TextRenderer {
    fn render(&self, schedule: &Schedule) -> String {
        schedule
            .iter()
            .map(|(slot, assignment)| format!("{slot}: {assignment}\n"))
            .collect()
    }
}

/// Avertissement émis pour un créneau resté sans personne.
pub fn gap_warning(slot: &str) -> String {
    format!("WARNING: No team member available for slot '{slot}'")
}
