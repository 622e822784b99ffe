use crate::model::MemberId;
use thiserror::Error;

/// Configuration produit de la rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Créneaux indexés et triés, textes fixes, pas deux fois de suite la même personne.
    #[default]
    Keyed,
    /// Créneaux dans l'ordre du fichier, toujours tournés, équipe toujours mélangée.
    Ordered,
}

impl Variant {
    pub fn always_shuffles(self) -> bool {
        matches!(self, Variant::Ordered)
    }
}

/// Options de rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationOptions {
    /// Exclut la personne du créneau tourné précédent.
    pub avoid_back_to_back: bool,
}

impl RotationOptions {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            avoid_back_to_back: matches!(variant, Variant::Keyed),
        }
    }
}

impl Default for RotationOptions {
    fn default() -> Self {
        Self::for_variant(Variant::Keyed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    Unavailable,
    BackToBack,
    UnknownSlot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub slot: String,
    pub member: Option<MemberId>,
    pub kind: ConflictKind,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchedError {
    #[error("No team file provided")]
    EmptyRoster,
    #[error("No time slots provided")]
    NoSlots,
}
