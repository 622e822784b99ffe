use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("team member name cannot be empty")]
    EmptyName,
    #[error("slot identifier cannot be empty")]
    EmptySlotId,
}

/// Identité d'un membre, attribuée à la construction.
///
/// Deux membres homonymes restent distincts : c'est cet identifiant, et non
/// le nom, qui sert à détecter une double astreinte consécutive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MemberId(Uuid);

impl MemberId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Membre d'astreinte
///
/// Sérialisable mais jamais désérialisé : seul [`TeamMember::new`] attribue
/// une identité.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TeamMember {
    id: MemberId,
    name: String,
    unavailable: BTreeSet<String>,
}

impl TeamMember {
    /// Crée un membre ; le nom est trimé et ne peut pas être vide.
    pub fn new<N, I, S>(name: N, unavailable: I) -> Result<Self, ModelError>
    where
        N: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ModelError::EmptyName);
        }
        let unavailable = unavailable
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Ok(Self {
            id: MemberId::random(),
            name: name.to_string(),
            unavailable,
        })
    }

    pub fn id(&self) -> MemberId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn unavailable(&self) -> &BTreeSet<String> {
        &self.unavailable
    }

    pub fn is_available_for(&self, slot: &str) -> bool {
        !self.unavailable.contains(slot)
    }
}

impl fmt::Display for TeamMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Équipe ordonnée : l'ordre est celui de la rotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Team {
    members: Vec<TeamMember>,
}

impl Team {
    pub fn new(members: Vec<TeamMember>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }
    pub fn len(&self) -> usize {
        self.members.len()
    }
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn find_by_id(&self, id: MemberId) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Permutation aléatoire en place, seule mutation autorisée avant la génération.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.members.shuffle(rng);
    }
}

impl FromIterator<TeamMember> for Team {
    fn from_iter<T: IntoIterator<Item = TeamMember>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Créneau à pourvoir, éventuellement pré-rempli par un texte fixe.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Slot {
    pub id: String,
    pub fixed: Option<String>,
}

impl Slot {
    pub fn new<S: AsRef<str>>(id: S, fixed: Option<&str>) -> Result<Self, ModelError> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(ModelError::EmptySlotId);
        }
        let fixed = fixed
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string);
        Ok(Self {
            id: id.to_string(),
            fixed,
        })
    }

    pub fn rotated<S: AsRef<str>>(id: S) -> Result<Self, ModelError> {
        Self::new(id, None)
    }

    pub fn needs_rotation(&self) -> bool {
        self.fixed.is_none()
    }
}

/// Créneaux dans leur ordre de traitement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotPlan {
    slots: Vec<Slot>,
}

impl SlotPlan {
    /// Plan indexé par identifiant : un doublon remplace l'entrée précédente,
    /// le traitement suit l'ordre lexical croissant des identifiants.
    pub fn keyed<I: IntoIterator<Item = Slot>>(slots: I) -> Self {
        let by_id: BTreeMap<String, Slot> = slots
            .into_iter()
            .map(|slot| (slot.id.clone(), slot))
            .collect();
        Self {
            slots: by_id.into_values().collect(),
        }
    }

    /// Plan séquentiel : ordre d'entrée conservé, première occurrence gardée,
    /// aucun texte fixe.
    pub fn ordered<I: IntoIterator<Item = Slot>>(slots: I) -> Self {
        let mut seen = HashSet::new();
        let slots = slots
            .into_iter()
            .filter(|slot| seen.insert(slot.id.clone()))
            .map(|slot| Slot {
                fixed: None,
                ..slot
            })
            .collect();
        Self { slots }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }
    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
    pub fn get(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }
}

/// Valeur retenue pour un créneau.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Assignment {
    Member { id: MemberId, name: String },
    Fixed { text: String },
}

impl Assignment {
    pub fn member(member: &TeamMember) -> Self {
        Self::Member {
            id: member.id(),
            name: member.name().to_string(),
        }
    }

    pub fn member_id(&self) -> Option<MemberId> {
        match self {
            Self::Member { id, .. } => Some(*id),
            Self::Fixed { .. } => None,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Member { name, .. } => name,
            Self::Fixed { text } => text,
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Planning généré : une entrée par créneau pourvu, plus les créneaux restés vides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    entries: BTreeMap<String, Assignment>,
    gaps: Vec<String>,
}

impl Schedule {
    pub fn insert(&mut self, slot: &str, assignment: Assignment) {
        self.entries.insert(slot.to_string(), assignment);
    }

    pub fn record_gap(&mut self, slot: &str) {
        self.gaps.push(slot.to_string());
    }

    pub fn get(&self, slot: &str) -> Option<&Assignment> {
        self.entries.get(slot)
    }

    /// Entrées triées par identifiant de créneau.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Assignment)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Créneaux épuisés, dans l'ordre de traitement.
    pub fn gaps(&self) -> &[String] {
        &self.gaps
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn member_name_is_trimmed_and_required() {
        let m = TeamMember::new("  alice ", ["mon", " ", "tue "]).unwrap();
        assert_eq!(m.name(), "alice");
        assert_eq!(m.unavailable().len(), 2);
        assert!(!m.is_available_for("tue"));
        assert_eq!(
            TeamMember::new("   ", Vec::<String>::new()),
            Err(ModelError::EmptyName)
        );
    }

    #[test]
    fn homonyms_keep_distinct_ids() {
        let a = TeamMember::new("sam", Vec::<&str>::new()).unwrap();
        let b = TeamMember::new("sam", Vec::<&str>::new()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn empty_fixed_text_means_rotation() {
        let slot = Slot::new("mon", Some("  ")).unwrap();
        assert!(slot.needs_rotation());
        assert_eq!(Slot::rotated(""), Err(ModelError::EmptySlotId));
    }

    #[test]
    fn keyed_plan_sorts_and_last_duplicate_wins() {
        let plan = SlotPlan::keyed(vec![
            Slot::rotated("b").unwrap(),
            Slot::new("a", Some("x")).unwrap(),
            Slot::rotated("a").unwrap(),
        ]);
        let ids: Vec<_> = plan.slots().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(plan.slots()[0].needs_rotation());
    }

    #[test]
    fn ordered_plan_keeps_file_order() {
        let plan = SlotPlan::ordered(vec![
            Slot::rotated("wed").unwrap(),
            Slot::new("mon", Some("closed")).unwrap(),
            Slot::rotated("wed").unwrap(),
        ]);
        let ids: Vec<_> = plan.slots().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["wed", "mon"]);
        assert!(plan.slots().iter().all(Slot::needs_rotation));
    }

    #[test]
    fn seeded_shuffle_is_a_permutation() {
        let team: Team = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|n| TeamMember::new(n, Vec::<&str>::new()).unwrap())
            .collect();
        let mut one = team.clone();
        let mut two = team.clone();
        one.shuffle(&mut StdRng::seed_from_u64(7));
        two.shuffle(&mut StdRng::seed_from_u64(7));
        assert_eq!(one, two);

        let mut names: Vec<_> = one.members().iter().map(|m| m.name()).collect();
        names.sort_unstable();
        assert_eq!(names, ["a", "b", "c", "d", "e"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn team_serializes_with_member_ids() {
        let sam = TeamMember::new("sam", ["mon"]).unwrap();
        let team = Team::new(vec![sam.clone()]);
        let value = serde_json::to_value(&team).unwrap();
        assert_eq!(value["members"][0]["name"], "sam");
        assert_eq!(value["members"][0]["id"], sam.id().to_string());
        assert_eq!(value["members"][0]["unavailable"][0], "mon");
    }
}
