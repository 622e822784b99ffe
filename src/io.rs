use crate::model::{Slot, SlotPlan, Team, TeamMember};
use crate::scheduler::Variant;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::debug;
#[cfg(feature = "serde")]
use {
    crate::model::{Assignment, Schedule},
    anyhow::anyhow,
    chrono::{DateTime, Utc},
    csv::{ReaderBuilder, WriterBuilder},
    serde::Serialize,
    std::io::Write,
    tempfile::NamedTempFile,
};

/// Lignes utiles d'un fichier texte, avec leur numéro (base 1).
/// Lignes vides et commentaires `#` ignorés.
pub fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Équipe au format `NOM` ou `NOM: creneau1, creneau2`
pub fn parse_team(text: &str) -> anyhow::Result<Team> {
    let mut members = Vec::new();
    for (lineno, line) in content_lines(text) {
        let member = match line.split_once(':') {
            Some((name, off)) => TeamMember::new(name, off.split(',')),
            None => TeamMember::new(line, std::iter::empty::<&str>()),
        }
        .with_context(|| format!("invalid team line {lineno}"))?;
        debug!(
            member = %member,
            unavailable = ?member.unavailable(),
            "created team member"
        );
        members.push(member);
    }
    Ok(Team::new(members))
}

pub fn load_team<P: AsRef<Path>>(path: P) -> anyhow::Result<Team> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading team");
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_team(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Créneaux : `ID` ou `ID: TEXTE FIXE` en mode indexé, identifiant brut en mode ordonné.
pub fn parse_slots(text: &str, variant: Variant) -> anyhow::Result<SlotPlan> {
    let mut slots = Vec::new();
    for (lineno, line) in content_lines(text) {
        let slot = match (variant, line.split_once(':')) {
            (Variant::Keyed, Some((id, fixed))) => Slot::new(id, Some(fixed)),
            _ => Slot::rotated(line),
        }
        .with_context(|| format!("invalid slot line {lineno}"))?;
        slots.push(slot);
    }
    Ok(match variant {
        Variant::Keyed => SlotPlan::keyed(slots),
        Variant::Ordered => SlotPlan::ordered(slots),
    })
}

pub fn load_slots<P: AsRef<Path>>(path: P, variant: Variant) -> anyhow::Result<SlotPlan> {
    let path = path.as_ref();
    debug!(path = %path.display(), ?variant, "reading time slots");
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_slots(&text, variant).with_context(|| format!("parsing {}", path.display()))
}

/// Import d'équipe depuis CSV: header `name,unavailable` (créneaux séparés par `;`)
#[cfg(feature = "serde")]
pub fn import_team_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Team> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut members = Vec::new();
    for (idx, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?;
        let off = rec.get(1).unwrap_or("");
        let member = TeamMember::new(name, off.split(';'))
            .with_context(|| format!("invalid team row {}", idx + 2))?;
        members.push(member);
    }
    Ok(Team::new(members))
}

#[cfg(feature = "serde")]
#[derive(Serialize)]
struct ScheduleExport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    schedule: &'a Schedule,
}

/// Export JSON du planning (jolie mise en forme)
#[cfg(feature = "serde")]
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let export = ScheduleExport {
        generated_at: Utc::now(),
        schedule,
    };
    let json = serde_json::to_vec_pretty(&export)?;
    write_atomic(path.as_ref(), &json)
}

/// Export CSV du planning: header `slot,assigned,kind`
#[cfg(feature = "serde")]
pub fn export_schedule_csv<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    w.write_record(["slot", "assigned", "kind"])?;
    for (slot, assignment) in schedule.iter() {
        let kind = match assignment {
            Assignment::Member { .. } => "member",
            Assignment::Fixed { .. } => "fixed",
        };
        w.write_record([slot, assignment.value(), kind])?;
    }
    let data = w
        .into_inner()
        .map_err(|err| anyhow!("flushing csv buffer: {err}"))?;
    write_atomic(path.as_ref(), &data)
}

#[cfg(feature = "serde")]
fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}
