#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use clap::builder::FalseyValueParser;
use clap::{Parser, ValueEnum};
use oncall_rota::{
    gap_warning, io,
    model::Team,
    render::{ScheduleRenderer, TextRenderer},
    RotationOptions, SchedError, Scheduler, Variant,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::debug;

/// Générateur de rotation d'astreinte
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Fichier d'équipe : `NOM` ou `NOM: creneau1, creneau2`
    #[arg(short, long)]
    team: Option<PathBuf>,

    /// Équipe au format CSV (`name,unavailable`)
    #[cfg(feature = "serde")]
    #[arg(long, conflicts_with = "team")]
    team_csv: Option<PathBuf>,

    /// Fichier de créneaux : `ID` ou `ID: TEXTE FIXE`
    #[arg(short, long)]
    slots: Option<PathBuf>,

    /// Mélange l'équipe avant la génération
    #[arg(short = 'r', long)]
    shuffle: bool,

    /// Graine du mélange (reproductible)
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = VariantArg::Keyed)]
    variant: VariantArg,

    #[cfg(feature = "serde")]
    #[arg(long)]
    out_json: Option<PathBuf>,

    #[cfg(feature = "serde")]
    #[arg(long)]
    out_csv: Option<PathBuf>,

    /// Trace détaillée sur stdout (feature `logging`)
    #[arg(short, long, env = "ONCALL_ROTA_DEBUG", value_parser = FalseyValueParser::new())]
    debug: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    /// Créneaux triés, textes fixes, pas deux fois de suite la même personne
    Keyed,
    /// Créneaux dans l'ordre du fichier, équipe toujours mélangée
    Ordered,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Keyed => Variant::Keyed,
            VariantArg::Ordered => Variant::Ordered,
        }
    }
}

#[cfg(feature = "logging")]
struct LocalTimestamp;

#[cfg(feature = "logging")]
impl tracing_subscriber::fmt::time::FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        use std::fmt::Write;
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

#[cfg(feature = "logging")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTimestamp)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stdout)
        .try_init();
}

fn load_team(cli: &Cli) -> Result<Team> {
    #[cfg(feature = "serde")]
    if let Some(path) = &cli.team_csv {
        return io::import_team_csv(path);
    }
    match &cli.team {
        Some(path) => io::load_team(path),
        None => bail!(SchedError::EmptyRoster),
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.debug {
        init_tracing();
    }
    debug!("starting");

    let variant = Variant::from(cli.variant);
    let mut team = load_team(&cli)?;
    if team.is_empty() {
        bail!(SchedError::EmptyRoster);
    }
    let plan = match &cli.slots {
        Some(path) => io::load_slots(path, variant)?,
        None => bail!(SchedError::NoSlots),
    };
    if plan.is_empty() {
        bail!(SchedError::NoSlots);
    }

    if cli.shuffle || variant.always_shuffles() {
        match cli.seed {
            Some(seed) => team.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => team.shuffle(&mut rand::thread_rng()),
        }
        let order: Vec<&str> = team.members().iter().map(|m| m.name()).collect();
        debug!(?order, "team after shuffling");
    }

    let scheduler = Scheduler::new(&team, RotationOptions::for_variant(variant))?;
    let schedule = scheduler.generate_with(&plan, |slot| println!("{}", gap_warning(slot)));
    print!("{}", TextRenderer.render(&schedule));

    #[cfg(feature = "serde")]
    {
        if let Some(path) = &cli.out_json {
            io::export_schedule_json(path, &schedule)?;
        }
        if let Some(path) = &cli.out_csv {
            io::export_schedule_csv(path, &schedule)?;
        }
    }
    debug!("done");

    Ok(0)
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("oncall-rota: {err:#}");
            1
        }
    };
    std::process::exit(code);
}
