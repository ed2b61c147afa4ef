#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "serde")]
use garde::storage::JsonReportStore;
use garde::{
    calendar::{parse_date, DateRange},
    io,
    model::Group,
    report::ScheduleReport,
    scheduler::{
        detect_conflicts, ConflictKind, DutyMode, FairnessMetric, ScheduleOptions, Scheduler,
    },
    storage::{ReportStore, TextReportStore},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de répartition des gardes (RA)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`, filtre via RUST_LOG)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer un planning de garde
    Generate {
        /// Fichier roster `nom | bâtiment | indisponibilités`
        #[arg(short, long)]
        infile: String,
        #[arg(short, long, default_value = "schedule_out.txt")]
        outfile: String,
        /// M/D/YYYY
        #[arg(short, long)]
        start_date: String,
        /// M/D/YYYY
        #[arg(short, long)]
        end_date: String,
        /// Début des vacances (exclues du planning)
        #[arg(long, requires = "break_end")]
        break_start: Option<String>,
        /// Fin des vacances (incluse)
        #[arg(long, requires = "break_start")]
        break_end: Option<String>,
        /// Week-ends à deux bâtiments
        #[arg(long)]
        two: bool,
        #[arg(long, default_value = "homewood")]
        first_group: String,
        #[arg(long, default_value = "bradford")]
        second_group: String,
        #[arg(long, value_enum, default_value_t = Metric::Combined)]
        metric: Metric,
        /// Graine du départage aléatoire (tirée au hasard si absente)
        #[arg(long)]
        seed: Option<u64>,
        /// Export JSON du rapport (optionnel)
        #[arg(long)]
        json: Option<String>,
        /// Code 2 si un jour a dû être résolu en mode dégradé
        #[arg(long)]
        strict: bool,
    },

    /// Valider et lister un roster
    Roster {
        #[arg(short, long)]
        infile: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Metric {
    /// semaine + week-end cumulés
    Combined,
    /// semaine uniquement
    WeekdayOnly,
}

impl From<Metric> for FairnessMetric {
    fn from(m: Metric) -> Self {
        match m {
            Metric::Combined => FairnessMetric::Combined,
            Metric::WeekdayOnly => FairnessMetric::WeekdayOnly,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Generate {
            infile,
            outfile,
            start_date,
            end_date,
            break_start,
            break_end,
            two,
            first_group,
            second_group,
            metric,
            seed,
            json,
            strict,
        } => {
            let start = parse_date(&start_date).context("--start-date")?;
            let end = parse_date(&end_date).context("--end-date")?;
            let window = match (break_start, break_end) {
                (Some(bs), Some(be)) => Some((
                    parse_date(&bs).context("--break-start")?,
                    parse_date(&be).context("--break-end")?,
                )),
                (None, None) => None,
                _ => bail!("--break-start and --break-end go together"),
            };
            let range = DateRange::with_break(start, end, window)?;
            let roster = io::import_roster(&infile)?;

            let mode = if two {
                DutyMode::Dual {
                    first: Group::new(&first_group),
                    second: Group::new(&second_group),
                }
            } else {
                println!("just one building");
                DutyMode::Single
            };
            let options = ScheduleOptions {
                mode,
                metric: metric.into(),
            };

            let seed = seed.unwrap_or_else(rand::random);
            let mut rng = StdRng::seed_from_u64(seed);
            let schedule = Scheduler::new(&roster, options).run(&range, &mut rng)?;
            for failure in &schedule.failures {
                eprintln!("{failure}");
            }

            let report = ScheduleReport::from_schedule(&schedule, &roster);
            let store = TextReportStore::new(&outfile);
            store.save(&report)?;
            #[cfg(feature = "serde")]
            if let Some(path) = json {
                JsonReportStore::new(path).save(&report)?;
            }
            #[cfg(not(feature = "serde"))]
            if json.is_some() {
                bail!("--json requires the `serde` feature");
            }

            let mut stdout = std::io::stdout().lock();
            report.write_summary(&mut stdout)?;
            drop(stdout);
            println!("Seed: {seed}");

            for c in detect_conflicts(&schedule, &roster) {
                let kind = match c.kind {
                    ConflictKind::Unavailable => "assigned while unavailable",
                    ConflictKind::DoubleRole => "covers both buildings",
                };
                eprintln!("review {} : {} ({kind})", c.date, c.person);
            }
            println!(
                "Finished schedule has been output to {}.",
                store.path().display()
            );

            // Code 2 = WARNING/DEGRADED
            if strict && schedule.is_degraded() {
                2
            } else {
                0
            }
        }
        Commands::Roster { infile } => {
            let roster = io::import_roster(&infile)?;
            for p in roster.iter() {
                let dates: Vec<String> = p.unavailable.iter().map(ToString::to_string).collect();
                println!("{} | {} | {}", p.name, p.group, dates.join(", "));
            }
            println!("{} people", roster.len());
            0
        }
    };

    std::process::exit(code);
}
