use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use class_timetable::config::{self, Config};
use class_timetable::normalize::Ingested;
use class_timetable::query::{self, Field, TimeOrder};
use class_timetable::render::{self, Format, View};
use class_timetable::rooms::{self, NewRoom, Room, RoomEndpoints};
use class_timetable::stats::TimetableStats;
use class_timetable::{logging, source, utils};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// TOML settings file. Defaults are used when it does not exist.
    #[clap(long, default_value = "config/timetable.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Classes for one cohort and section.
    Student {
        #[clap(long)]
        cohort: String,
        #[clap(long)]
        section: String,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Assignments for one instructor.
    Instructor {
        #[clap(long)]
        instructor: String,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Distinct values of one field, one per line.
    Options {
        #[clap(long, value_enum)]
        field: Field,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Counts of entries, cohorts, sections, instructors and courses.
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Writes every entry, in source order, to `<output-directory>/timetable.json`.
    Export {
        #[clap(long)]
        output_directory: PathBuf,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Lists rooms from a saved `/rooms/` response.
    Rooms {
        #[clap(long)]
        input: PathBuf,
    },
    /// Checks room input and prints the registration request.
    ValidateRoom {
        #[clap(long)]
        name: String,
        #[clap(long)]
        camera_ip: String,
        #[clap(long)]
        token: Option<String>,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Timetable export. Defaults to `source.path` from the config file.
    #[clap(long)]
    input: Option<PathBuf>,
}

#[derive(clap::Args)]
struct ViewArgs {
    #[command(flatten)]
    input: InputArgs,
    #[clap(long, value_enum, default_value_t = Format::Table)]
    format: Format,
    /// Overrides `sort.time_order` from the config file.
    #[clap(long, value_enum)]
    time_order: Option<TimeOrder>,
}

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> Result<()> {
    logging::init().context("init logging")?;

    let cli = Cli::parse();
    let config = config::load(&cli.config)?;

    match cli.command {
        Command::Student {
            cohort,
            section,
            view,
        } => {
            let ingested = load_usable(&view.input, &config)?;
            let time_order = view.time_order.unwrap_or(config.sort.time_order);
            let entries = query::student_view(&ingested.entries, &cohort, &section, time_order);
            print!("{}", render::render(&entries, View::Student, view.format)?);
        }
        Command::Instructor { instructor, view } => {
            let ingested = load_usable(&view.input, &config)?;
            let time_order = view.time_order.unwrap_or(config.sort.time_order);
            let entries = query::instructor_view(&ingested.entries, &instructor, time_order);
            print!("{}", render::render(&entries, View::Instructor, view.format)?);
        }
        Command::Options { field, input } => {
            let ingested = load_usable(&input, &config)?;
            for value in query::build_filter_index(&ingested.entries, field) {
                println!("{value}");
            }
        }
        Command::Stats { input } => {
            let ingested = load_entries(&input, &config)?;
            let stats = TimetableStats::from_entries(&ingested.entries);
            println!("status: {}", ingested.status);
            println!("entries: {}", stats.entries);
            println!("cohorts: {}", stats.cohorts);
            println!("sections: {}", stats.sections);
            println!("instructors: {}", stats.instructors);
            println!("courses: {}", stats.courses);
            println!("issues: {}", ingested.issues.len());
        }
        Command::Export {
            output_directory,
            input,
        } => {
            let ingested = load_usable(&input, &config)?;
            let path = utils::write_json_file("timetable", &output_directory, &ingested.entries)?;
            println!("{}", path.display());
        }
        Command::Rooms { input } => {
            let rooms: Vec<Room> = serde_json::from_str(&fs_err::read_to_string(&input)?)
                .with_context(|| format!("decode rooms {}", input.display()))?;
            for room in rooms.iter() {
                println!("{}", room.describe());
            }
        }
        Command::ValidateRoom {
            name,
            camera_ip,
            token,
        } => {
            let room = NewRoom::validate(&name, &camera_ip)?;
            let endpoints = RoomEndpoints::new(&config.api.base_url);
            println!("POST {}", endpoints.rooms());
            println!("Content-Type: application/json");
            if let Some(header) = rooms::authorization_header(token.as_deref()) {
                println!("Authorization: {header}");
            }
            println!();
            println!("{}", serde_json::to_string_pretty(&room)?);
        }
    }

    Ok(())
}

fn load_entries(input: &InputArgs, config: &Config) -> Result<Ingested> {
    let path: &Path = input.input.as_deref().unwrap_or(config.source.path.as_path());
    source::load(path).with_context(|| format!("load timetable {}", path.display()))
}

/// Like `load_entries`, but a malformed document is an error so it is not
/// shown as an empty timetable.
fn load_usable(input: &InputArgs, config: &Config) -> Result<Ingested> {
    let ingested = load_entries(input, config)?;
    if ingested.status.is_malformed() {
        anyhow::bail!("timetable document {}", ingested.status);
    }
    Ok(ingested)
}
