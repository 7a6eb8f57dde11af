use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use env_logger::{Env, Target};
use pas_study::{FileStore, MemoryStore, Study, StudyError, default_data_dir};

const LOG_FILE: &str = "pas-study.log";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from
    #[arg(short, long)]
    questions: PathBuf,

    /// Directory where progress, preferences and the log are kept
    #[arg(short, long, env = "PAS_STUDY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Keep progress in memory only; nothing is saved
    #[arg(long)]
    ephemeral: bool,
}

fn main() {
    let args = Args::parse();
    let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);

    init_logging(&data_dir);

    if let Err(e) = run(&args, &data_dir) {
        log::error!("{}", e);
        eprintln!("Error running study session: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args, data_dir: &Path) -> Result<(), StudyError> {
    if args.ephemeral {
        log::info!("Running without saving progress");
        Study::from_json(&args.questions, MemoryStore::new())?.run()
    } else {
        let store = FileStore::open(data_dir)?;
        log::info!("Progress stored in {}", store.dir().display());
        Study::from_json(&args.questions, store)?.run()
    }
}

/// Logs go to a file: the terminal UI owns stdout and stderr.
fn init_logging(data_dir: &Path) {
    let env = Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);

    let file = fs::create_dir_all(data_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join(LOG_FILE))
    });
    match file {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("Logging disabled: cannot open {}: {}", LOG_FILE, e);
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    builder.init();
}
