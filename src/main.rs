use std::{
    fs::File,
    io::{self, stderr, BufWriter, IsTerminal},
    path::PathBuf,
    process,
};

use clap::{error::ErrorKind, Parser};
use eyre::Context as _;
use gmailfilter::{feed::Feed, tabular, Error};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt as _, EnvFilter};

const PROGRAM: &str = "gmailfilter";

/// Flattens a Gmail filter export into CSV, one row per filter clause.
#[derive(Parser, Debug)]
#[command(name = PROGRAM, version)]
struct Cmd {
    /// Gmail filter export, or a CSV table with `--from-csv`.
    #[arg()]
    input: PathBuf,

    /// Read INPUT as CSV and print the regenerated filter feed.
    #[arg(long, default_value_t = false)]
    from_csv: bool,

    /// Also write the feed regenerated from the expanded filters to this path.
    #[arg(long, conflicts_with = "from_csv")]
    feed_out: Option<PathBuf>,

    /// Feed title used when regenerating from CSV.
    #[arg(long, default_value = "Mail Filters")]
    title: String,

    #[arg(long, default_value_t = false)]
    silent: bool,
}

fn main() {
    let cmd = match Cmd::try_parse() {
        | Ok(cmd) => cmd,
        | Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
        | Err(_) => fail(
            Error::Usage {
                program: PROGRAM.to_owned(),
            }
            .into(),
        ),
    };

    if let Err(err) = run(cmd) {
        fail(err);
    }
}

fn fail(err: eyre::Error) -> ! {
    eprintln!("{PROGRAM}: {err:#}.");
    process::exit(1);
}

fn run(cmd: Cmd) -> Result<(), eyre::Error> {
    if !cmd.silent {
        let mut subscriber = tracing_subscriber::fmt::layer().with_writer(io::stderr);

        if !stderr().is_terminal() {
            subscriber.set_ansi(false);
        }

        tracing::subscriber::set_global_default(
            tracing_subscriber::Registry::default()
                .with(
                    EnvFilter::builder()
                        .with_env_var("GMAILFILTER_LOG")
                        .with_default_directive(LevelFilter::WARN.into())
                        .from_env_lossy(),
                )
                .with(subscriber),
        )
        .wrap_err("failed to configure tracing")?;
    }

    if cmd.from_csv {
        let file = File::open(&cmd.input).map_err(|source| Error::Io {
            path: cmd.input.clone(),
            source,
        })?;
        let filters = tabular::read_csv(file)?;

        Feed::from_filters(&cmd.title, &filters).write(io::stdout().lock())?;

        return Ok(());
    }

    let feed = Feed::from_path(&cmd.input)?;
    let filters = feed.to_filters()?.expand();

    if let Some(path) = &cmd.feed_out {
        let file = File::create(path).wrap_err_with(|| format!("failed to create {}", path.display()))?;

        Feed::from_filters(&feed.title, &filters).write(BufWriter::new(file))?;
        tracing::info!("Wrote regenerated feed to {}.", path.display());
    }

    tabular::write_csv(&filters, io::stdout().lock())?;

    Ok(())
}
