use std::fs;
use std::io::{self, BufWriter, IsTerminal, Read, Write};

use anyhow::{bail, Context};
use clap::Parser;

use usagestats_parser::bugreport::{Bugreport, Section};
use usagestats_parser::cli_parser::{Cli, Format};
use usagestats_parser::diagnostics::{CollectingDiagnostics, Diagnostics, LogDiagnostics};
use usagestats_parser::doc::{csv as csv_export, text};
use usagestats_parser::plugin::{Plugin, UsageStatsPlugin};
use usagestats_parser::repl::{repl, ReplState};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .format_timestamp(None)
        .init();

    let input = read_input(&args)?;

    let mut plugin = UsageStatsPlugin::new(&args.section, args.sort);
    let mut collected = CollectingDiagnostics::new();
    let mut logged = LogDiagnostics;
    // the REPL shows diagnostics on demand instead of logging them
    let diag: &mut dyn Diagnostics = if args.repl {
        &mut collected
    } else {
        &mut logged
    };

    plugin.reset();
    match input {
        Input::Raw(text) => plugin.load_section(&Section::from_text(&args.section, &text), diag),
        Input::Bugreport(bugreport) => plugin.load(&bugreport, diag),
    }

    if args.repl {
        let state = ReplState::new(plugin.records(), &collected.messages);
        repl(&state).context("REPL failed")?;
        return Ok(());
    }

    let Some(chapter) = plugin.generate()? else {
        eprintln!("No usage stats found ({} missing).", args.section);
        return Ok(());
    };

    match args.format {
        Format::Text => {
            let stdout = io::stdout();
            let styled = stdout.is_terminal();
            let mut out = BufWriter::new(stdout.lock());
            text::write_chapter(&mut out, &chapter, styled)?;
            out.flush()?;
        }
        Format::Csv => {
            let written = csv_export::export(&chapter, &args.csv_dir)
                .with_context(|| format!("writing csv to {}", args.csv_dir.display()))?;
            println!("{} csv files written to {}", written.len(), args.csv_dir.display());
        }
    }

    Ok(())
}

enum Input {
    Raw(String),
    Bugreport(Bugreport),
}

fn read_input(args: &Cli) -> anyhow::Result<Input> {
    if args.stdin {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(if args.raw {
            Input::Raw(text)
        } else {
            Input::Bugreport(Bugreport::from_text(&text))
        });
    }

    let Some(path) = args.file_path.as_deref() else {
        bail!("Please input the file name (or use --stdin).");
    };
    if !path.exists() {
        bail!("The file '{}' does not exist.", path.display());
    }

    if args.raw {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(Input::Raw(text))
    } else {
        let bugreport = Bugreport::open(path)
            .with_context(|| format!("loading bugreport {}", path.display()))?;
        Ok(Input::Bugreport(bugreport))
    }
}
