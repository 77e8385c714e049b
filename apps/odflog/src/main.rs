//! odflog CLI binary entry point.
//! Scans the validator log and prints annotations.

use clap::Parser;
use log::{info, LevelFilter};
use odflog::cli::{AnnotateArgs, Cli, Commands};
use odflog::config::ConfigStatus;
use odflog::emit::{EmitOptions, RootMode, RootPrefix};
use odflog::{accumulate, config, output, utils};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Some(Commands::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Annotate(args)) => annotate(args),
        None => annotate(AnnotateArgs::default()),
    }
}

fn annotate(args: AnnotateArgs) {
    let eff = config::resolve_effective(
        args.repo_root.as_deref(),
        args.log.as_deref(),
        args.root.as_deref(),
        args.output.as_deref(),
        if args.strip_root { Some(true) } else { None },
        if args.escape { Some(true) } else { None },
        if args.fail_on_error { Some(true) } else { None },
    );
    if let ConfigStatus::Invalid(p) = &eff.config {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            format!("Ignoring unreadable config {}; using defaults.", p.display())
        );
    }
    info!("reading {}", eff.log.display());
    let scan = match accumulate::load_log(&eff.log, &eff.extension) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    };
    info!(
        "{} diagnostics in {} archives",
        scan.store.entry_count(),
        scan.store.len()
    );
    let opts = EmitOptions {
        root: RootPrefix {
            prefix: eff.root.clone(),
            mode: if eff.strip_root {
                RootMode::Strip
            } else {
                RootMode::Keep
            },
        },
        escape: eff.escape,
    };
    let reports = scan.store.into_reports();
    output::print_reports(&reports, &eff.output, &opts);
    if args.stats {
        output::print_stats(&scan.stats);
    }
    if eff.fail_on_error && output::error_count(&reports) > 0 {
        std::process::exit(1);
    }
}
