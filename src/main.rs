use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use incver::ui;
use incver::version::BumpKind;
use incver::workflow::{self, UpversionOptions};

#[derive(Parser)]
#[command(name = "incver", about = "Update a package's version number")]
struct Cli {
    #[arg(
        short = 'C',
        long,
        value_name = "DIR",
        default_value = ".",
        help = "Project root to operate on"
    )]
    directory: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current version of the package
    Version,

    /// Update the package version (default patch-level increase)
    Upversion {
        #[arg(
            long,
            group = "bump",
            help = "Update major version number (set minor and patch to 0)"
        )]
        major: bool,

        #[arg(long, group = "bump", help = "Update minor version number (set patch to 0)")]
        minor: bool,

        #[arg(long, group = "bump", help = "Update patch version (default)")]
        patch: bool,

        #[arg(long, help = "Create a tag (git only)")]
        tag: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Version => {
            let version = match workflow::current_version(&cli.directory) {
                Ok(version) => version,
                Err(e) => {
                    ui::display_error(&e.to_string());
                    std::process::exit(1);
                }
            };
            println!("{}", version);
        }
        Commands::Upversion {
            major,
            minor,
            patch,
            tag,
        } => {
            let bump = match (major, minor, patch) {
                (true, _, _) => BumpKind::Major,
                (_, true, _) => BumpKind::Minor,
                _ => BumpKind::Patch,
            };

            let options = UpversionOptions { bump, tag };
            let report = match workflow::upversion(&cli.directory, &options) {
                Ok(report) => report,
                Err(e) => {
                    ui::display_error(&e.to_string());
                    std::process::exit(1);
                }
            };

            for warning in &report.warnings {
                ui::display_warning(warning);
            }
            ui::display_changed_files(&report.changed, &report.new_version);

            if let Some(release) = &report.release {
                ui::display_release_report(release);
            } else if tag && !report.changed.is_empty() {
                ui::display_status("tag requested but the project root is not under version control");
            }

            println!("{}", report.new_version);
        }
    }

    Ok(())
}
