use clap::Parser;
use clap_complete::Shell;
use pacmankit::Intents;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pipac")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Declarative package lists for pacman, yay and paru", long_about = None)]
#[command(after_help = "Without package lists, packages.{txt,org,md} and \
<hostname>.{txt,org,md} from the config directory are used.")]
pub struct Cli {
    /// Install packages missing from the lists
    #[arg(short, long)]
    pub install: bool,

    /// Mark explicit packages absent from the lists as dependencies
    #[arg(short, long)]
    pub prune: bool,

    /// Remove orphaned dependencies until none are left
    #[arg(short, long)]
    pub orphans: bool,

    /// List explicit packages absent from the lists and exit
    #[arg(short, long)]
    pub new: bool,

    /// Package lists to use instead of the default ones
    #[arg(value_name = "PACKAGE_LIST")]
    pub lists: Vec<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long)]
    pub noconfirm: bool,

    /// Show what would be done without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the plan (or untracked packages) as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Config file to use instead of <config dir>/config.toml
    #[arg(long, value_name = "PATH", env = "PIPAC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Reconciliation intents selected on the command line.
    pub fn intents(&self) -> Intents {
        Intents {
            install: self.install,
            prune: self.prune,
            report: self.new,
        }
    }

    /// Whether any action flag was given.
    pub fn has_action(&self) -> bool {
        self.intents().any() || self.orphans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from(["pipac", "-ip", "-y", "a.txt", "b.txt"]);
        assert!(cli.install);
        assert!(cli.prune);
        assert!(!cli.orphans);
        assert!(cli.noconfirm);
        assert_eq!(cli.lists, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert_eq!(
            cli.intents(),
            Intents {
                install: true,
                prune: true,
                report: false,
            }
        );
    }

    #[test]
    fn test_no_action() {
        let cli = Cli::parse_from(["pipac", "list.txt"]);
        assert!(!cli.has_action());

        let cli = Cli::parse_from(["pipac", "-o"]);
        assert!(cli.has_action());
        assert!(!cli.intents().any());
    }

    #[test]
    fn test_new_is_report() {
        let cli = Cli::parse_from(["pipac", "--new", "--json"]);
        assert!(cli.intents().report);
        assert!(cli.json);
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::parse_from(["pipac", "-vvv", "-i"]);
        assert_eq!(cli.verbose, 3);
    }
}
