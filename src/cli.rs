use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "awu", version, about = "Launch Wine games through umu-run profiles")]
pub struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        help = "Config root to use instead of $XDG_CONFIG_HOME or ~/.config"
    )]
    pub config_root: Option<PathBuf>,
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the awu directory layout
    Init,
    /// List discovered profiles
    List,
    /// Show a profile's prefix and default launch command
    Show(ShowArgs),
    /// Launch a game through umu-run
    Launch(LaunchArgs),
    /// Run a tool such as winecfg inside a profile's prefix
    Task(TaskArgs),
    /// Terminate every running Wine process
    Kill,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(help = "Profile display name or file name")]
    pub profile: String,
}

#[derive(Debug, Args)]
pub struct LaunchArgs {
    #[arg(help = "Profile display name or file name")]
    pub profile: String,
    #[arg(
        short = 'c',
        long,
        allow_hyphen_values = true,
        help = "Command text placed before umu-run (defaults to the profile's awu_args)"
    )]
    pub command: Option<String>,
}

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[arg(help = "Profile display name or file name")]
    pub profile: String,
    #[arg(help = "Executable to run with the profile's WINEPREFIX")]
    pub command: String,
}
