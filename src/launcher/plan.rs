use std::path::{Path, PathBuf};

use super::env::Environment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: PathBuf,
    pub env: Environment,
}

pub fn game_plan(
    command_text: &str,
    launcher: &str,
    profile_file: &str,
    profiles_dir: &Path,
    env: Environment,
) -> LaunchPlan {
    let mut tokens = command_text.split_whitespace().map(str::to_string);
    let config_args = ["--config".to_string(), profile_file.to_string()];

    let (program, args) = match tokens.next() {
        Some(program) => {
            let mut args: Vec<String> = tokens.collect();
            args.push(launcher.to_string());
            args.extend(config_args);
            (program, args)
        }
        None => (launcher.to_string(), config_args.to_vec()),
    };

    LaunchPlan {
        program,
        args,
        current_dir: profiles_dir.to_path_buf(),
        env,
    }
}

pub fn task_plan(command: &str, home_dir: &Path, env: Environment) -> LaunchPlan {
    LaunchPlan {
        program: command.to_string(),
        args: Vec::new(),
        current_dir: home_dir.to_path_buf(),
        env,
    }
}
