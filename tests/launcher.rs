use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use awu::config::paths::config_root_from;
use awu::config::{AppPaths, Settings, profile};
use awu::error::AppError;
use awu::launcher::{
    self, Environment, KillSweep, LaunchPlan, LaunchRequest, Launcher, ProcessEvent, Stream,
};

fn env_of(vars: &[(&str, &str)]) -> Environment {
    vars.iter()
        .map(|(key, value)| (OsString::from(key), OsString::from(value)))
        .collect()
}

fn workspace(profile_text: &str) -> (tempfile::TempDir, AppPaths) {
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = AppPaths::new(dir.path().join("config"), dir.path().join("home"));
    paths.ensure().expect("create layout");
    fs::create_dir_all(paths.home_dir()).expect("create home");
    fs::write(paths.profile_file("game.toml"), profile_text).expect("write profile");
    (dir, paths)
}

fn shell_plan(script: &str, dir: &Path) -> LaunchPlan {
    LaunchPlan {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        current_dir: dir.to_path_buf(),
        env: launcher::env::inherited(),
    }
}

async fn collect(mut process: launcher::RunningProcess) -> Vec<ProcessEvent> {
    let mut events = Vec::new();
    while let Some(event) = process.next_event().await {
        events.push(event);
    }
    events
}

fn output_of(events: &[ProcessEvent], wanted: Stream) -> String {
    events
        .iter()
        .filter_map(|event| match event {
            ProcessEvent::Output { stream, text } if *stream == wanted => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn exit_of(events: &[ProcessEvent]) -> launcher::ExitReport {
    events
        .iter()
        .find_map(|event| match event {
            ProcessEvent::Exited(report) => Some(*report),
            _ => None,
        })
        .expect("exit event")
}

#[test]
fn environment_keeps_unrelated_variables_for_any_config_root() {
    let inherited = env_of(&[
        ("HOME", "/home/u"),
        ("LANG", "C.UTF-8"),
        ("PATH", "/usr/bin"),
        ("DXVK_HUD", "fps"),
    ]);

    for xdg in [Some("/xdg"), None] {
        let mut vars = inherited.clone();
        if let Some(xdg) = xdg {
            vars.insert("XDG_CONFIG_HOME".into(), xdg.into());
        }
        let root = config_root_from(|key| vars.get(&OsString::from(key)).cloned())
            .expect("config root");
        let paths = AppPaths::new(root, PathBuf::from("/home/u"));

        let env = launcher::build_environment(vars.clone(), Path::new("/pfx"), &paths.bin_dir());
        for (key, value) in &vars {
            if key != "PATH" && key != "WINEPREFIX" {
                assert_eq!(env.get(key), Some(value));
            }
        }

        let expected_path = match xdg {
            Some(_) => "/usr/bin:/xdg/.local/bin",
            None => "/usr/bin:/home/u/.config/.local/bin",
        };
        assert_eq!(env.get(&OsString::from("PATH")), Some(&OsString::from(expected_path)));
    }
}

#[test]
fn blank_command_text_runs_umu_run_with_config() {
    let (_dir, paths) = workspace("name = \"Game\"\nprefix = \"/games/pfx\"\nawu_args = \"none\"\n");
    let launcher = Launcher::new(&paths, &Settings::default());

    let request = LaunchRequest {
        profile_file: "game.toml".to_string(),
        command_text: String::new(),
    };
    let plan = launcher
        .game_plan(&request, env_of(&[("PATH", "/usr/bin"), ("USER", "u")]))
        .expect("plan");

    assert_eq!(plan.program, "umu-run");
    assert_eq!(plan.args, ["--config", "game.toml"]);
    assert_eq!(plan.current_dir, paths.profiles_dir());
    assert_eq!(
        plan.env.get(&OsString::from("WINEPREFIX")),
        Some(&OsString::from("/games/pfx"))
    );
    assert_eq!(plan.env.get(&OsString::from("USER")), Some(&OsString::from("u")));
}

#[test]
fn profile_args_precede_config_suffix() {
    let (_dir, paths) =
        workspace("name = \"Game\"\nprefix = \"/games/pfx\"\nawu_args = \"-skipIntro\"\n");
    let launcher = Launcher::new(&paths, &Settings::default());
    let args = profile::read_args(&paths.profile_file("game.toml")).expect("args");

    let request = LaunchRequest {
        profile_file: "game.toml".to_string(),
        command_text: format!("gamemoderun {}", args.command_text()),
    };
    let plan = launcher.game_plan(&request, Environment::new()).expect("plan");

    assert_eq!(plan.program, "gamemoderun");
    assert_eq!(plan.args, ["-skipIntro", "umu-run", "--config", "game.toml"]);
}

#[test]
fn configured_launcher_replaces_umu_run() {
    let (_dir, paths) = workspace("name = \"Game\"\nprefix = \"/games/pfx\"\n");
    let settings = Settings {
        launcher: Some("/opt/umu/umu-run".to_string()),
        shell: None,
    };
    let launcher = Launcher::new(&paths, &settings);

    let request = LaunchRequest {
        profile_file: "game.toml".to_string(),
        command_text: "mangohud".to_string(),
    };
    let plan = launcher.game_plan(&request, Environment::new()).expect("plan");
    assert_eq!(plan.args, ["/opt/umu/umu-run", "--config", "game.toml"]);
}

#[test]
fn launch_without_prefix_fails() {
    let (_dir, paths) = workspace("name = \"Game\"\n");
    let launcher = Launcher::new(&paths, &Settings::default());

    let request = LaunchRequest {
        profile_file: "game.toml".to_string(),
        command_text: String::new(),
    };
    let err = launcher
        .game_plan(&request, Environment::new())
        .expect_err("prefix is required");
    assert!(matches!(err, AppError::FieldMissing { .. }));
}

#[test]
fn task_runs_from_home_with_prefix_only() {
    let (_dir, paths) = workspace("name = \"Game\"\nprefix = \"/games/pfx\"\n");
    let launcher = Launcher::new(&paths, &Settings::default());

    let plan = launcher
        .task_plan("winecfg", "game.toml", env_of(&[("PATH", "/usr/bin")]))
        .expect("plan")
        .expect("profile selected");
    assert_eq!(plan.program, "winecfg");
    assert!(plan.args.is_empty());
    assert_eq!(plan.current_dir, paths.home_dir());
    assert_eq!(plan.env.get(&OsString::from("PATH")), Some(&OsString::from("/usr/bin")));
    assert_eq!(
        plan.env.get(&OsString::from("WINEPREFIX")),
        Some(&OsString::from("/games/pfx"))
    );
}

#[test]
fn task_without_selection_is_a_no_op() {
    let (_dir, paths) = workspace("name = \"Game\"\n");
    let launcher = Launcher::new(&paths, &Settings::default());

    let plan = launcher.task_plan("winecfg", "", Environment::new()).expect("no error");
    assert!(plan.is_none());
}

#[tokio::test]
async fn streams_cleaned_stdout_then_exit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = shell_plan(r#"printf '\033[32m"ready"\033[0m\n'"#, dir.path());

    let events = collect(launcher::process::spawn(&plan).expect("spawn")).await;
    assert_eq!(output_of(&events, Stream::Stdout), "ready");
    assert!(matches!(events.last(), Some(ProcessEvent::Exited(_))));

    let report = exit_of(&events);
    assert!(report.normal());
    assert!(report.success());
}

#[tokio::test]
async fn escape_split_across_writes_is_removed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = shell_plan(
        r"printf '\033[3'; sleep 0.2; printf '1mred\033[0m\n'; printf 'caf\303'; sleep 0.2; printf '\251\n'",
        dir.path(),
    );

    let events = collect(launcher::process::spawn(&plan).expect("spawn")).await;
    assert_eq!(output_of(&events, Stream::Stdout), "red\ncafé");
}

#[tokio::test]
async fn reports_stderr_and_exit_code() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = shell_plan("echo oops >&2; exit 3", dir.path());

    let events = collect(launcher::process::spawn(&plan).expect("spawn")).await;
    assert_eq!(output_of(&events, Stream::Stderr), "oops");
    assert_eq!(output_of(&events, Stream::Stdout), "");
    assert_eq!(exit_of(&events).code, Some(3));
}

#[tokio::test]
async fn signal_termination_is_abnormal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = shell_plan("kill -9 $$", dir.path());

    let report = launcher::process::spawn(&plan)
        .expect("spawn")
        .wait()
        .await
        .expect("exit report");
    assert!(!report.normal());
    assert_eq!(report.code, None);
    assert_eq!(report.signal, Some(9));
}

#[tokio::test]
async fn child_sees_derived_environment() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut plan = shell_plan("printf '%s' \"$WINEPREFIX\"", dir.path());
    plan.env = launcher::env::with_prefix(plan.env, Path::new("/games/pfx"));

    let events = collect(launcher::process::spawn(&plan).expect("spawn")).await;
    assert_eq!(output_of(&events, Stream::Stdout), "/games/pfx");
}

#[tokio::test]
async fn missing_program_is_a_spawn_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = LaunchPlan {
        program: "/nonexistent/awu-test-binary".to_string(),
        args: Vec::new(),
        current_dir: dir.path().to_path_buf(),
        env: Environment::new(),
    };

    let err = launcher::process::spawn(&plan).expect_err("spawn should fail");
    assert!(matches!(err, AppError::Spawn { .. }));
}

#[tokio::test]
async fn run_task_waits_for_exit() {
    let (_dir, paths) = workspace("name = \"Game\"\nprefix = \"/games/pfx\"\n");
    let launcher = Launcher::new(&paths, &Settings::default());

    let process = launcher
        .run_task("true", "game.toml")
        .expect("start")
        .expect("profile selected");
    let report = process.wait().await.expect("exit report");
    assert_eq!(report.code, Some(0));
}

#[tokio::test]
async fn sweep_with_nothing_to_kill_succeeds() {
    let sweep = KillSweep::with_script(
        "sh",
        "ls -l /proc/*/exe 2>/dev/null | grep -E 'awu-no-such-process' | xargs -n 1 echo",
    );
    let report = sweep.run().await.expect("sweep completes");
    assert_eq!(report.status, Some(0));
}

#[tokio::test]
async fn sweep_failure_status_is_not_an_error() {
    let report = KillSweep::with_script("sh", "exit 1")
        .run()
        .await
        .expect("sweep completes");
    assert_eq!(report.status, Some(1));
}

#[tokio::test]
async fn sweep_without_shell_fails() {
    let err = KillSweep::with_script("/nonexistent/awu-shell", "true")
        .run()
        .await
        .expect_err("shell is missing");
    assert!(matches!(err, AppError::KillSweep(_)));
}
