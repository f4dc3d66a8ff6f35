//! Build automation tasks for the seg7-mux project.
//!
//! Run with: `cargo xtask <command>`

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::{Command, ExitCode};

/// Raspberry Pi Pico 1 (RP2040, Cortex-M0+).
const FIRMWARE_TARGET: &str = "thumbv6m-none-eabi";
const FIRMWARE_FEATURES: &str = "pico1,arm";
const DEMOS: [&str; 1] = ["counter"];
const TRACED_SOURCES: [&str; 1] = ["src/scanner.rs"];
const TRACE_GATE: &str = r#"#[cfg(feature = "display-trace")]"#;
/// defmt levels, least severe first.
const DEFMT_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for seg7-mux project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: host tests, firmware library and demos, docs
    CheckAll,
    /// Run unit, integration and doc tests on the host
    Test {
        /// Check that display-trace logging survives DEFMT_LOG and type-check it
        /// instead of running tests
        #[arg(long)]
        trace: bool,
    },
    /// Build the library for the firmware target
    Build,
    /// Build a demo
    Example {
        /// Demo name (e.g., counter)
        name: String,
    },
    /// Build UF2 firmware file for flashing to Pico
    Uf2 {
        /// Demo name (e.g., counter)
        name: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let succeeded = match cli.command {
        Commands::CheckAll => check_all(),
        Commands::Test { trace } => host_tests(trace),
        Commands::Build => build_lib(),
        Commands::Example { name } => build_example(&name, false),
        Commands::Uf2 { name } => build_uf2(&name),
    };
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn check_all() -> bool {
    if !host_tests(false) {
        return false;
    }

    println!("\n{}", "==> Checking display-trace log levels...".cyan());
    if !check_trace_levels()
        || !run_command(
            Command::new("cargo")
                .current_dir(workspace_root())
                .args(["test", "--package", "xtask"]),
        )
    {
        return false;
    }

    println!("\n{}", "==> Building library for firmware target...".cyan());
    if !build_lib() {
        return false;
    }

    println!("\n{}", "==> Building demos...".cyan());
    for demo in DEMOS {
        println!("  {}", format!("- {demo}").bright_black());
        if !build_example(demo, false) {
            return false;
        }
    }

    println!("\n{}", "==> Building documentation...".cyan());
    if !run_command(Command::new("cargo").current_dir(workspace_root()).args([
        "doc",
        "--target",
        FIRMWARE_TARGET,
        "--no-deps",
        "--features",
        FIRMWARE_FEATURES,
        "--no-default-features",
    ])) {
        return false;
    }

    println!("\n{}", "==> All checks passed! 🎉".green().bold());
    true
}

fn host_tests(trace: bool) -> bool {
    println!("{}", "==> Running host tests...".cyan());
    let host_target = host_target();
    match host_target.as_deref() {
        Some(target) => {
            println!(
                "  {}",
                format!("Using host target: {target}").bright_black()
            );
        }
        None => {
            println!(
                "{}",
                "  Unable to detect host target; relying on cargo default.".bright_black()
            );
        }
    }

    if trace && !check_trace_levels() {
        return false;
    }

    let mut test_cmd = Command::new("cargo");
    test_cmd.current_dir(workspace_root());
    // defmt needs a global logger that only firmware links, so tracing builds are
    // type-checked on the host rather than run.
    if trace {
        test_cmd.args(["check", "--package", "seg7-mux", "--lib", "--features", "display-trace"]);
    } else {
        test_cmd.args(["test", "--package", "seg7-mux"]);
    }
    test_cmd.arg("--no-default-features");

    if let Some(target) = host_target {
        test_cmd.arg("--target").arg(target);
    }

    run_command(&mut test_cmd)
}

/// Fails when a `display-trace` log call is below the `DEFMT_LOG` level, since
/// defmt compiles such calls out.
fn check_trace_levels() -> bool {
    let root = workspace_root();
    let config = std::fs::read_to_string(root.join(".cargo/config.toml")).unwrap_or_default();
    let level = configured_defmt_level(&config, "seg7_mux");
    println!(
        "  {}",
        format!("DEFMT_LOG level for seg7_mux: {level}").bright_black()
    );

    let mut gated = 0;
    let mut filtered = Vec::new();
    for path in TRACED_SOURCES {
        let source = match std::fs::read_to_string(root.join(path)) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("{}", format!("Failed to read {path}: {e}").red());
                return false;
            }
        };
        let calls = gated_log_calls(&source);
        gated += calls.len();
        filtered.extend(
            calls
                .into_iter()
                .filter(|(_, macro_level)| !is_enabled(macro_level, level))
                .map(|(line, macro_level)| format!("{path}:{line}: {macro_level}!")),
        );
    }

    if gated == 0 {
        eprintln!("{}", "No display-trace log calls found".red());
        return false;
    }
    if !filtered.is_empty() {
        eprintln!(
            "{}",
            format!("display-trace calls below DEFMT_LOG={level} are compiled out:").red()
        );
        for call in filtered {
            eprintln!("  {call}");
        }
        return false;
    }
    true
}

/// The level `DEFMT_LOG` in `.cargo/config.toml` sets for `krate`. A crate entry
/// (`seg7_mux=trace`) wins over a bare level. defmt logs only errors when unset.
fn configured_defmt_level<'a>(config: &'a str, krate: &str) -> &'a str {
    let Some(filter) = config.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        (key.trim() == "DEFMT_LOG").then(|| value.trim().trim_matches('"'))
    }) else {
        return "error";
    };

    let mut level = "error";
    for entry in filter.split(',').map(str::trim) {
        match entry.split_once('=') {
            Some((name, crate_level)) if name == krate => return crate_level,
            Some(_) => {}
            None => level = entry,
        }
    }
    level
}

/// Each `display-trace` gated defmt call in `source` as (line number, level).
fn gated_log_calls(source: &str) -> Vec<(usize, &str)> {
    let mut calls = Vec::new();
    let mut gate_open = false;
    for (index, line) in source.lines().enumerate() {
        let line = line.trim();
        if gate_open {
            if let Some((name, _)) = line.split_once("!(") {
                if DEFMT_LEVELS.contains(&name) {
                    calls.push((index + 1, name));
                }
            }
        }
        gate_open = line == TRACE_GATE;
    }
    calls
}

fn is_enabled(macro_level: &str, configured: &str) -> bool {
    let rank = |level: &str| DEFMT_LEVELS.iter().position(|&known| known == level);
    match (rank(macro_level), rank(configured)) {
        (Some(macro_rank), Some(configured_rank)) => macro_rank >= configured_rank,
        // "off" or an unknown level disables everything.
        _ => false,
    }
}

fn build_lib() -> bool {
    println!(
        "{}",
        format!("Building library with features: {FIRMWARE_FEATURES}").cyan()
    );

    if run_command(Command::new("cargo").current_dir(workspace_root()).args([
        "build",
        "--lib",
        "--target",
        FIRMWARE_TARGET,
        "--features",
        FIRMWARE_FEATURES,
        "--no-default-features",
    ])) {
        println!("{}", "Build successful! ✨".green());
        true
    } else {
        false
    }
}

fn build_example(name: &str, release: bool) -> bool {
    println!(
        "{}",
        format!("Building demo '{name}' with features: {FIRMWARE_FEATURES}").cyan()
    );

    let mut cmd = Command::new("cargo");
    cmd.current_dir(workspace_root()).args([
        "build",
        "--example",
        name,
        "--target",
        FIRMWARE_TARGET,
        "--features",
        FIRMWARE_FEATURES,
        "--no-default-features",
    ]);
    if release {
        cmd.arg("--release");
    }

    let succeeded = run_command(&mut cmd);
    if succeeded {
        println!("{}", "Build successful! ✨".green());
    }
    succeeded
}

fn build_uf2(name: &str) -> bool {
    println!(
        "{}",
        format!("Building UF2 for demo '{name}'").cyan()
    );
    println!("  Target: {}", FIRMWARE_TARGET.bright_black());

    // Build in release mode for UF2
    if !build_example(name, true) {
        return false;
    }

    // Convert to UF2 using elf2uf2-rs
    let elf_path = format!("target/{FIRMWARE_TARGET}/release/examples/{name}");
    let uf2_path = format!("{name}.uf2");

    println!("\n{}", "Converting to UF2 format...".cyan());

    if run_command(
        Command::new("elf2uf2-rs")
            .current_dir(workspace_root())
            .args([&elf_path, &uf2_path]),
    ) {
        println!("{}", format!("UF2 created: {uf2_path} 🚀").green().bold());
        println!("{}", "Ready to drag-and-drop to your Pico!".bright_black());
        true
    } else {
        println!(
            "{}",
            "Note: Install elf2uf2-rs with: cargo install elf2uf2-rs".yellow()
        );
        false
    }
}

fn workspace_root() -> std::path::PathBuf {
    // `cargo xtask` runs from the workspace root
    std::env::current_dir().expect("Failed to get current directory")
}

fn host_target() -> Option<String> {
    let output = Command::new("rustc").arg("-vV").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        if let Some(host) = line.strip_prefix("host: ") {
            return Some(host.trim().to_string());
        }
    }
    None
}

fn run_command(cmd: &mut Command) -> bool {
    match cmd.status() {
        Ok(status) => status.success(),
        Err(e) => {
            eprintln!("{}", format!("Failed to execute command: {e}").red());
            false
        }
    }
}
