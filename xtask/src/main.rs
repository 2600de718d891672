//! Build automation tasks for the nixie-kit project.
//!
//! Run with: `cargo xtask <command>`

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::{Command, ExitCode};

/// The Pico 1 (RP2040) target the demo firmware is built for.
const PICO_TARGET: &str = "thumbv6m-none-eabi";
const DEMO_FEATURES: &str = "pico1,arm,defmt";
const DEMO_NAME: &str = "nixie_clock";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for the nixie-kit project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: host tests for both tube wirings, demo firmware, docs
    CheckAll,
    /// Run the host tests (unit, integration and doc tests)
    Test {
        #[arg(long, default_value = "z570m")]
        tubes: Tubes,
    },
    /// Build the demo firmware for the Pico
    Demo {
        #[arg(long, default_value = "z570m")]
        tubes: Tubes,
        #[arg(long)]
        release: bool,
    },
    /// Build a UF2 firmware file for drag-and-drop flashing
    Uf2 {
        #[arg(long, default_value = "z570m")]
        tubes: Tubes,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Tubes {
    /// Z570M, IN-16 and IN-17 wiring
    Z570m,
    /// IN-12 wiring
    In12,
}

impl std::fmt::Display for Tubes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tubes::Z570m => write!(f, "z570m"),
            Tubes::In12 => write!(f, "in12"),
        }
    }
}

impl Tubes {
    /// Extra Cargo features selecting this wiring, appended to `base`.
    fn features(self, base: &str) -> String {
        let mut features: Vec<&str> = base.split(',').filter(|f| !f.is_empty()).collect();
        if let Tubes::In12 = self {
            features.push("in12");
        }
        features.join(",")
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAll => check_all(),
        Commands::Test { tubes } => {
            if run_host_tests(tubes) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Demo { tubes, release } => {
            if build_demo(tubes, release) {
                println!("{}", "Build successful! ✨".green());
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Uf2 { tubes } => build_uf2(tubes),
    }
}

fn check_all() -> ExitCode {
    for tubes in [Tubes::Z570m, Tubes::In12] {
        println!("{}", format!("==> Host tests ({tubes})...").cyan());
        if !run_host_tests(tubes) {
            return ExitCode::FAILURE;
        }
    }

    for tubes in [Tubes::Z570m, Tubes::In12] {
        println!("\n{}", format!("==> Demo firmware ({tubes})...").cyan());
        if !build_demo(tubes, false) {
            return ExitCode::FAILURE;
        }
    }

    println!("\n{}", "==> Building documentation...".cyan());
    if !run_command(Command::new("cargo").current_dir(workspace_root()).args([
        "doc",
        "--lib",
        "--no-deps",
        "--features",
        "defmt",
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> All checks passed! 🎉".green().bold());
    ExitCode::SUCCESS
}

fn run_host_tests(tubes: Tubes) -> bool {
    let mut test_cmd = Command::new("cargo");
    test_cmd
        .current_dir(workspace_root())
        .args(["test", "--package", "nixie-kit"]);

    match host_target() {
        Some(target) => {
            println!(
                "  {}",
                format!("Using host target: {target}").bright_black()
            );
            test_cmd.arg("--target").arg(target);
        }
        None => {
            println!(
                "{}",
                "  Unable to detect host target; relying on cargo default.".bright_black()
            );
        }
    }

    let features = tubes.features("");
    if !features.is_empty() {
        test_cmd.args(["--features", &features]);
    }
    run_command(&mut test_cmd)
}

fn build_demo(tubes: Tubes, release: bool) -> bool {
    let features = tubes.features(DEMO_FEATURES);
    println!(
        "  {}",
        format!("Building '{DEMO_NAME}' with features: {features}").bright_black()
    );

    let mut build_cmd = Command::new("cargo");
    build_cmd.current_dir(workspace_root()).args([
        "build",
        "--example",
        DEMO_NAME,
        "--target",
        PICO_TARGET,
        "--features",
        &features,
    ]);
    if release {
        build_cmd.arg("--release");
    }
    run_command(&mut build_cmd)
}

fn build_uf2(tubes: Tubes) -> ExitCode {
    println!(
        "{}",
        format!("Building UF2 for '{DEMO_NAME}' ({tubes})").cyan()
    );
    println!("  Target: {}", PICO_TARGET.bright_black());

    if !build_demo(tubes, true) {
        return ExitCode::FAILURE;
    }

    let elf_path = format!("target/{PICO_TARGET}/release/examples/{DEMO_NAME}");
    let uf2_path = format!("{DEMO_NAME}.uf2");

    println!("\n{}", "Converting to UF2 format...".cyan());

    if run_command(
        Command::new("elf2uf2-rs")
            .current_dir(workspace_root())
            .args([&elf_path, &uf2_path]),
    ) {
        println!("{}", format!("UF2 created: {uf2_path} 🚀").green().bold());
        println!("{}", "Ready to drag-and-drop to your Pico!".bright_black());
        ExitCode::SUCCESS
    } else {
        println!(
            "{}",
            "Note: Install elf2uf2-rs with: cargo install elf2uf2-rs".yellow()
        );
        ExitCode::FAILURE
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
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("host: "))
        .map(|host| host.trim().to_string())
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
