use std::env;
use std::path::{Path, PathBuf};

use argh::FromArgs;

type DynError = Box<dyn std::error::Error>;

#[derive(FromArgs, PartialEq, Debug)]
/// Development workflows for the linemark repository.
struct Args {
    #[argh(subcommand)]
    subcommand: SubCommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
enum SubCommand {
    Ci(CiArgs),
    Fuzz(FuzzArgs),
}

#[derive(FromArgs, PartialEq, Debug)]
/// Check formatting, lints, and tests the way CI does.
#[argh(subcommand, name = "ci")]
struct CiArgs {
    #[argh(switch)]
    /// apply formatting and clippy fixes instead of failing on them.
    fix: bool,
}

#[derive(FromArgs, PartialEq, Debug)]
/// Run every fuzz target against the reference oracle for a bounded time.
#[argh(subcommand, name = "fuzz")]
struct FuzzArgs {
    #[argh(option, default = "60")]
    /// seconds to spend on each target.
    seconds: u32,
}

// The fuzz crate's targets, each asserting chunked/reference equivalence.
const FUZZ_TARGETS: &[&str] = &["counts", "events"];

fn main() -> Result<(), DynError> {
    match argh::from_env::<Args>().subcommand {
        SubCommand::Ci(args) => ci(args.fix),
        SubCommand::Fuzz(args) => fuzz(args.seconds),
    }
}

fn ci(fix: bool) -> Result<(), DynError> {
    let cargo = cargo();
    let root = project_root();

    if fix {
        println!("xtask: formatting the workspace");
        duct::cmd!(&cargo, "fmt", "--all").dir(&root).run()?;
        println!("xtask: applying clippy suggestions");
        duct::cmd!(&cargo, "clippy", "--workspace", "--fix", "--allow-dirty").dir(&root).run()?;
    } else {
        println!("xtask: checking formatting");
        duct::cmd!(&cargo, "fmt", "--all", "--", "--check").dir(&root).run()?;
        println!("xtask: running clippy");
        duct::cmd!(&cargo, "clippy", "--workspace", "--", "--deny", "clippy::all")
            .dir(&root)
            .run()?;
    }

    println!("xtask: running the test suite");
    duct::cmd!(&cargo, "test", "--workspace").dir(&root).env("RUSTFLAGS", "-D warnings").run()?;

    println!("xtask: all checks passed");
    Ok(())
}

fn fuzz(seconds: u32) -> Result<(), DynError> {
    let root = project_root();
    let time_limit = format!("-max_total_time={seconds}");

    // cargo-fuzz needs a nightly toolchain; go through the rustup shim rather
    // than $CARGO so the `+nightly` selector works.
    for &target in FUZZ_TARGETS {
        println!("xtask: fuzzing `{target}` for {seconds}s");
        duct::cmd!("cargo", "+nightly", "fuzz", "run", target, "--", &time_limit)
            .dir(&root)
            .run()?;
    }

    println!("xtask: all targets completed without findings");
    Ok(())
}

// xtask lives one directory below the repository root.
fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).parent().unwrap().to_path_buf()
}

fn cargo() -> String {
    env::var("CARGO").unwrap_or_else(|_| "cargo".into())
}
