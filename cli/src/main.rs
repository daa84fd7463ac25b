use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;
use argh::FromArgs;
use wasmcalc::{exports, Backend, Operation, Signature, WasmerBackend, WasmiBackend};

#[derive(FromArgs)]
#[argh(description = "Inspect and call compiled calculator modules.")]
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Call(CallArgs),
    Exports(ExportsArgs),
}

#[derive(FromArgs)]
#[argh(
    subcommand,
    name = "call",
    description = "call an export of a calculator module",
    example = "{command_name} calculator.wasm add 2 3",
    example = "{command_name} calculator.wasm multiply -b wasmer -- -1.5 inf",
    note = "Negative operands have to come after `--`."
)]
struct CallArgs {
    #[argh(positional)]
    path: PathBuf,
    #[argh(positional)]
    operation: Operation,
    #[argh(positional)]
    operands: Vec<String>,
    #[argh(
        option,
        short = 'b',
        default = "BackendKind::Wasmi",
        description = "webassembly runtime to use (wasmi or wasmer)"
    )]
    backend: BackendKind,
    #[argh(
        switch,
        short = 'p',
        description = "load a module written by WasmerBackend::serialize; \
                       only pass files you produced yourself, they are run as native code"
    )]
    precompiled: bool,
}

#[derive(FromArgs)]
#[argh(
    subcommand,
    name = "exports",
    description = "list the function exports of a module and check them against the calculator interface"
)]
struct ExportsArgs {
    #[argh(positional)]
    path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackendKind {
    Wasmi,
    Wasmer,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wasmi" => Ok(Self::Wasmi),
            "wasmer" => Ok(Self::Wasmer),
            _ => Err(format!("unknown backend '{s}', expected wasmi or wasmer")),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wasmi => f.write_str("wasmi"),
            Self::Wasmer => f.write_str("wasmer"),
        }
    }
}

fn load(args: &CallArgs, bytes: &[u8]) -> anyhow::Result<Box<dyn Backend>> {
    let backend: Box<dyn Backend> = match (args.backend, args.precompiled) {
        // SAFETY: the user vouches for the file with `-p`, see its help text
        (BackendKind::Wasmer, true) => Box::new(unsafe { WasmerBackend::precompiled(bytes)? }),
        (BackendKind::Wasmer, false) => Box::new(WasmerBackend::new(bytes)?),
        (BackendKind::Wasmi, false) => Box::new(WasmiBackend::from_bytes(bytes)?),
        (BackendKind::Wasmi, true) => {
            anyhow::bail!("precompiled modules are only supported by the wasmer backend")
        }
    };

    Ok(backend)
}

fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read module {}", path.display()))
}

fn call(args: CallArgs) -> anyhow::Result<()> {
    let bytes = read(&args.path)?;

    log::info!(
        "loading {} ({} bytes) with {}",
        args.path.display(),
        bytes.len(),
        args.backend
    );

    let mut backend = load(&args, &bytes)
        .with_context(|| format!("failed to load module {}", args.path.display()))?;

    let value = args.operation.call(&mut backend, &args.operands)?;
    println!("{value}");

    Ok(())
}

/// One line per function export, then a line per missing calculator export.
fn report(signatures: &[Signature]) -> Vec<String> {
    let mut lines: Vec<String> = signatures
        .iter()
        .map(|sig| match Signature::expected(&sig.name) {
            Some(expected) if expected != *sig => format!("{sig}  (expected {expected})"),
            _ => sig.to_string(),
        })
        .collect();

    for name in exports::ALL {
        if !signatures.iter().any(|sig| sig.name == name) {
            let kind = if exports::REQUIRED.contains(&name) {
                "required"
            } else {
                "optional"
            };
            lines.push(format!("missing {kind} export `{name}`"));
        }
    }

    lines
}

fn list_exports(args: ExportsArgs) -> anyhow::Result<()> {
    let bytes = read(&args.path)?;
    let signatures = wasmcalc::export_signatures(&bytes)
        .with_context(|| format!("failed to parse module {}", args.path.display()))?;

    log::debug!("{} function export(s)", signatures.len());

    for line in report(&signatures) {
        println!("{line}");
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    pretty_env_logger::init();

    match args.command {
        Command::Call(args) => call(args),
        Command::Exports(args) => list_exports(args),
    }
}
