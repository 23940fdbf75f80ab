use std::io::{BufRead, IsTerminal, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vfs_shell::{ExecResult, Session, ShellOptions};

#[derive(Parser)]
#[command(name = "vfs-shell")]
#[command(about = "Shell commands over an in-memory filesystem")]
#[command(version)]
struct Cli {
    /// Execute commands from the command line argument, one per line
    #[arg(short = 'c')]
    script: Option<String>,

    /// Output results as JSON (stdout, stderr, exitCode)
    #[arg(long = "json")]
    json: bool,

    /// TOML file with session options
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Initial working directory, created if missing
    #[arg(long = "cwd")]
    cwd: Option<String>,

    /// Log filter, e.g. `debug` or `vfs_shell=trace`. Defaults to RUST_LOG, then `warn`
    #[arg(long = "log-level")]
    log_level: Option<String>,

    /// Script file to execute
    #[arg()]
    script_file: Option<PathBuf>,
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(cli: &Cli) -> Result<ShellOptions> {
    let mut options = match &cli.config {
        Some(path) => ShellOptions::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ShellOptions::default(),
    };
    if cli.cwd.is_some() {
        options.cwd = cli.cwd.clone();
    }
    Ok(options)
}

fn emit(result: &ExecResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(result)?);
        return Ok(());
    }
    if !result.stdout.is_empty() {
        print!("{}", result.stdout);
    }
    if !result.stderr.is_empty() {
        eprint!("{}", result.stderr);
    }
    Ok(())
}

/// Read-eval loop for a terminal. Returns the last exit status.
fn interactive(session: &mut Session) -> Result<i32> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("vfs:{}$ ", session.cwd_path());
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line.context("reading from terminal")?;
        match line.trim() {
            "" => continue,
            "exit" => break,
            "clear" => {
                print!("\x1b[2J\x1b[H");
                continue;
            }
            _ => {}
        }
        emit(&session.exec(&line), false)?;
    }
    Ok(session.last_exit_code())
}

fn run(cli: Cli) -> Result<i32> {
    let mut session = Session::new(load_options(&cli)?);

    let script = if let Some(s) = cli.script {
        s
    } else if let Some(file) = &cli.script_file {
        std::fs::read_to_string(file)
            .with_context(|| format!("cannot read script file {}", file.display()))?
    } else if std::io::stdin().is_terminal() {
        return interactive(&mut session);
    } else {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading script from stdin")?;
        buf
    };

    let result = session.exec_script(&script);
    emit(&result, cli.json)?;
    Ok(result.exit_code)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    std::process::exit(code);
}
