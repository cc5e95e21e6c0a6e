//! Command-line front end for the cmdwrap tool wrappers.
//!
//! Each subcommand builds one wrapper from `cmdwrap.toml` (or defaults) and
//! runs it once. Failures print the error chain and exit with
//! [`exit_codes::FAILED`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use cmdwrap::core::spec::InvocationSpec;
use cmdwrap::exit_codes;
use cmdwrap::io::config::{CONFIG_FILE, ToolConfig, load_config};
use cmdwrap::io::process::Invoker;
use cmdwrap::tools::git::SignMode;
use cmdwrap::tools::tar::Compression;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "cmdwrap",
    version,
    about = "Run archive and version-control tools with uniform error handling"
)]
struct Cli {
    /// Path to the tool configuration file.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Log every invocation at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an arbitrary program.
    Run {
        /// Join the command line and pass it to the configured shell.
        #[arg(long)]
        shell: bool,
        /// Exit with the program's own status instead of failing.
        #[arg(long)]
        lenient: bool,
        /// Directory to launch the program in.
        #[arg(long)]
        cwd: Option<PathBuf>,
        /// Extra environment variables, `KEY=VALUE`.
        #[arg(long = "env", value_parser = parse_env)]
        env: Vec<(String, String)>,
        /// Program followed by its arguments.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Copy a directory tree through a tar pipe and list the copied paths.
    Copy {
        src: PathBuf,
        dest: PathBuf,
        /// Tar exclude pattern; may be repeated.
        #[arg(long)]
        exclude: Vec<String>,
        /// Print the list as a JSON array.
        #[arg(long)]
        json: bool,
    },
    /// Unpack a tar archive into a directory.
    Unpack {
        archive: PathBuf,
        dir: PathBuf,
        #[arg(long)]
        exclude: Vec<String>,
    },
    /// Unpack a zip archive into a directory.
    Unzip { archive: PathBuf, dir: PathBuf },
    /// Extract a Debian source package with dpkg-source.
    Extract { dsc: PathBuf, dir: PathBuf },
    /// Add a changelog entry for a new version with dch.
    Dch {
        version: String,
        /// Changelog text; dch prompts for an entry when omitted.
        #[arg(long)]
        message: Option<String>,
    },
    /// Store or regenerate an upstream tarball with pristine-tar.
    #[command(subcommand)]
    PristineTar(PristineTarCommand),
    /// Remove a directory tree.
    Remove {
        path: PathBuf,
        /// Fail if the path does not exist.
        #[arg(long)]
        must_exist: bool,
    },
    /// Create an annotated git tag.
    Tag {
        version: String,
        /// Sign the tag with the default key.
        #[arg(long)]
        sign: bool,
        /// Sign with this key id (implies --sign).
        #[arg(long)]
        key: Option<String>,
        /// Message template; `{{ version }}` is substituted.
        #[arg(long)]
        message: Option<String>,
        /// Commit to tag instead of HEAD.
        #[arg(long)]
        commit: Option<String>,
        /// Repository directory.
        #[arg(long)]
        cwd: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum PristineTarCommand {
    /// Record `archive` on `branch`.
    Commit {
        archive: PathBuf,
        #[arg(long, default_value = "upstream")]
        branch: String,
    },
    /// Recreate `archive` from the pristine-tar branch.
    Checkout { archive: PathBuf },
}

fn main() {
    let cli = Cli::parse();
    cmdwrap::logging::init(cli.verbose);
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::FAILED);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let cfg = load_config(&cli.config)?;
    match cli.command {
        Command::Run {
            shell,
            lenient,
            cwd,
            env,
            command,
        } => cmd_run(&cfg, shell, lenient, cwd, env, command),
        Command::Copy {
            src,
            dest,
            exclude,
            json,
        } => cmd_copy(&cfg, &src, &dest, &exclude, json),
        Command::Unpack {
            archive,
            dir,
            exclude,
        } => {
            cfg.tar()
                .unpack(&archive, &dir, &exclude, &Compression::Auto)
                .invoke(&[] as &[&str])?;
            Ok(exit_codes::OK)
        }
        Command::Remove { path, must_exist } => {
            if must_exist && !path.exists() {
                return Err(anyhow!("{} does not exist", path.display()));
            }
            cfg.remove_tree(&path).invoke(&[] as &[&str])?;
            Ok(exit_codes::OK)
        }
        Command::Unzip { archive, dir } => {
            cfg.unzip(&archive, &dir).invoke(&[] as &[&str])?;
            Ok(exit_codes::OK)
        }
        Command::Extract { dsc, dir } => {
            cfg.dpkg_source().extract(&dsc, &dir)?;
            Ok(exit_codes::OK)
        }
        Command::Dch { version, message } => {
            cfg.dch(&version, message.as_deref())
                .invoke(&[] as &[&str])?;
            Ok(exit_codes::OK)
        }
        Command::PristineTar(action) => {
            let pristine_tar = cfg.pristine_tar()?;
            match action {
                PristineTarCommand::Commit { archive, branch } => {
                    pristine_tar.commit(&archive, &branch)?;
                }
                PristineTarCommand::Checkout { archive } => pristine_tar.checkout(&archive)?,
            }
            Ok(exit_codes::OK)
        }
        Command::Tag {
            version,
            sign,
            key,
            message,
            commit,
            cwd,
        } => {
            let git = match cwd {
                Some(dir) => cfg.git().in_dir(dir),
                None => cfg.git(),
            };
            let sign = SignMode::from_options(sign || key.is_some(), key);
            git.tag(sign)
                .create(&version, message.as_deref(), commit.as_deref())?;
            Ok(exit_codes::OK)
        }
    }
}

fn cmd_run(
    cfg: &ToolConfig,
    shell: bool,
    lenient: bool,
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
    command: Vec<String>,
) -> Result<i32> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| anyhow!("missing program"))?;
    let mut spec = InvocationSpec::new(program)
        .shell(shell)
        .shell_program(&cfg.shell);
    if let Some(dir) = cwd {
        spec = spec.current_dir(dir);
    }
    if !env.is_empty() {
        spec = spec.envs(env);
    }
    let invoker = Invoker::new(spec);

    if lenient {
        let outcome = invoker.run(args)?;
        debug!(exit_code = outcome.exit_code, "lenient run finished");
        return Ok(match outcome.signal {
            Some(sig) => exit_codes::SIGNAL_BASE + sig,
            None => outcome.exit_code,
        });
    }
    invoker.invoke(args)?;
    Ok(exit_codes::OK)
}

fn cmd_copy(cfg: &ToolConfig, src: &Path, dest: &Path, exclude: &[String], json: bool) -> Result<i32> {
    let files = cfg
        .tree_copy()
        .copy(src, Some(dest), exclude)
        .with_context(|| format!("copy {} to {}", src.display(), dest.display()))?;
    if json {
        let listed: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
        println!("{}", serde_json::to_string_pretty(&listed).context("serialize file list")?);
    } else {
        for file in &files {
            println!("{}", file.display());
        }
    }
    Ok(exit_codes::OK)
}

fn parse_env(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}
