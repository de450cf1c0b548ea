use anyhow::Result;
use clap::{Parser, Subcommand};
use gitlet::areas::repository::Repository;
use gitlet::artifacts::core::PagerWriter;
use gitlet::artifacts::core::error::error_kind;
use gitlet::config::Config;
use is_terminal::IsTerminal;
use minus::Pager;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USER_ERROR_EXIT_CODE: u8 = 1;
const FATAL_EXIT_CODE: u8 = 2;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version-control system",
    long_about = "Gitlet snapshots a directory over time, moves between snapshots, \
    and branches and merges lines of history. Repository state lives in .gitlet.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create a repository in the current directory",
        long_about = "This command creates .gitlet with an initial commit on the master branch."
    )]
    Init,
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stages the current content of each file. \
        A directory, such as '.', stages every file below it."
    )]
    Add {
        #[arg(index = 1, required = true, num_args = 1.., help = "Files or directories to stage")]
        files: Vec<String>,
    },
    #[command(
        name = "rm",
        about = "Unstage a file or stop tracking it",
        long_about = "This command drops a staged addition, or deletes a tracked file and \
        stages its removal."
    )]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Record the staged changes",
        long_about = "This command records the active commit overlaid with the staged changes."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "log",
        about = "Show the history of the active branch",
        long_about = "This command shows the first-parent history of the active branch, newest first."
    )]
    Log,
    #[command(
        name = "global-log",
        about = "Show every commit reachable from any branch"
    )]
    GlobalLog,
    #[command(
        name = "find",
        about = "Print the ids of commits whose message contains a pattern"
    )]
    Find {
        #[arg(index = 1)]
        pattern: String,
    },
    #[command(
        name = "status",
        about = "Show branches, staged changes and working directory changes"
    )]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from the active commit, \
        checkout <commit> -- <file> restores it from another commit, \
        and checkout <branch> switches to a branch."
    )]
    Checkout {
        #[arg(help = "A branch name, or a commit id when files follow '--'")]
        target: Option<String>,
        #[arg(last = true, help = "The file to restore")]
        files: Vec<String>,
    },
    #[command(name = "branch", about = "Create a branch at the active commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Move the active branch and the working directory to a commit"
    )]
    Reset {
        #[arg(index = 1, help = "A full or abbreviated commit id")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the active branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file as a blob and optionally store it",
        long_about = "This command prints the blob id of a file and stores the blob when -w is given."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object store")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "cat-file", about = "Print the content of a stored object")]
    CatFile {
        #[arg(short = 'p', long, help = "The object id to print")]
        sha: String,
    },
}

impl Commands {
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load_from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("fatal: {error:#}");
            return ExitCode::from(FATAL_EXIT_CODE);
        }
    };

    init_tracing(&config.log_filter);
    colored::control::set_override(std::io::stdout().is_terminal());

    match run(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match error_kind(&error) {
            Some(kind) if kind.is_user_error() => {
                eprintln!("{kind}");
                ExitCode::from(USER_ERROR_EXIT_CODE)
            }
            _ => {
                eprintln!("fatal: {error:#}");
                ExitCode::from(FATAL_EXIT_CODE)
            }
        },
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands, config: Config) -> Result<()> {
    let pwd = std::env::current_dir()?;

    if command.is_paged() && !config.no_pager && std::io::stdout().is_terminal() {
        let pager = Pager::new();
        let repository = Repository::new(&pwd, Box::new(PagerWriter::new(pager.clone())))?
            .with_config(config);

        dispatch(&repository, command)?;
        minus::page_all(pager)?;

        return Ok(());
    }

    let repository = Repository::new(&pwd, Box::new(std::io::stdout()))?.with_config(config);
    dispatch(&repository, command)
}

fn dispatch(repository: &Repository, command: Commands) -> Result<()> {
    match command {
        Commands::Init => repository.init(),
        Commands::Add { files } => repository.add(&files),
        Commands::Rm { file } => repository.rm(&file),
        Commands::Commit { message } => repository.commit(&message),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { pattern } => repository.find(&pattern),
        Commands::Status => repository.status(),
        Commands::Checkout { target, files } => repository.checkout(target.as_deref(), &files),
        Commands::Branch { name } => repository.branch(&name),
        Commands::RmBranch { name } => repository.rm_branch(&name),
        Commands::Reset { commit } => repository.reset(&commit),
        Commands::Merge { branch } => repository.merge(&branch),
        Commands::HashObject { write, file } => repository.hash_object(&file, write).map(|_| ()),
        Commands::CatFile { sha } => repository.cat_file(&sha),
    }
}
