use anyhow::Result;
use clap::{Parser, Subcommand};
use knot::areas::repository::Repository;

#[derive(Parser)]
#[command(
    name = "knot",
    version = "0.1.0",
    about = "A simple version control system",
    long_about = "Knot is a small version control system built on a \
    content-addressable object store. It tracks snapshots of a directory tree, \
    supports branching and merging, and keeps its whole state in a .knot \
    directory at the repository root.",
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
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at \
        the specified path, creating the .knot state directory, the root commit and the master branch."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Stage files for addition",
        long_about = "This command stages the given files for the next commit. \
        A directory stages every file underneath it; paths with a hidden component are ignored."
    )]
    Add {
        #[arg(required = true, help = "The paths to stage")]
        paths: Vec<String>,
    },
    #[command(name = "remove", about = "Stage files for removal")]
    Remove {
        #[arg(required = true, help = "The paths to stage for removal")]
        paths: Vec<String>,
    },
    #[command(name = "unstage", about = "Pull paths back out of the staging area")]
    Unstage {
        #[arg(required = true, help = "The paths to unstage")]
        paths: Vec<String>,
    },
    #[command(name = "empty", about = "Clear the staging area")]
    Empty,
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit from the staging area on top of the \
        current HEAD. With --amend it replaces the HEAD commit's message instead, keeping \
        its snapshot and lineage."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(short, long, help = "Reword the HEAD commit instead of committing the staging area")]
        amend: bool,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(name = "log", about = "Show commit history")]
    Log,
    #[command(
        name = "checkout",
        about = "Detach HEAD at the specified revision",
        long_about = "This command moves HEAD to the given revision and rewrites the working \
        directory to match it. HEAD ends up detached even when the revision names a branch; \
        use switch to stay on a branch."
    )]
    Checkout {
        #[arg(index = 1, help = "The revision to check out")]
        revision: String,
    },
    #[command(name = "switch", about = "Switch to a branch")]
    Switch {
        #[arg(index = 1, help = "The branch to switch to")]
        branch: String,
        #[arg(short, long, help = "Create the branch at HEAD first")]
        create: bool,
    },
    #[command(
        name = "branch",
        about = "List, create or delete branches",
        long_about = "Without arguments this command lists all branches. With a name it creates \
        the branch at HEAD and attaches HEAD to it. With -d it deletes the named branch, \
        refusing to delete the branch HEAD is attached to."
    )]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: Option<String>,
        #[arg(short, long, help = "Delete the named branch")]
        delete: bool,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into HEAD",
        long_about = "This command three-way merges the named branch into HEAD using the merge \
        base of their first-parent chains. Conflicting files are stored with both versions \
        concatenated; no interactive resolution takes place."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
        #[arg(
            short,
            long,
            default_value = "Merge commit",
            help = "The merge commit message"
        )]
        message: String,
    },
    #[command(
        name = "revert",
        about = "Restore an earlier snapshot as a new commit",
        long_about = "This command rewrites the working directory to match the given revision \
        and records the restored snapshot as a new commit on top of HEAD, so history only \
        moves forward."
    )]
    Revert {
        #[arg(index = 1, help = "The revision to restore")]
        revision: String,
        #[arg(short, long, help = "The revert commit message")]
        message: Option<String>,
    },
    #[command(
        name = "reset",
        about = "Move the current ref to the specified revision",
        long_about = "This command rewrites the working directory to match the given revision, \
        moves the current branch (or a detached HEAD) to it and clears the staging area."
    )]
    Reset {
        #[arg(index = 1, help = "The revision to reset to")]
        revision: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => open_repository()?,
            };

            repository.init()?
        }
        Commands::Add { paths } => open_repository()?.add(paths)?,
        Commands::Remove { paths } => open_repository()?.remove(paths)?,
        Commands::Unstage { paths } => open_repository()?.unstage(paths)?,
        Commands::Empty => open_repository()?.empty()?,
        Commands::Commit { message, amend } => open_repository()?.commit(message, *amend)?,
        Commands::Status => open_repository()?.status()?,
        Commands::Log => open_repository()?.log()?,
        Commands::Checkout { revision } => open_repository()?.checkout(revision)?,
        Commands::Switch { branch, create } => open_repository()?.switch(branch, *create)?,
        Commands::Branch { name, delete } => open_repository()?.branch(name.as_deref(), *delete)?,
        Commands::Merge { branch, message } => open_repository()?.merge(branch, message)?,
        Commands::Revert { revision, message } => {
            open_repository()?.revert(revision, message.as_deref())?
        }
        Commands::Reset { revision } => open_repository()?.reset(revision)?,
    }

    Ok(())
}

/// Open the repository rooted at the current working directory.
fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;

    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))
}
