use anyhow::Result;
use clap::{Parser, Subcommand};
use gil::areas::repository::Repository;
use gil::commands::porcelain::log::LogOptions;

#[derive(Parser)]
#[command(
    name = "gil",
    version = "0.1.0",
    about = "A minimal content-addressable snapshot store",
    long_about = "gil records directory trees as immutable, hash-identified objects \
    and links successive snapshots into a history. It is a learning-sized take on \
    the plumbing layer of a version-control system, not a git replacement.",
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
        long_about = "Creates the .gil skeleton (object store, refs, HEAD) in the current \
        directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "commit",
        about = "Record the working tree as a new snapshot",
        long_about = "Hashes the whole working tree and, if anything changed since the \
        current head, stores a new commit and advances the reference."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the snapshot history, newest first")]
    Log {
        #[arg(long, help = "One line per commit")]
        oneline: bool,
    },
    #[command(
        name = "graph",
        about = "Export the object graph as Graphviz DOT",
        long_about = "Walks every object reachable from HEAD and prints the graph in the \
        Graphviz DOT language; pipe it into `dot -Tsvg` to render."
    )]
    Graph,
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "Prints the stored object for the given id. Abbreviated ids are \
        accepted as long as they are unambiguous."
    )]
    CatFile {
        #[arg(index = 1, help = "The object id (full or abbreviated)")]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
                }
            };

            repository.init()?
        }
        Commands::Commit { message } => {
            discover()?.commit(message.as_str())?;
        }
        Commands::Log { oneline } => {
            discover()?.log(&LogOptions { oneline: *oneline })?;
        }
        Commands::Graph => {
            discover()?.graph()?;
        }
        Commands::CatFile { sha } => {
            discover()?.cat_file(sha)?;
        }
        Commands::HashObject { write, file } => {
            // the argument is relative to the invocation directory, while
            // discovery may walk up to an ancestor; pin it down before the
            // workspace resolves it against the repository root
            let file = std::fs::canonicalize(file)?;
            discover()?.hash_object(&file.to_string_lossy(), *write)?;
        }
    }

    Ok(())
}

fn discover() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::discover(&pwd, Box::new(std::io::stdout()))
}
