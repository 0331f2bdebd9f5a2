use clap::Parser;
use rollcall_storage_sqlite::SqliteRepositoryProvider;
use rollcall_core::RepositoryProvider;

/// Command line interface for Rollcall
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database connection string
    #[arg(long)]
    db_url: String,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(clap::Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Print version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => {
            println!("Running migrations...");
            let storage = SqliteRepositoryProvider::connect(&cli.db_url)
                .await
                .unwrap();
            storage.migrate().await.unwrap();
        }
        Commands::Version => {
            println!("Rollcall v{}", env!("CARGO_PKG_VERSION"));
        }
    }
}
