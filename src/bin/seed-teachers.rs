//! Register teacher accounts so they can manage announcements.
//!
//! Usage: seed-teachers --username mrodriguez,mchen [--display-name "Ms. Rodriguez"]
//!   --username      : comma separated usernames (required)
//!   --display-name  : display name applied to every listed username (optional)

use anyhow::Context;
use clap::Parser;

use school_announcements::{
    config::split_list,
    db::{self, PgTeacherDirectory},
};

#[derive(Parser)]
#[command(name = "seed-teachers", about = "Insert or update teacher records")]
struct Args {
    /// Comma separated usernames
    #[arg(long)]
    username: String,

    /// Display name for the listed teachers
    #[arg(long)]
    display_name: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let usernames = split_list(&args.username);
    if usernames.is_empty() {
        anyhow::bail!("--username must name at least one teacher");
    }

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL required")?;
    let pool = db::create_pool(&database_url, 2)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&pool).await?;

    let directory = PgTeacherDirectory::new(pool);
    for username in &usernames {
        directory
            .upsert(username, args.display_name.as_deref())
            .await
            .with_context(|| format!("Failed to upsert teacher {username}"))?;
        tracing::info!("Teacher registered: {}", username);
    }

    tracing::info!("Seeded {} teacher(s)", usernames.len());
    Ok(())
}
