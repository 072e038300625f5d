use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub(crate) enum DbCommands {
    /// Check that DATABASE_URL is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or the database call fails.
pub(crate) async fn run_db(command: DbCommands) -> anyhow::Result<()> {
    let pool = gurume_db::connect_pool_from_env().await?;
    match command {
        DbCommands::Ping => {
            gurume_db::ping(&pool).await?;
            println!("database reachable");
        }
        DbCommands::Migrate => {
            let applied = gurume_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
    }
    pool.close().await;
    Ok(())
}
