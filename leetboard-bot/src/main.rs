use std::env;
use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;
use sqlx::postgres::PgPoolOptions;

use leetboard_core::{Data, Error};
use leetboard_database::cache::DEFAULT_SNAPSHOT_CACHE_TTL;
use leetboard_database::{
    CacheService, DataSource, Origin, PostgresSource, SnapshotSource, SnapshotStore, SourceChain,
    SupabaseClient,
};

const SUPABASE_PROBE_ROWS: usize = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN")?;
    let guild_id = env::var("DISCORD_GUILD_ID")?.parse::<u64>()?;

    let cache = build_cache().await;
    let store = SnapshotStore::new(build_source_chain(cache).await?);

    let initial = store.reload(false).await;
    match initial.origin {
        Origin::Source(kind) => info!(
            source = %kind,
            records = initial.records.len(),
            "Leaderboard data loaded."
        ),
        Origin::Fallback => warn!("No data source produced records; starting with an empty leaderboard."),
    }

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: leetboard_commands::commands(),
            on_error: |error| Box::pin(on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(leetboard_utils::COMMAND_PREFIX.to_string()),
                mention_as_prefix: false,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            let store = store.clone();
            Box::pin(async move {
                info!("Leetboard is online.");

                poise::builtins::register_in_guild(
                    ctx,
                    &framework.options().commands,
                    serenity::GuildId::new(guild_id),
                )
                .await?;

                Ok(Data { store })
            })
        })
        .build();

    info!("Leetboard is connecting...");

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

async fn build_cache() -> CacheService {
    let redis_enabled = env_bool("REDIS_ENABLED", false);
    let redis_key_prefix =
        env::var("REDIS_KEY_PREFIX").unwrap_or_else(|_| "leetboard:prod".to_string());

    let cache = if redis_enabled {
        match env::var("REDIS_URL") {
            Ok(redis_url) => match CacheService::redis(&redis_url, redis_key_prefix.clone()) {
                Ok(cache) => {
                    info!(key_prefix = %redis_key_prefix, "Redis cache enabled.");
                    cache
                }
                Err(err) => {
                    warn!(?err, key_prefix = %redis_key_prefix, "Failed to initialize Redis cache; fetching sources directly.");
                    CacheService::disabled(redis_key_prefix.clone())
                }
            },
            Err(_) => {
                warn!(key_prefix = %redis_key_prefix, "REDIS_ENABLED=true but REDIS_URL is missing; fetching sources directly.");
                CacheService::disabled(redis_key_prefix.clone())
            }
        }
    } else {
        info!("Redis cache disabled (set REDIS_ENABLED=true to enable).");
        CacheService::disabled(redis_key_prefix.clone())
    };

    if cache.is_redis_enabled() {
        if let Err(err) = cache.ping().await {
            warn!(
                ?err,
                "Redis cache ping failed; cache operations will continue with fallback behavior."
            );
        } else {
            info!("Redis cache health check passed.");
        }
    }

    cache
}

/// Sources are tried in order: synced snapshot, Supabase REST, direct Postgres.
async fn build_source_chain(cache: CacheService) -> anyhow::Result<SourceChain> {
    let cache_ttl = env_u64(
        "SNAPSHOT_CACHE_TTL_SECONDS",
        DEFAULT_SNAPSHOT_CACHE_TTL.as_secs(),
    );
    let http_timeout = env_u64("HTTP_TIMEOUT_SECONDS", 15).max(1);
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(http_timeout))
        .build()?;

    let mut chain = SourceChain::new(cache).with_cache_ttl(Duration::from_secs(cache_ttl));
    info!(cache_ttl_seconds = cache_ttl, "Snapshot cache TTL configured.");

    match SnapshotSource::from_env_optional(&http) {
        Some(snapshot) => {
            info!(location = ?snapshot.location(), "Snapshot source enabled.");
            chain = chain.with_source(DataSource::Snapshot(snapshot));
        }
        None => info!("Snapshot source disabled (set SNAPSHOT_PATH or SNAPSHOT_URL to enable)."),
    }

    match SupabaseClient::from_env_optional()? {
        Some(client) => {
            match client.probe(SUPABASE_PROBE_ROWS).await {
                Ok(rows) => info!(table_url = client.table_url(), rows, "Supabase connection test passed."),
                Err(err) => warn!(
                    error = %format!("{err:#}"),
                    "Supabase connection test failed; keeping it in the chain."
                ),
            }
            chain = chain.with_source(DataSource::Supabase(client));
        }
        None => info!("Supabase source disabled (missing SUPABASE_URL/SUPABASE_ANON_KEY or SUPABASE_ENABLED=false)."),
    }

    match env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()) {
        Some(database_url) => match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(http_timeout))
            .connect(&database_url)
            .await
        {
            Ok(pool) => {
                let table = env::var("SUPABASE_TABLE")
                    .ok()
                    .filter(|table| !table.trim().is_empty());
                let source = match table {
                    Some(table) => PostgresSource::with_table(pool, table.trim())?,
                    None => PostgresSource::new(pool),
                };
                info!("PostgreSQL connection established.");
                chain = chain.with_source(DataSource::Postgres(source));
            }
            Err(err) => {
                warn!(?err, "Failed to connect to PostgreSQL; continuing without it.");
            }
        },
        None => info!("Postgres source disabled (set DATABASE_URL to enable)."),
    }

    if chain.sources().is_empty() {
        warn!("No data sources configured; the leaderboard will stay empty.");
    }

    Ok(chain)
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(error = %format!("{error:#}"), command = %ctx.command().qualified_name, "command error");

            let embed = serenity::CreateEmbed::new()
                .title("Command Error")
                .description("Something went wrong while running this command.")
                .color(leetboard_utils::embed::WARNING_EMBED_COLOR);

            let _ = ctx
                .send(poise::CreateReply::default().ephemeral(true).embed(embed))
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = format!(
                "Usage: `{}{}`",
                leetboard_utils::COMMAND_PREFIX,
                ctx.command().qualified_name
            );
            let description = if let Some(input) = input {
                format!("Invalid argument: `{}`\n{}", input, usage)
            } else {
                format!("Missing required argument.\n{}", usage)
            };

            let _ = ctx.say(description).await;
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            debug!("unknown command invocation");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}
