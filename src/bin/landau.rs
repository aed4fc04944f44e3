//! Landau bot entry point.
//!
//! Loads configuration, prepares the database, synchronizes the declared
//! commands with the platform and then listens for interactions until Ctrl+C
//! or SIGTERM.

use clap::Parser;
use eyre::{Result, WrapErr};
use mockable::DefaultClock;
use serenity::all::{Client, GatewayIntents};
use serenity::http::Http;
use std::sync::Arc;
use tracing::{info, warn};

use landau::bot::{
    LandauHandler,
    commands::{self, BotIdentity, ConnectCommand, InfoCommand},
    performance::SystemMonitor,
    render::ReplyTemplates,
};
use landau::command::{
    adapters::{DiscordCommandGateway, postgres::PostgresCommandRegistry},
    services::{CommandSynchronizer, InteractionDispatcher},
};
use landau::config::{ConfigLoader, parse_define};
use landau::connect::{
    adapters::{CodewarsClient, postgres::PostgresConnectionRepository},
    domain::Service,
    services::ConnectService,
};
use landau::{db, telemetry};

/// Command line interface.
#[derive(Debug, Parser)]
#[command(author, version, about = "Landau chat bot", long_about = None)]
struct Cli {
    /// Bot token.
    #[arg(short = 't', long, env = "BOT_TOKEN", hide_env_values = true)]
    token: String,

    /// Configuration profile layered over the base file.
    #[arg(short = 'c', long = "config", env = "CONFIG_PROFILE")]
    profile: Option<String>,

    /// Configuration override as `key=value`; may be repeated.
    #[arg(short = 'D', value_name = "KEY=VALUE", value_parser = parse_define)]
    defines: Vec<(String, String)>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init().wrap_err("failed to initialise tracing")?;

    let config = cli
        .defines
        .iter()
        .fold(
            ConfigLoader::from_process_env().with_profile(cli.profile.clone()),
            |loader, (key, value)| loader.with_override(key.as_str(), value.as_str()),
        )
        .load()
        .wrap_err("failed to load configuration")?;
    let commands_config = Arc::new(config.commands_config()?);
    let gateway_timeout = config.bot.gateway_timeout();

    let pool = db::build_pool(&config.database)
        .await
        .wrap_err("failed to connect to the database")?;
    db::bootstrap_schema(&pool).await?;

    let http = Arc::new(Http::new(&cli.token));
    let application = http
        .get_current_application_info()
        .await
        .wrap_err("failed to look up the application")?;
    http.set_application_id(application.id);
    info!(application = %application.name, "Started {}", application.name);

    let templates = Arc::new(ReplyTemplates::new()?);
    let connect_service = ConnectService::new(
        Arc::new(PostgresConnectionRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    )
    .with_validator(
        Service::Codewars,
        Arc::new(CodewarsClient::new(gateway_timeout)?),
    );
    let catalog = commands::catalog(
        InfoCommand::new(
            BotIdentity::new(application.name.as_str()),
            Arc::clone(&templates),
            Arc::new(SystemMonitor::new()),
        ),
        ConnectCommand::new(Arc::new(connect_service), templates),
    )
    .wrap_err("invalid command declaration")?;

    let synchronizer = CommandSynchronizer::new(
        Arc::new(PostgresCommandRegistry::new(pool)),
        Arc::new(DiscordCommandGateway::new(Arc::clone(&http))),
        commands_config,
    )
    .with_call_timeout(gateway_timeout);
    let report = synchronizer.synchronize(&catalog.descriptors()).await;
    if report.failed() > 0 {
        warn!(
            failed = report.failed(),
            "some commands could not be synchronized; they stay inactive until the next start"
        );
    }
    let dispatcher = Arc::new(InteractionDispatcher::from_report(&catalog, &report));
    info!(routes = dispatcher.len(), "listening for interactions");

    let mut client = Client::builder(&cli.token, GatewayIntents::GUILDS)
        .event_handler(LandauHandler::new(dispatcher))
        .await
        .wrap_err("failed to build the gateway client")?;

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        wait_for_shutdown().await;
        info!("shutdown signal received");
        shard_manager.shutdown_all().await;
    });

    client.start().await.wrap_err("gateway connection failed")?;
    info!("stopped");
    Ok(())
}

async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                warn!(error = %err, "SIGTERM handler unavailable, waiting for Ctrl+C");
                wait_for_ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Ctrl+C handler unavailable");
    }
}
