//! Start-up flow: synchronize, build the dispatcher, route interactions.

use super::helpers::{BotHarness, interaction, name};
use landau::command::domain::{CommandScope, CommandsConfig, GuildId, RemoteCommandId};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn synchronized_commands_are_routed_to_their_handlers() {
    let bot = BotHarness::new(&[]);
    let report = bot.synchronize(CommandsConfig::new()).await;
    let dispatcher = bot.dispatcher(&report);

    let info_id = report
        .scope(CommandScope::Global)
        .and_then(|scope| scope.remote_id(&name("info")))
        .expect("info should be registered globally");
    let reply = dispatcher
        .dispatch(&interaction(info_id, "info", 5, &[("subject", "bot")]))
        .await
        .expect("dispatch should succeed")
        .expect("info should be routed");

    let embed = reply.embed_content().expect("info replies with an embed");
    assert_eq!(embed.title, "Bot Information");
    assert!(
        embed
            .fields
            .iter()
            .any(|field| field.name == ":pushpin: Version"
                && field.value == env!("CARGO_PKG_VERSION"))
    );
    assert_eq!(dispatcher.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn guild_registrations_get_their_own_routes() {
    let bot = BotHarness::new(&[]);
    let guild = CommandScope::Guild(GuildId::new(7));
    let report = bot
        .synchronize(CommandsConfig::new().with_guild(GuildId::new(7), "info", true))
        .await;
    let dispatcher = bot.dispatcher(&report);

    let global_id = report
        .scope(CommandScope::Global)
        .and_then(|scope| scope.remote_id(&name("info")))
        .expect("info should be registered globally");
    let guild_id = report
        .scope(guild)
        .and_then(|scope| scope.remote_id(&name("info")))
        .expect("info should be registered in guild 7");

    assert_ne!(global_id, guild_id);
    assert!(dispatcher.routes(global_id));
    assert!(dispatcher.routes(guild_id));
    assert_eq!(
        report.scope(guild).map(|scope| scope.active().len()),
        Some(1)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_command_ids_are_dropped() {
    let bot = BotHarness::new(&[]);
    let report = bot.synchronize(CommandsConfig::new()).await;
    let dispatcher = bot.dispatcher(&report);

    let outcome = dispatcher
        .dispatch(&interaction(RemoteCommandId::new(1), "ghost", 5, &[]))
        .await
        .expect("unknown ids are not an error");

    assert!(outcome.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn connect_is_answered_through_the_dispatcher() {
    let bot = BotHarness::new(&["alice"]);
    let report = bot.synchronize(CommandsConfig::new()).await;
    let dispatcher = bot.dispatcher(&report);
    let connect_id = report
        .scope(CommandScope::Global)
        .and_then(|scope| scope.remote_id(&name("connect")))
        .expect("connect should be registered globally");
    let request = interaction(
        connect_id,
        "connect",
        5,
        &[("service", "CODEWARS"), ("identifier", "alice")],
    );

    let first = dispatcher
        .dispatch(&request)
        .await
        .expect("dispatch should succeed")
        .expect("connect should be routed");
    let second = dispatcher
        .dispatch(&request)
        .await
        .expect("dispatch should succeed")
        .expect("connect should be routed");

    assert_eq!(first.content(), Some(":white_check_mark: Successfully connected"));
    assert_eq!(second.content(), Some(":warning: You are already connected"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn restart_reuses_existing_registrations() {
    let bot = BotHarness::new(&[]);
    let first = bot.synchronize(CommandsConfig::new()).await;
    let mutations = bot
        .gateway
        .mutation_count()
        .expect("gateway state should be readable");

    let second = bot.synchronize(CommandsConfig::new()).await;

    assert_eq!(
        bot.gateway
            .mutation_count()
            .expect("gateway state should be readable"),
        mutations
    );
    assert_eq!(
        first.active().collect::<Vec<_>>(),
        second.active().collect::<Vec<_>>()
    );
}
