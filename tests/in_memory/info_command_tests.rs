//! `/info` replies for both subjects.

use super::helpers::{BotHarness, interaction, name};
use chrono::{TimeZone, Utc};
use landau::bot::commands::SEA_GREEN;
use landau::command::{
    domain::{CommandInteraction, GuildId, GuildSummary, InteractionError, RemoteCommandId},
    ports::{CommandHandler, CommandHandlerError},
};
use rstest::{fixture, rstest};

#[fixture]
fn bot() -> BotHarness {
    BotHarness::new(&[])
}

fn guild() -> GuildSummary {
    GuildSummary {
        id: GuildId::new(7),
        name: "Kata Club".to_owned(),
        owner_id: 42,
        member_count: 128,
        premium_tier: 2,
        premium_subscription_count: 5,
        joined_at: Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).single(),
    }
}

fn info(subject: &str) -> CommandInteraction {
    interaction(RemoteCommandId::new(1), "info", 5, &[("subject", subject)])
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn server_subject_describes_the_guild(bot: BotHarness) {
    let handler = bot
        .catalog
        .find(&name("info"))
        .expect("info should be declared")
        .handler();

    let reply = handler
        .handle(&info("server").with_guild(guild()))
        .await
        .expect("server info should render");

    let embed = reply.embed_content().expect("info replies with an embed");
    assert_eq!(embed.title, "Server Information: Kata Club");
    assert_eq!(embed.colour, SEA_GREEN);
    let fields: Vec<(&str, &str)> = embed
        .fields
        .iter()
        .map(|field| (field.name.as_str(), field.value.as_str()))
        .collect();
    assert_eq!(
        fields,
        vec![
            (":crown: Owner", "<@42>"),
            (":people_hugging: Members", "128"),
            (":rocket: Server Boost", "Level: 2\nBoosts: 5"),
            (":birthday: Birthday", "Birthday: 2021-06-01"),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bot_subject_describes_the_bot(bot: BotHarness) {
    let handler = bot
        .catalog
        .find(&name("info"))
        .expect("info should be declared")
        .handler();

    let reply = handler
        .handle(&info("bot"))
        .await
        .expect("bot info should render");

    let embed = reply.embed_content().expect("info replies with an embed");
    assert_eq!(embed.title, "Bot Information");
    let fields: Vec<(&str, &str)> = embed
        .fields
        .iter()
        .map(|field| (field.name.as_str(), field.value.as_str()))
        .collect();
    assert_eq!(
        fields,
        vec![
            (":pushpin: Version", env!("CARGO_PKG_VERSION")),
            (
                ":bookmark: Library",
                "[Serenity](https://github.com/serenity-rs/serenity)"
            ),
            (":triangular_flag_on_post: Language", "Rust"),
            (
                ":gear: Performance",
                "Memory usage: 64.00 / 512.00 MB\nCPU load: 1.25% (2 cores available)"
            ),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn server_subject_outside_a_guild_warns_privately(bot: BotHarness) {
    let handler = bot
        .catalog
        .find(&name("info"))
        .expect("info should be declared")
        .handler();

    let reply = handler
        .handle(&info("server"))
        .await
        .expect("reply should render");

    assert!(reply.is_ephemeral());
    assert_eq!(
        reply.content(),
        Some(":warning: This subject is only available in a server")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_subject_is_rejected(bot: BotHarness) {
    let handler = bot
        .catalog
        .find(&name("info"))
        .expect("info should be declared")
        .handler();

    let result = handler.handle(&info("weather")).await;

    assert!(matches!(
        result,
        Err(CommandHandlerError::Interaction(InteractionError::UnknownChoice { .. }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_subject_is_rejected(bot: BotHarness) {
    let handler = bot
        .catalog
        .find(&name("info"))
        .expect("info should be declared")
        .handler();

    let result = handler
        .handle(&CommandInteraction::new(RemoteCommandId::new(1), "info", 5))
        .await;

    assert!(matches!(
        result,
        Err(CommandHandlerError::Interaction(InteractionError::MissingOption(option)))
            if option == "subject"
    ));
}
