//! Reply text rendering.
//!
//! Replies are rendered from named `minijinja` templates. Every template sees
//! an `emoji` global mapping short names to platform emoji literals and a
//! `mention` filter turning a user id into a mention.

use minijinja::{Environment, Value};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Emoji literals used in replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emoji {
    /// `:bookmark:`
    Bookmark,
    /// `:triangular_flag_on_post:`
    TriangularFlag,
    /// `:pushpin:`
    Pushpin,
    /// `:crown:`
    Crown,
    /// `:birthday:`
    Birthday,
    /// `:people_hugging:`
    PeopleHugging,
    /// `:gear:`
    Gear,
    /// `:rocket:`
    Rocket,
    /// `:x:`
    Cross,
    /// `:white_check_mark:`
    CheckMark,
    /// `:warning:`
    Warning,
}

impl Emoji {
    /// Every emoji, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Bookmark,
        Self::TriangularFlag,
        Self::Pushpin,
        Self::Crown,
        Self::Birthday,
        Self::PeopleHugging,
        Self::Gear,
        Self::Rocket,
        Self::Cross,
        Self::CheckMark,
        Self::Warning,
    ];

    /// Returns the platform short name without colons.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Bookmark => "bookmark",
            Self::TriangularFlag => "triangular_flag_on_post",
            Self::Pushpin => "pushpin",
            Self::Crown => "crown",
            Self::Birthday => "birthday",
            Self::PeopleHugging => "people_hugging",
            Self::Gear => "gear",
            Self::Rocket => "rocket",
            Self::Cross => "x",
            Self::CheckMark => "white_check_mark",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}:", self.short_name())
    }
}

/// Returns the mention literal for a user.
#[must_use]
pub fn mention(user_id: u64) -> String {
    format!("<@{user_id}>")
}

/// Errors raised while preparing or rendering reply templates.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A template failed to compile.
    #[error("template '{name}' is invalid: {source}")]
    Compile {
        /// Template name.
        name: &'static str,
        /// Underlying template error.
        source: minijinja::Error,
    },
    /// A template failed to render.
    #[error("failed to render template '{name}': {source}")]
    Render {
        /// Template name.
        name: String,
        /// Underlying template error.
        source: minijinja::Error,
    },
}

const TEMPLATES: [(&str, &str); 18] = [
    ("info.bot.title", "Bot Information"),
    ("info.bot.version", "{{ emoji.pushpin }} Version"),
    ("info.bot.library", "{{ emoji.bookmark }} Library"),
    ("info.bot.language", "{{ emoji.triangular_flag_on_post }} Language"),
    ("info.bot.performance", "{{ emoji.gear }} Performance"),
    (
        "info.bot.performance_value",
        "Memory usage: {{ used }} / {{ total }} MB\nCPU load: {{ cpu }}% ({{ cores }} cores available)",
    ),
    ("info.server.title", "Server Information: {{ name }}"),
    ("info.server.owner", "{{ emoji.crown }} Owner"),
    ("info.server.owner_value", "{{ owner_id | mention }}"),
    ("info.server.members", "{{ emoji.people_hugging }} Members"),
    ("info.server.boost", "{{ emoji.rocket }} Server Boost"),
    ("info.server.boost_value", "Level: {{ level }}\nBoosts: {{ boosts }}"),
    ("info.server.birthday", "{{ emoji.birthday }} Birthday"),
    (
        "info.server.outside_guild",
        "{{ emoji.warning }} This subject is only available in a server",
    ),
    ("connect.already_connected", "{{ emoji.warning }} You are already connected"),
    ("connect.identifier_taken", "{{ emoji.warning }} Identifier is already taken"),
    ("connect.connected", "{{ emoji.white_check_mark }} Successfully connected"),
    (
        "connect.invalid_identifier",
        "{{ emoji.x }} Not a valid identifier. Does not exist.",
    ),
];

/// Compiled reply templates.
#[derive(Debug)]
pub struct ReplyTemplates {
    environment: Environment<'static>,
}

impl ReplyTemplates {
    /// Compiles every reply template.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Compile`] when a template does not parse.
    pub fn new() -> Result<Self, RenderError> {
        let mut environment = Environment::new();
        let emoji: BTreeMap<&'static str, String> = Emoji::ALL
            .into_iter()
            .map(|emoji| (emoji.short_name(), emoji.to_string()))
            .collect();
        environment.add_global("emoji", Value::from_serialize(&emoji));
        environment.add_filter("mention", mention);
        for (name, source) in TEMPLATES {
            environment
                .add_template(name, source)
                .map_err(|source_error| RenderError::Compile {
                    name,
                    source: source_error,
                })?;
        }
        Ok(Self { environment })
    }

    /// Renders a named template.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Render`] when the template is unknown or
    /// rendering fails.
    pub fn render(&self, name: &str, context: impl Serialize) -> Result<String, RenderError> {
        self.environment
            .get_template(name)
            .and_then(|template| template.render(context))
            .map_err(|source| RenderError::Render {
                name: name.to_owned(),
                source,
            })
    }

    /// Renders a template that needs no context.
    ///
    /// # Errors
    ///
    /// See [`Self::render`].
    pub fn render_plain(&self, name: &str) -> Result<String, RenderError> {
        self.render(name, minijinja::context! {})
    }
}
