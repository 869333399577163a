/// A slash command the bot understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Menu,
    Backlog,
    /// `title` is trimmed and may be empty.
    Movie { title: String },
}

impl Command {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Backlog => "backlog",
            Self::Movie { .. } => "movie",
        }
    }

    /// Parses `/name[@bot] [args]`.
    ///
    /// Returns `None` for text that is not a known command or that is
    /// addressed to a different bot.
    #[must_use]
    pub fn parse(text: &str, bot_username: &str) -> Option<Self> {
        let rest = text.strip_prefix('/')?;
        let (head, args) = rest
            .split_once(char::is_whitespace)
            .unwrap_or((rest, ""));

        let name = match head.split_once('@') {
            Some((name, addressee)) => {
                if !addressee.eq_ignore_ascii_case(bot_username) {
                    return None;
                }
                name
            }
            None => head,
        };

        match name {
            "menu" => Some(Self::Menu),
            "backlog" => Some(Self::Backlog),
            "movie" => Some(Self::Movie {
                title: args.trim().to_string(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT: &str = "CineBot";

    #[test]
    fn parses_plain_commands() {
        assert_eq!(Command::parse("/menu", BOT), Some(Command::Menu));
        assert_eq!(Command::parse("/backlog", BOT), Some(Command::Backlog));
    }

    #[test]
    fn movie_title_is_trimmed() {
        assert_eq!(
            Command::parse("/movie   The Matrix  ", BOT),
            Some(Command::Movie {
                title: "The Matrix".to_string()
            })
        );
    }

    #[test]
    fn strips_own_bot_suffix() {
        assert_eq!(
            Command::parse("/movie@CineBot Inception", BOT),
            Some(Command::Movie {
                title: "Inception".to_string()
            })
        );
        assert_eq!(Command::parse("/menu@cinebot", BOT), Some(Command::Menu));
    }

    #[test]
    fn empty_title_after_suffix() {
        assert_eq!(
            Command::parse("/movie@CineBot   ", BOT),
            Some(Command::Movie {
                title: String::new()
            })
        );
    }

    #[test]
    fn title_may_follow_a_newline() {
        assert_eq!(
            Command::parse("/movie\nAlien", BOT),
            Some(Command::Movie {
                title: "Alien".to_string()
            })
        );
    }

    #[test]
    fn ignores_other_bots_and_unknown_commands() {
        assert_eq!(Command::parse("/menu@OtherBot", BOT), None);
        assert_eq!(Command::parse("/start", BOT), None);
        assert_eq!(Command::parse("/movies Alien", BOT), None);
        assert_eq!(Command::parse("menu", BOT), None);
    }
}
