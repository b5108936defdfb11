use irc::client::prelude::{Command, Message, Prefix};

/// Where a message arrived, which decides how the reply is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Medium {
    Private,
    Channel(String),
}

impl Medium {
    /// Reply target for a message sent by `origin` on this medium.
    pub fn reply_target<'a>(&'a self, origin: &'a str) -> &'a str {
        match self {
            Medium::Private => origin,
            Medium::Channel(channel) => channel,
        }
    }
}

/// A message addressed to the bot or posted in one of its channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// Nickname of the sender.
    pub origin: String,
    pub medium: Medium,
    pub raw_text: String,
}

impl InboundEvent {
    pub fn private(origin: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            medium: Medium::Private,
            raw_text: raw_text.into(),
        }
    }

    pub fn channel(
        origin: impl Into<String>,
        channel: impl Into<String>,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            medium: Medium::Channel(channel.into()),
            raw_text: raw_text.into(),
        }
    }

    /// Build an event from a raw IRC message.
    ///
    /// Only user `PRIVMSG`s qualify. CTCP requests are left to the IRC
    /// client, which answers VERSION and PING on its own.
    pub fn from_message(message: &Message) -> Option<Self> {
        let origin = match &message.prefix {
            Some(Prefix::Nickname(nick, _, _)) if !nick.is_empty() => nick.clone(),
            _ => return None,
        };

        let Command::PRIVMSG(target, text) = &message.command else {
            return None;
        };

        if text.starts_with('\x01') {
            return None;
        }

        if is_channel_name(target) {
            Some(Self::channel(origin, target.clone(), text.clone()))
        } else {
            Some(Self::private(origin, text.clone()))
        }
    }
}

fn is_channel_name(target: &str) -> bool {
    target.starts_with(['#', '&', '+', '!'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Message {
        line.parse().unwrap()
    }

    #[test]
    fn test_channel_privmsg() {
        let msg = parse(":alice!a@example.org PRIVMSG #chaos-darmstadt :Fallblatt: hi\r\n");
        let event = InboundEvent::from_message(&msg).unwrap();
        assert_eq!(event, InboundEvent::channel("alice", "#chaos-darmstadt", "Fallblatt: hi"));
        assert_eq!(event.medium.reply_target(&event.origin), "#chaos-darmstadt");
    }

    #[test]
    fn test_private_privmsg() {
        let msg = parse(":alice!a@example.org PRIVMSG FallblattAnzeige :hello\r\n");
        let event = InboundEvent::from_message(&msg).unwrap();
        assert_eq!(event, InboundEvent::private("alice", "hello"));
        assert_eq!(event.medium.reply_target(&event.origin), "alice");
    }

    #[test]
    fn test_ignores_non_privmsg_and_ctcp() {
        assert!(InboundEvent::from_message(&parse(":alice!a@h NOTICE #c :fallblatt\r\n")).is_none());
        assert!(InboundEvent::from_message(&parse(":alice!a@h JOIN #c\r\n")).is_none());
        assert!(
            InboundEvent::from_message(&parse(":alice!a@h PRIVMSG bot :\x01VERSION\x01\r\n")).is_none()
        );
    }

    #[test]
    fn test_ignores_server_prefix() {
        let msg = parse(":irc.example.org PRIVMSG bot :hello\r\n");
        assert!(InboundEvent::from_message(&msg).is_none());
    }

    #[test]
    fn test_channel_prefixes() {
        assert!(is_channel_name("#a"));
        assert!(is_channel_name("&a"));
        assert!(is_channel_name("+a"));
        assert!(is_channel_name("!a"));
        assert!(!is_channel_name("alice"));
    }
}
