use crate::relay::Reply;
use anyhow::Result;
use irc::client::Sender;

/// Send a relay reply as a `PRIVMSG`, even when its text is empty.
pub fn send_reply(sender: &Sender, reply: &Reply) -> Result<()> {
    // No CTCP injection in outbound messages
    let clean = reply.text.replace('\x01', "");
    sender.send_privmsg(&reply.target, &clean)?;
    Ok(())
}

pub fn send_quit(sender: &Sender, message: &str) {
    let _ = sender.send_quit(message);
}
