use crate::utils::error::{LabError, Result};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub from: String,
    pub text: String,
}

/// A colleague. Knows its name and what it has received, nothing about the
/// other users.
#[derive(Debug)]
pub struct User {
    name: String,
    inbox: Vec<ReceivedMessage>,
}

impl User {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inbox: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inbox(&self) -> &[ReceivedMessage] {
        &self.inbox
    }

    fn receive(&mut self, message: &str, sender_name: &str) {
        tracing::debug!("[{}] received from [{}]: '{}'", self.name, sender_name, message);
        self.inbox.push(ReceivedMessage {
            from: sender_name.to_string(),
            text: message.to_string(),
        });
    }
}

pub trait ChatMediator {
    /// Relays `message` from `sender` to the other participants and returns
    /// how many of them received it.
    fn send_message(&mut self, sender: UserId, message: &str) -> Result<usize>;
}

#[derive(Debug, Default)]
pub struct ChatRoom {
    users: Vec<User>,
}

impl ChatRoom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, name: impl Into<String>) -> UserId {
        let user = User::new(name);
        tracing::info!("ChatRoom: {} joined the room", user.name());
        self.users.push(user);
        UserId(self.users.len() - 1)
    }

    pub fn user(&self, id: UserId) -> Result<&User> {
        self.users
            .get(id.0)
            .ok_or_else(|| LabError::not_found("user", id.0.to_string()))
    }
}

impl ChatMediator for ChatRoom {
    fn send_message(&mut self, sender: UserId, message: &str) -> Result<usize> {
        let sender_name = self.user(sender)?.name().to_string();
        let mut delivered = 0;
        for (index, user) in self.users.iter_mut().enumerate() {
            if index != sender.0 {
                user.receive(message, &sender_name);
                delivered += 1;
            }
        }
        Ok(delivered)
    }
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    let mut room = ChatRoom::new();
    let ana = room.add_user("Ana");
    let beto = room.add_user("Beto");
    let carlos = room.add_user("Carlos");
    for id in [ana, beto, carlos] {
        writeln!(out, "ChatRoom: {} joined the room.", room.user(id)?.name())?;
    }

    writeln!(out, "\n--- The conversation starts ---")?;
    for (sender, text) in [(ana, "Hi everyone!"), (beto, "Hi Ana, how are you?")] {
        writeln!(out, "{} sends: '{}'", room.user(sender)?.name(), text)?;
        room.send_message(sender, text)?;
    }

    writeln!(out)?;
    for id in [ana, beto, carlos] {
        let user = room.user(id)?;
        for message in user.inbox() {
            writeln!(
                out,
                "[{}] received from [{}]: '{}'",
                user.name(),
                message.from,
                message.text
            )?;
        }
    }
    Ok(())
}
