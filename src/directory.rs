use crate::common::{Participant, Presence};

/// Read-only lookup of chat participants by id.
pub trait UserDirectory {
    fn lookup(&self, id: &str) -> Option<Participant>;

    /// Everyone the current user can pick as a recipient, in display order.
    fn participants(&self) -> Vec<Participant>;
}

/// The three demo contacts.
#[derive(Debug, Clone)]
pub struct DemoDirectory {
    users: Vec<Participant>,
}

impl Default for DemoDirectory {
    fn default() -> Self {
        Self {
            users: vec![
                Participant::new("bob", "Bob Smith", Presence::Online),
                Participant::new("charlie", "Charlie Brown", Presence::Away),
                Participant::new("diana", "Diana Prince", Presence::Offline),
            ],
        }
    }
}

impl DemoDirectory {
    pub fn new(users: Vec<Participant>) -> Self {
        Self { users }
    }
}

impl UserDirectory for DemoDirectory {
    fn lookup(&self, id: &str) -> Option<Participant> {
        self.users.iter().find(|user| user.id == id).cloned()
    }

    fn participants(&self) -> Vec<Participant> {
        self.users.clone()
    }
}
