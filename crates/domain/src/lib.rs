mod command;
mod reminder;
mod shared;

pub use command::{parse_voice_command, VoiceCommand};
pub use reminder::{ReminderRecord, RepeatPolicy};
pub use shared::entity::{Entity, ID};
