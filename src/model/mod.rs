pub mod group;
pub mod message;
pub mod participant;

pub use group::GroupRecord;
pub use message::{ContentFlags, ConversationTarget, Direction, MessageRecord};
pub use participant::Participant;
