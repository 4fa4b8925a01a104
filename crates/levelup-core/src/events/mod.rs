//! Domain events

mod leveling_event;

pub use leveling_event::{
    ConfigUpdatedEvent, GuildDisabledEvent, GuildEnabledEvent, LevelUpEvent, LevelingEvent,
    MemberDeactivatedEvent, ProgressResetEvent, XpAwardedEvent,
};
