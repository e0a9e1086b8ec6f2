use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use toybox_core::{DomainError, ToyId, ValueObject};
use toybox_events::{Command, CommandHandler, Event};

/// Color tag carried by every toy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Immutable toy value: current attributes of one toy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toy {
    pub name: String,
    pub color: Color,
}

impl Toy {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

impl ValueObject for Toy {}

/// Command: AddToy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToy {
    pub toy_id: ToyId,
    pub toy: Toy,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveToy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveToy {
    pub toy_id: ToyId,
    pub occurred_at: DateTime<Utc>,
}

/// Sealed set of toybox commands: exhaustive dispatch is compiler-enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToyCommand {
    AddToy(AddToy),
    RemoveToy(RemoveToy),
}

impl Command for ToyCommand {}

/// Event: ToyAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToyAdded {
    pub toy_id: ToyId,
    pub toy: Toy,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ToyRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToyRemoved {
    pub toy_id: ToyId,
    pub occurred_at: DateTime<Utc>,
}

/// Sealed set of toybox events. Once appended, facts - never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToyEvent {
    ToyAdded(ToyAdded),
    ToyRemoved(ToyRemoved),
}

impl ToyEvent {
    pub fn toy_id(&self) -> ToyId {
        match self {
            ToyEvent::ToyAdded(e) => e.toy_id,
            ToyEvent::ToyRemoved(e) => e.toy_id,
        }
    }
}

impl Event for ToyEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ToyEvent::ToyAdded(_) => "toybox.toy.added",
            ToyEvent::ToyRemoved(_) => "toybox.toy.removed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ToyEvent::ToyAdded(e) => e.occurred_at,
            ToyEvent::ToyRemoved(e) => e.occurred_at,
        }
    }
}

/// Stateless decision logic for toybox commands.
///
/// Decisions are made purely from the command's data; no aggregate state
/// is consulted. In particular:
///
/// - adding the same id twice produces two `ToyAdded` events (the
///   current-toys projection resolves that last-write-wins)
/// - removing an unknown or already-removed id still produces a
///   `ToyRemoved` event (the log records the intent; the projection
///   update is a no-op)
#[derive(Debug, Default, Clone, Copy)]
pub struct ToyDecider;

impl ToyDecider {
    pub fn new() -> Self {
        Self
    }

    fn decide_add(&self, cmd: AddToy) -> Result<Vec<ToyEvent>, DomainError> {
        if cmd.toy.name.trim().is_empty() {
            return Err(DomainError::validation("toy name cannot be empty"));
        }
        Ok(vec![ToyEvent::ToyAdded(ToyAdded {
            toy_id: cmd.toy_id,
            toy: cmd.toy,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn decide_remove(&self, cmd: RemoveToy) -> Result<Vec<ToyEvent>, DomainError> {
        Ok(vec![ToyEvent::ToyRemoved(ToyRemoved {
            toy_id: cmd.toy_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

impl CommandHandler for ToyDecider {
    type Cmd = ToyCommand;
    type Ev = ToyEvent;
    type Error = DomainError;

    fn handle(&self, command: ToyCommand) -> Result<Vec<ToyEvent>, DomainError> {
        match command {
            ToyCommand::AddToy(cmd) => self.decide_add(cmd),
            ToyCommand::RemoveToy(cmd) => self.decide_remove(cmd),
        }
    }
}
