use super::message::ChatMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }
}

/// Kinds of events the transport can deliver to a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InboundEventKind {
    Connect,
    Disconnect,
    ChatMessage,
    UserList,
    Typing,
}

impl InboundEventKind {
    /// Every kind ChatView listens to.
    pub const ALL: [InboundEventKind; 5] = [
        Self::Connect,
        Self::Disconnect,
        Self::ChatMessage,
        Self::UserList,
        Self::Typing,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Connected,
    Disconnected,
    ChatMessage(ChatMessage),
    UserList(Vec<String>),
    Typing(String),
}

impl InboundEvent {
    pub fn kind(&self) -> InboundEventKind {
        match self {
            Self::Connected => InboundEventKind::Connect,
            Self::Disconnected => InboundEventKind::Disconnect,
            Self::ChatMessage(_) => InboundEventKind::ChatMessage,
            Self::UserList(_) => InboundEventKind::UserList,
            Self::Typing(_) => InboundEventKind::Typing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    SetUsername(String),
    ChatMessage(ChatMessage),
    Typing(String),
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetUsername(_) => "set-username",
            Self::ChatMessage(_) => "chat-message",
            Self::Typing(_) => "typing",
        }
    }
}
