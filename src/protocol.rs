pub use serde::{Serialize, Deserialize};

pub use self::host_events::*;
pub use self::replay_messages::*;

mod host_events {
    use super::*;

    /// A loaded image in the debugged process. Identity is positional, so two
    /// modules with the same name and base are still distinct entries.
    #[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
    pub struct Module {
        pub name: String,
        pub base: u64,
    }

    impl Module {
        pub fn new(name: impl Into<String>, base: u64) -> Self {
            Self { name: name.into(), base }
        }
    }

    /// Opaque handle to a host view (disassembly listing, chooser window, ...).
    #[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ViewId(pub u64);

    #[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
    pub struct KeyChord {
        pub key: char,
        #[serde(default)]
        pub modifiers: u32,
    }

    impl KeyChord {
        pub const fn plain(key: char) -> Self {
            Self { key, modifiers: 0 }
        }
    }

    #[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
    pub enum HistoryKind {
        #[default]
        Search,
    }

    /// Notification streams the core can subscribe to.
    #[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum HookPoint {
        Debugger,
        View,
    }

    #[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
    #[serde(tag = "event_type", content = "data")]
    pub enum HostEvent {
        ModuleLoaded { name: String, base: u64 },
        ModuleUnloaded { base: u64 },
        ViewActivated { view: ViewId },
        KeyPressed { view: ViewId, chord: KeyChord },
        RowActivated { title: String, index: usize },
    }

    impl HostEvent {
        pub fn hook_point(&self) -> Option<HookPoint> {
            match self {
                HostEvent::ModuleLoaded { .. } | HostEvent::ModuleUnloaded { .. } => Some(HookPoint::Debugger),
                HostEvent::ViewActivated { .. } | HostEvent::KeyPressed { .. } => Some(HookPoint::View),
                // Chooser callbacks belong to the chooser, not to a hook.
                HostEvent::RowActivated { .. } => None,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum EventDisposition {
        Handled,
        Declined,
    }

    impl EventDisposition {
        pub fn is_handled(self) -> bool {
            self == EventDisposition::Handled
        }
    }
}

mod replay_messages {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "type", content = "data")]
    pub enum ReplayCommand {
        SetModules { modules: Vec<Module> },
        QueueAnswer { text: Option<String> },
        Run,
        Event { event: HostEvent },
        Rows,
        Breakpoints,
        Terminate,
    }

    #[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
    pub enum RunOutcome {
        Opened { modules: usize },
        BroughtToFront,
    }

    #[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
    pub struct RenderedRow {
        pub name: String,
        pub base: String,
    }

    #[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
    #[serde(tag = "type", content = "data")]
    pub enum ReplayResponse {
        Ack,
        Ran { outcome: RunOutcome },
        Disposition { handled: bool },
        Rows { rows: Vec<RenderedRow> },
        Breakpoints { addresses: Vec<u64>, cursor: Option<u64> },
        Error { message: String },
    }
}
