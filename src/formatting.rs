use crate::protocol::*;

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("base", &format_args!("0x{:X}", self.base))
            .finish()
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ 0x{:X}", self.name, self.base)
    }
}

impl std::fmt::Debug for KeyChord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::fmt::Display for KeyChord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers == 0 {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+0x{:X}", self.key, self.modifiers)
        }
    }
}

impl std::fmt::Debug for HostEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::fmt::Display for HostEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostEvent::ModuleLoaded { name, base } => write!(f, "ModuleLoaded {{ name: {}, base: 0x{:X} }}", name, base),
            HostEvent::ModuleUnloaded { base } => write!(f, "ModuleUnloaded {{ base: 0x{:X} }}", base),
            HostEvent::ViewActivated { view } => write!(f, "ViewActivated {{ view: {} }}", view.0),
            HostEvent::KeyPressed { view, chord } => write!(f, "KeyPressed {{ view: {}, chord: {} }}", view.0, chord),
            HostEvent::RowActivated { title, index } => write!(f, "RowActivated {{ title: {:?}, index: {} }}", title, index),
        }
    }
}
