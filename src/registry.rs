use crate::protocol::Module;

/// Append-only, insertion-ordered catalog of modules seen this session.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Vec<Module>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Replace the contents with the host's enumeration, keeping its order.
    pub fn seed(&mut self, modules: Vec<Module>) {
        self.modules = modules;
    }

    pub fn append(&mut self, module: Module) {
        self.modules.push(module);
    }

    pub fn snapshot(&self) -> &[Module] {
        &self.modules
    }

    pub fn get(&self, index: usize) -> Option<&Module> {
        self.modules.get(index)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn clear(&mut self) {
        self.modules.clear();
    }
}
