//! Session context: the single owner of the host handle, the module registry,
//! the selection and the live chooser.

use crate::bridge::SessionEventBridge;
use crate::command::{BreakpointCommand, BreakpointOutcome};
use crate::config::ToolConfig;
use crate::interfaces::{DebuggerHost, HostError, ModuleChooser};
use crate::protocol::{EventDisposition, HostEvent, Module, RunOutcome};
use crate::registry::ModuleRegistry;
use crate::selector::{ModuleSelector, Selection};
use tracing::{info, trace, warn};

pub struct Session<H: DebuggerHost> {
    host: H,
    config: ToolConfig,
    registry: ModuleRegistry,
    selection: Selection,
    selector: Option<ModuleSelector>,
    bridge: SessionEventBridge,
}

impl<H: DebuggerHost> Session<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, ToolConfig::default())
    }

    pub fn with_config(host: H, config: ToolConfig) -> Self {
        Self {
            host,
            config,
            registry: ModuleRegistry::new(),
            selection: Selection::default(),
            selector: None,
            bridge: SessionEventBridge::new(),
        }
    }

    /// Open the module chooser, or bring it to front if the host still shows it.
    pub fn run(&mut self) -> Result<RunOutcome, HostError> {
        if let Some(view) = self.host.find_view(&self.config.chooser_title) {
            trace!(view = view.0, "Chooser already open");
            self.host.activate_view(view);
            return Ok(RunOutcome::BroughtToFront);
        }

        let modules = self.host.list_modules()?;
        self.registry.seed(modules);
        let selector = ModuleSelector::with_widths(
            self.config.chooser_title.as_str(),
            self.registry.snapshot(),
            self.config.name_width,
            self.config.base_width,
        );
        self.host.open_chooser(&selector)?;
        self.selector = Some(selector);

        if let Err(e) = self.bridge.attach(&mut self.host) {
            warn!(error = %e, "Failed to attach session hooks");
            if let Some(selector) = self.selector.take() {
                self.host.close_view(selector.title());
            }
            return Err(e);
        }

        info!(modules = self.registry.len(), "Module chooser opened");
        Ok(RunOutcome::Opened {
            modules: self.registry.len(),
        })
    }

    /// Release hooks and drop the chooser. Safe to call more than once.
    pub fn terminate(&mut self) {
        self.bridge.detach(&mut self.host);
        if let Some(selector) = self.selector.take() {
            self.host.close_view(selector.title());
            info!("Module chooser closed");
        }
        self.registry.clear();
    }

    pub fn handle_event(&mut self, event: &HostEvent) -> EventDisposition {
        if let Some(point) = event.hook_point() {
            if !self.bridge.listens_to(point) {
                trace!(%event, "Not subscribed, declining");
                return EventDisposition::Declined;
            }
        }

        match event {
            HostEvent::ModuleLoaded { name, base } => SessionEventBridge::on_module_loaded(
                &mut self.host,
                &mut self.registry,
                self.selector.as_mut(),
                Module::new(name.as_str(), *base),
            ),
            HostEvent::ModuleUnloaded { base } => SessionEventBridge::on_module_unloaded(*base),
            HostEvent::ViewActivated { view } => self.bridge.on_view_activated(&mut self.host, *view),
            HostEvent::KeyPressed { view, chord } => {
                if self.bridge.routes_key(*view, *chord, self.config.trigger) {
                    self.place_breakpoint();
                    EventDisposition::Handled
                } else {
                    EventDisposition::Declined
                }
            }
            HostEvent::RowActivated { title, index } => self.activate_row(title, *index),
        }
    }

    /// Run the prompt-and-place command against the current selection.
    pub fn place_breakpoint(&mut self) -> BreakpointOutcome {
        BreakpointCommand::new(&self.config).execute(&mut self.host, &self.selection)
    }

    fn activate_row(&mut self, title: &str, index: usize) -> EventDisposition {
        let Some(selector) = self.selector.as_ref().filter(|s| s.is(title)) else {
            trace!(title, "No chooser with this title");
            return EventDisposition::Declined;
        };
        match selector.on_activate(index, &mut self.selection) {
            Ok(()) => EventDisposition::Handled,
            Err(e) => {
                warn!(error = %e, "Row activation ignored");
                EventDisposition::Declined
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.selector.is_some()
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selector(&self) -> Option<&ModuleSelector> {
        self.selector.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: DebuggerHost> Drop for Session<H> {
    fn drop(&mut self) {
        self.terminate();
    }
}
