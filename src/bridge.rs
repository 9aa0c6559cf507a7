//! Connects host notification streams to the registry, the chooser and the
//! breakpoint trigger.

use crate::interfaces::{DebuggerHost, HostError, ModuleChooser, SubscriptionToken};
use crate::protocol::{EventDisposition, HookPoint, KeyChord, Module, ViewId};
use crate::registry::ModuleRegistry;
use crate::selector::ModuleSelector;
use std::collections::HashSet;
use tracing::{debug, info, trace, warn};

/// A live hook, released through `SessionEventBridge::detach`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub point: HookPoint,
    pub token: SubscriptionToken,
}

#[derive(Debug, Default)]
pub struct SessionEventBridge {
    subscriptions: Vec<Subscription>,
    intercepted_views: HashSet<ViewId>,
}

impl SessionEventBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    pub fn listens_to(&self, point: HookPoint) -> bool {
        self.subscriptions.iter().any(|s| s.point == point)
    }

    /// Subscribe to view and debugger notifications. A no-op when already attached;
    /// on partial failure whatever was acquired is released again.
    pub fn attach<H: DebuggerHost + ?Sized>(&mut self, host: &mut H) -> Result<(), HostError> {
        if self.is_attached() {
            trace!("Bridge already attached");
            return Ok(());
        }
        for point in [HookPoint::View, HookPoint::Debugger] {
            match host.subscribe(point) {
                Ok(token) => self.subscriptions.push(Subscription { point, token }),
                Err(e) => {
                    self.detach(host);
                    return Err(e);
                }
            }
        }
        debug!(count = self.subscriptions.len(), "Bridge attached");
        Ok(())
    }

    pub fn detach<H: DebuggerHost + ?Sized>(&mut self, host: &mut H) {
        for sub in self.subscriptions.drain(..) {
            if let Err(e) = host.unsubscribe(sub.token) {
                warn!(point = ?sub.point, error = %e, "Failed to release subscription");
            }
        }
        self.intercepted_views.clear();
    }

    /// Install the key intercept on every activation; the host may have rebuilt
    /// the view's handlers since we last saw it.
    pub fn on_view_activated<H: DebuggerHost + ?Sized>(&mut self, host: &mut H, view: ViewId) -> EventDisposition {
        match host.install_key_intercept(view) {
            Ok(()) => {
                self.intercepted_views.insert(view);
                trace!(view = view.0, "Key intercept installed");
                EventDisposition::Handled
            }
            Err(e) => {
                self.intercepted_views.remove(&view);
                warn!(view = view.0, error = %e, "Failed to install key intercept");
                EventDisposition::Declined
            }
        }
    }

    /// Whether a key press on `view` should fire the breakpoint command.
    pub fn routes_key(&self, view: ViewId, chord: KeyChord, trigger: KeyChord) -> bool {
        self.intercepted_views.contains(&view) && chord == trigger
    }

    pub fn on_module_loaded<H: DebuggerHost + ?Sized>(
        host: &mut H,
        registry: &mut ModuleRegistry,
        selector: Option<&mut ModuleSelector>,
        module: Module,
    ) -> EventDisposition {
        trace!(module = %module, "Module loaded");
        registry.append(module.clone());
        match selector {
            Some(selector) if host.find_view(selector.title()).is_some() => {
                selector.push_back(module);
                host.refresh_view(selector.title());
            }
            _ => info!("No active module selector"),
        }
        EventDisposition::Handled
    }

    pub fn on_module_unloaded(base: u64) -> EventDisposition {
        // Registry is append-only; the module stays listed and selectable.
        debug!(base = %format_args!("0x{:X}", base), "Module unload ignored");
        EventDisposition::Declined
    }
}
