use thiserror::Error;
use crate::protocol::{HistoryKind, HookPoint, Module, RenderedRow, ViewId};
use crate::selector::Selection;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Module enumeration failed: {0}")]
    Enumeration(String),
    #[error("Breakpoint at 0x{0:X} rejected: {1}")]
    Breakpoint(u64, String),
    #[error("Cannot navigate to 0x{0:X}")]
    Navigation(u64),
    #[error("View not found: {0}")]
    ViewNotFound(String),
    #[error("Subscription to {0:?} failed")]
    Subscription(HookPoint),
    #[error("Other: {0}")]
    Other(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChooserError {
    #[error("Row {index} out of range (count {count})")]
    RowOutOfRange { index: usize, count: usize },
}

/// Host-issued handle for an active notification hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(pub u64);

/// The debugger the core runs inside. Every call happens on the host's UI thread.
pub trait DebuggerHost {
    fn list_modules(&self) -> Result<Vec<Module>, HostError>;
    fn add_breakpoint(&mut self, address: u64) -> Result<(), HostError>;
    fn jump_to(&mut self, address: u64) -> Result<(), HostError>;
    /// Address under the cursor of the active view.
    fn screen_address(&self) -> u64;
    /// Blocking text prompt. `None` means the operator cancelled.
    fn ask_text(&mut self, label: &str, history: HistoryKind) -> Option<String>;
    fn parse_address(&self, text: &str, context: u64) -> Option<u64> {
        crate::address::parse_address_expr(text, context)
    }

    fn find_view(&self, title: &str) -> Option<ViewId>;
    fn activate_view(&mut self, view: ViewId);
    fn open_chooser(&mut self, chooser: &dyn ModuleChooser) -> Result<ViewId, HostError>;
    fn refresh_view(&mut self, title: &str);
    fn close_view(&mut self, title: &str);
    fn install_key_intercept(&mut self, view: ViewId) -> Result<(), HostError>;

    fn subscribe(&mut self, point: HookPoint) -> Result<SubscriptionToken, HostError>;
    fn unsubscribe(&mut self, token: SubscriptionToken) -> Result<(), HostError>;
}

/// Capabilities a host needs to render and drive a module list.
pub trait ModuleChooser {
    fn title(&self) -> &str;
    fn columns(&self) -> &[(&'static str, usize)];
    fn get_count(&self) -> usize;
    fn get_row(&self, n: usize) -> Result<RenderedRow, ChooserError>;
    fn on_activate(&self, n: usize, selection: &mut Selection) -> Result<(), ChooserError>;
}
