//! In-memory debugger host. Answers prompts from a queue and records every
//! breakpoint, navigation, view and hook the core asks for.

use crate::interfaces::{DebuggerHost, HostError, ModuleChooser, SubscriptionToken};
use crate::protocol::{HistoryKind, HookPoint, Module, ViewId};
use std::collections::{HashMap, VecDeque};
use tracing::trace;

#[derive(Debug, Default)]
pub struct ScriptedHost {
    modules: Vec<Module>,
    answers: VecDeque<Option<String>>,
    prompts: Vec<(String, HistoryKind)>,
    breakpoints: Vec<u64>,
    cursor: Option<u64>,
    screen_address: u64,
    views: Vec<(ViewId, String)>,
    next_view: u64,
    active_view: Option<ViewId>,
    choosers_opened: usize,
    refreshes: Vec<String>,
    intercepts: Vec<ViewId>,
    hooks: HashMap<SubscriptionToken, HookPoint>,
    next_token: u64,
    reject_breakpoints: bool,
    fail_enumeration: bool,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_modules(modules: Vec<Module>) -> Self {
        Self {
            modules,
            ..Self::default()
        }
    }

    /// The debugger's current module list, as seen by the next enumeration.
    pub fn set_modules(&mut self, modules: Vec<Module>) {
        self.modules = modules;
    }

    /// Queue the operator's next prompt answer; `None` cancels the prompt.
    pub fn queue_answer(&mut self, text: Option<&str>) {
        self.answers.push_back(text.map(str::to_string));
    }

    pub fn set_screen_address(&mut self, address: u64) {
        self.screen_address = address;
    }

    pub fn reject_breakpoints(&mut self, reject: bool) {
        self.reject_breakpoints = reject;
    }

    pub fn fail_enumeration(&mut self, fail: bool) {
        self.fail_enumeration = fail;
    }

    pub fn breakpoints(&self) -> &[u64] {
        &self.breakpoints
    }

    pub fn cursor(&self) -> Option<u64> {
        self.cursor
    }

    pub fn prompts(&self) -> &[(String, HistoryKind)] {
        &self.prompts
    }

    pub fn active_view(&self) -> Option<ViewId> {
        self.active_view
    }

    pub fn choosers_opened(&self) -> usize {
        self.choosers_opened
    }

    pub fn refreshes(&self) -> &[String] {
        &self.refreshes
    }

    pub fn intercepts(&self) -> &[ViewId] {
        &self.intercepts
    }

    pub fn hook_count(&self, point: HookPoint) -> usize {
        self.hooks.values().filter(|p| **p == point).count()
    }
}

impl DebuggerHost for ScriptedHost {
    fn list_modules(&self) -> Result<Vec<Module>, HostError> {
        if self.fail_enumeration {
            return Err(HostError::Enumeration("debugger not running".to_string()));
        }
        Ok(self.modules.clone())
    }

    fn add_breakpoint(&mut self, address: u64) -> Result<(), HostError> {
        if self.reject_breakpoints {
            return Err(HostError::Breakpoint(address, "rejected by host".to_string()));
        }
        trace!(address = %format_args!("0x{:X}", address), "Breakpoint added");
        self.breakpoints.push(address);
        Ok(())
    }

    fn jump_to(&mut self, address: u64) -> Result<(), HostError> {
        self.cursor = Some(address);
        self.screen_address = address;
        Ok(())
    }

    fn screen_address(&self) -> u64 {
        self.screen_address
    }

    fn ask_text(&mut self, label: &str, history: HistoryKind) -> Option<String> {
        self.prompts.push((label.to_string(), history));
        self.answers.pop_front().flatten()
    }

    fn find_view(&self, title: &str) -> Option<ViewId> {
        self.views.iter().find(|(_, t)| t == title).map(|(id, _)| *id)
    }

    fn activate_view(&mut self, view: ViewId) {
        self.active_view = Some(view);
    }

    fn open_chooser(&mut self, chooser: &dyn ModuleChooser) -> Result<ViewId, HostError> {
        self.next_view += 1;
        let view = ViewId(self.next_view);
        trace!(title = chooser.title(), rows = chooser.get_count(), "Chooser opened");
        self.views.push((view, chooser.title().to_string()));
        self.active_view = Some(view);
        self.choosers_opened += 1;
        Ok(view)
    }

    fn refresh_view(&mut self, title: &str) {
        self.refreshes.push(title.to_string());
    }

    fn close_view(&mut self, title: &str) {
        self.views.retain(|(_, t)| t != title);
    }

    fn install_key_intercept(&mut self, view: ViewId) -> Result<(), HostError> {
        self.intercepts.push(view);
        Ok(())
    }

    fn subscribe(&mut self, point: HookPoint) -> Result<SubscriptionToken, HostError> {
        self.next_token += 1;
        let token = SubscriptionToken(self.next_token);
        self.hooks.insert(token, point);
        Ok(token)
    }

    fn unsubscribe(&mut self, token: SubscriptionToken) -> Result<(), HostError> {
        match self.hooks.remove(&token) {
            Some(_) => Ok(()),
            None => Err(HostError::Other(format!("Unknown subscription {}", token.0))),
        }
    }
}
