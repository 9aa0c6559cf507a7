//! Prompted, module-relative breakpoint placement.

use crate::config::ToolConfig;
use crate::interfaces::DebuggerHost;
use crate::selector::Selection;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakpointOutcome {
    /// Breakpoint inserted and the view moved to it.
    Placed { address: u64 },
    /// The operator dismissed the prompt.
    Cancelled,
    /// The host rejected the breakpoint or the navigation.
    Failed { address: u64 },
}

pub struct BreakpointCommand<'a> {
    config: &'a ToolConfig,
}

impl<'a> BreakpointCommand<'a> {
    pub fn new(config: &'a ToolConfig) -> Self {
        Self { config }
    }

    /// Prompt for an offset, add it to the selected base, set a breakpoint there
    /// and jump to it. Failures are logged, never returned as errors.
    pub fn execute<H: DebuggerHost + ?Sized>(&self, host: &mut H, selection: &Selection) -> BreakpointOutcome {
        let Some(input) = host.ask_text(&self.config.prompt_label, self.config.prompt_history) else {
            trace!("Offset prompt cancelled");
            return BreakpointOutcome::Cancelled;
        };

        let offset = match host.parse_address(&input, host.screen_address()) {
            Some(offset) => offset,
            None => {
                debug!(input = %input, "Offset did not parse, using 0");
                0
            }
        };
        let address = resolve_target(selection.base(), offset);
        trace!(base = %format_args!("0x{:X}", selection.base()), offset = %format_args!("0x{:X}", offset), "Resolved breakpoint target");

        if let Err(e) = host.add_breakpoint(address) {
            warn!(error = %e, "Failed to add breakpoint");
            return BreakpointOutcome::Failed { address };
        }
        if let Err(e) = host.jump_to(address) {
            warn!(error = %e, "Failed to navigate to breakpoint");
            return BreakpointOutcome::Failed { address };
        }
        BreakpointOutcome::Placed { address }
    }
}

/// Native pointer arithmetic: wraps on overflow.
pub fn resolve_target(base: u64, offset: u64) -> u64 {
    base.wrapping_add(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::ModuleChooser;
    use crate::protocol::Module;
    use crate::scripted_host::ScriptedHost;
    use crate::selector::ModuleSelector;

    fn selection_at(base: u64) -> Selection {
        let selector = ModuleSelector::new("t", &[Module::new("m", base)]);
        let mut selection = Selection::default();
        selector.on_activate(0, &mut selection).unwrap();
        selection
    }

    #[test]
    fn offset_is_hex_relative_to_selected_base() {
        let config = ToolConfig::default();
        let mut host = ScriptedHost::new();
        host.queue_answer(Some("10"));

        let outcome = BreakpointCommand::new(&config).execute(&mut host, &selection_at(0x400000));
        assert_eq!(outcome, BreakpointOutcome::Placed { address: 0x400010 });
        assert_eq!(host.breakpoints(), &[0x400010]);
        assert_eq!(host.cursor(), Some(0x400010));
        assert_eq!(host.prompts(), &[("Enter".to_string(), crate::protocol::HistoryKind::Search)]);
    }

    #[test]
    fn unparsable_offset_lands_on_base() {
        let config = ToolConfig::default();
        let mut host = ScriptedHost::new();
        host.queue_answer(Some("not an offset"));

        let outcome = BreakpointCommand::new(&config).execute(&mut host, &selection_at(0x400000));
        assert_eq!(outcome, BreakpointOutcome::Placed { address: 0x400000 });
        assert_eq!(host.breakpoints(), &[0x400000]);
    }

    #[test]
    fn offset_expression_sees_cursor_address() {
        let config = ToolConfig::default();
        let mut host = ScriptedHost::new();
        host.set_screen_address(0x2000);
        host.queue_answer(Some("$+8"));

        let outcome = BreakpointCommand::new(&config).execute(&mut host, &selection_at(0x400000));
        assert_eq!(outcome, BreakpointOutcome::Placed { address: 0x402008 });
        assert_eq!(host.cursor(), Some(0x402008));
    }

    #[test]
    fn cancel_short_circuits() {
        let config = ToolConfig::default();
        let mut host = ScriptedHost::new();
        host.queue_answer(None);

        let outcome = BreakpointCommand::new(&config).execute(&mut host, &selection_at(0x400000));
        assert_eq!(outcome, BreakpointOutcome::Cancelled);
        assert!(host.breakpoints().is_empty());
        assert_eq!(host.cursor(), None);
    }

    #[test]
    fn no_selection_means_base_zero() {
        let config = ToolConfig::default();
        let mut host = ScriptedHost::new();
        host.queue_answer(Some("1234"));

        let outcome = BreakpointCommand::new(&config).execute(&mut host, &Selection::default());
        assert_eq!(outcome, BreakpointOutcome::Placed { address: 0x1234 });
    }

    #[test]
    fn target_wraps() {
        assert_eq!(resolve_target(u64::MAX, 2), 1);
    }

    #[test]
    fn rejected_breakpoint_skips_navigation() {
        let config = ToolConfig::default();
        let mut host = ScriptedHost::new();
        host.reject_breakpoints(true);
        host.queue_answer(Some("8"));

        let outcome = BreakpointCommand::new(&config).execute(&mut host, &selection_at(0x1000));
        assert_eq!(outcome, BreakpointOutcome::Failed { address: 0x1008 });
        assert_eq!(host.cursor(), None);
    }
}
