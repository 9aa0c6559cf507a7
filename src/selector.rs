//! Interactive module chooser and the selection it drives.

use crate::interfaces::{ChooserError, ModuleChooser};
use crate::protocol::{Module, RenderedRow};
use tracing::info;

/// Base address of the most recently activated chooser row. Zero until a row is
/// activated, which is indistinguishable from a module legitimately based at 0.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    base: u64,
}

impl Selection {
    pub fn base(&self) -> u64 {
        self.base
    }

    pub(crate) fn set_base(&mut self, base: u64) {
        self.base = base;
    }
}

pub const NAME_COLUMN: (&str, usize) = ("Name", 32);
pub const BASE_COLUMN: (&str, usize) = ("Base", 16);

pub fn format_base(base: u64) -> String {
    format!("0x{:X}", base)
}

/// Two-column list of modules: name and hex base.
#[derive(Debug)]
pub struct ModuleSelector {
    title: String,
    columns: [(&'static str, usize); 2],
    rows: Vec<Module>,
}

impl ModuleSelector {
    pub fn new(title: impl Into<String>, rows: &[Module]) -> Self {
        Self::with_widths(title, rows, NAME_COLUMN.1, BASE_COLUMN.1)
    }

    pub fn with_widths(title: impl Into<String>, rows: &[Module], name_width: usize, base_width: usize) -> Self {
        Self {
            title: title.into(),
            columns: [(NAME_COLUMN.0, name_width), (BASE_COLUMN.0, base_width)],
            rows: rows.to_vec(),
        }
    }

    /// Append a row. The caller asks the host to redraw the view.
    pub fn push_back(&mut self, module: Module) {
        self.rows.push(module);
    }

    /// Identity check used when the host hands back a title.
    pub fn is(&self, title: &str) -> bool {
        self.title == title
    }

    fn row(&self, n: usize) -> Result<&Module, ChooserError> {
        self.rows.get(n).ok_or(ChooserError::RowOutOfRange {
            index: n,
            count: self.rows.len(),
        })
    }
}

impl ModuleChooser for ModuleSelector {
    fn title(&self) -> &str {
        &self.title
    }

    fn columns(&self) -> &[(&'static str, usize)] {
        &self.columns
    }

    fn get_count(&self) -> usize {
        self.rows.len()
    }

    fn get_row(&self, n: usize) -> Result<RenderedRow, ChooserError> {
        let module = self.row(n)?;
        Ok(RenderedRow {
            name: module.name.clone(),
            base: format_base(module.base),
        })
    }

    fn on_activate(&self, n: usize, selection: &mut Selection) -> Result<(), ChooserError> {
        let module = self.row(n)?;
        info!(module = %module.name, base = %format_base(module.base), "Module chosen");
        selection.set_base(module.base);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Module> {
        vec![
            Module::new("app.exe", 0x400000),
            Module::new("libc.so.6", 0x7f3a_1c00_0000),
            Module::new("zero", 0),
        ]
    }

    #[test]
    fn columns_match_layout() {
        let selector = ModuleSelector::new("Choose Module", &sample());
        assert_eq!(selector.columns(), &[("Name", 32), ("Base", 16)]);
        assert_eq!(selector.title(), "Choose Module");
    }

    #[test]
    fn rows_render_unpadded_uppercase_hex() {
        let selector = ModuleSelector::new("Choose Module", &sample());
        assert_eq!(selector.get_count(), 3);
        let row = selector.get_row(1).unwrap();
        assert_eq!(row.name, "libc.so.6");
        assert_eq!(row.base, "0x7F3A1C000000");
        assert_eq!(selector.get_row(2).unwrap().base, "0x0");
    }

    #[test]
    fn rendered_base_reparses_to_module_base() {
        let modules = sample();
        let selector = ModuleSelector::new("Choose Module", &modules);
        for (n, module) in modules.iter().enumerate() {
            let row = selector.get_row(n).unwrap();
            let digits = row.base.strip_prefix("0x").unwrap();
            assert_eq!(u64::from_str_radix(digits, 16).unwrap(), module.base);
        }
    }

    #[test]
    fn out_of_range_row_is_an_error() {
        let selector = ModuleSelector::new("Choose Module", &sample());
        assert_eq!(
            selector.get_row(3),
            Err(ChooserError::RowOutOfRange { index: 3, count: 3 })
        );
        let mut selection = Selection::default();
        assert!(selector.on_activate(7, &mut selection).is_err());
        assert_eq!(selection.base(), 0);
    }

    #[test]
    fn activation_is_last_write_wins() {
        let selector = ModuleSelector::new("Choose Module", &sample());
        let mut selection = Selection::default();
        selector.on_activate(1, &mut selection).unwrap();
        selector.on_activate(0, &mut selection).unwrap();
        assert_eq!(selection.base(), 0x400000);
        selector.on_activate(0, &mut selection).unwrap();
        assert_eq!(selection.base(), 0x400000);
    }

    #[test]
    fn push_back_appends_after_seeded_rows() {
        let mut selector = ModuleSelector::new("Choose Module", &sample());
        selector.push_back(Module::new("libm", 0x7f5000));
        assert_eq!(selector.get_count(), 4);
        assert_eq!(selector.get_row(3).unwrap().base, "0x7F5000");
        assert_eq!(selector.get_row(0).unwrap().name, "app.exe");
        assert!(selector.is("Choose Module"));
    }
}
