//! Pass list helpers over a loaded [`OptimizedMethod`].
use irscope_error::{Error, Result};

use crate::descriptor::MethodSignature;
use crate::ir::{OptimizedMethod, Pass};

impl Pass {
    /// Name without the trailing `Pass` suffix, e.g. `SSAConstruction`.
    pub fn display_name(&self) -> &str {
        match self.name.rfind("Pass") {
            Some(index) => &self.name[..index],
            None => &self.name,
        }
    }

    /// Passes that only print IR, such as `MachineInstructionPrinterPass`.
    pub fn is_printer(&self) -> bool {
        self.display_name().ends_with("Printer")
    }

    pub fn has_hir(&self) -> bool {
        self.hir.is_some()
    }

    pub fn has_lir(&self) -> bool {
        self.lir.is_some()
    }

    /// Percentage of `total_nanos` spent in this pass; 0 when the total is 0.
    pub fn time_share(&self, total_nanos: u64) -> f64 {
        if total_nanos == 0 {
            return 0.0;
        }
        self.elapsed_nanos as f64 / total_nanos as f64 * 100.0
    }
}

impl OptimizedMethod {
    pub fn total_nanos(&self) -> u64 {
        self.passes.iter().map(|p| p.elapsed_nanos).sum()
    }

    pub fn pass(&self, index: usize) -> Option<&Pass> {
        self.passes.get(index)
    }

    /// First pass with the exact name, or else the first whose display name matches.
    pub fn pass_by_name(&self, name: &str) -> Option<&Pass> {
        self.passes
            .iter()
            .find(|p| p.name == name)
            .or_else(|| self.passes.iter().find(|p| p.display_name() == name))
    }

    pub fn last_pass(&self) -> Option<&Pass> {
        self.passes.last()
    }

    /// Resolve a user supplied selector: a numeric index or a pass name.
    pub fn find_pass(&self, selector: &str) -> Result<&Pass> {
        let found = match selector.parse::<usize>() {
            Ok(index) => self.pass(index),
            Err(_) => self.pass_by_name(selector),
        };
        found.ok_or_else(|| Error::pass_not_found(selector).with_operation("method::find_pass"))
    }

    /// Passes shown in a pass list, optionally without printer passes.
    pub fn visible_passes(&self, ignore_printers: bool) -> impl Iterator<Item = &Pass> {
        self.passes
            .iter()
            .filter(move |p| !(ignore_printers && p.is_printer()))
    }

    pub fn signature(&self) -> MethodSignature {
        MethodSignature::parse(&self.descriptor)
    }

    /// Java-like method header, e.g. `int max(int, int)`.
    pub fn display_signature(&self) -> String {
        self.signature().render(&self.method_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irscope_error::ErrorKind;

    fn pass(index: usize, name: &str, nanos: u64) -> Pass {
        Pass {
            index,
            name: name.to_string(),
            elapsed_nanos: nanos,
            ..Default::default()
        }
    }

    fn method() -> OptimizedMethod {
        OptimizedMethod {
            class_name: "java/lang/Math".into(),
            method_name: "max".into(),
            descriptor: "(II)I".into(),
            passes: vec![
                pass(0, "SSAConstructionPass", 300),
                pass(1, "MachineInstructionPrinterPass", 100),
                pass(2, "LoopPassPass", 600),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_display_name_strips_last_pass() {
        let m = method();
        assert_eq!(m.passes[0].display_name(), "SSAConstruction");
        assert_eq!(m.passes[2].display_name(), "LoopPass");
        assert_eq!(pass(0, "Inliner", 0).display_name(), "Inliner");
    }

    #[test]
    fn test_printer_filtering() {
        let m = method();
        let names: Vec<_> = m.visible_passes(true).map(|p| p.index).collect();
        assert_eq!(names, vec![0, 2]);
        assert_eq!(m.visible_passes(false).count(), 3);
    }

    #[test]
    fn test_time_share() {
        let m = method();
        assert_eq!(m.total_nanos(), 1000);
        assert!((m.passes[2].time_share(m.total_nanos()) - 60.0).abs() < 1e-9);
        assert_eq!(m.passes[0].time_share(0), 0.0);
    }

    #[test]
    fn test_find_pass() {
        let m = method();
        assert_eq!(m.find_pass("1").unwrap().name, "MachineInstructionPrinterPass");
        assert_eq!(m.find_pass("SSAConstructionPass").unwrap().index, 0);
        assert_eq!(m.find_pass("SSAConstruction").unwrap().index, 0);
        assert_eq!(m.find_pass("9").unwrap_err().kind(), ErrorKind::PassNotFound);
        assert_eq!(m.last_pass().unwrap().index, 2);
    }

    #[test]
    fn test_display_signature() {
        assert_eq!(method().display_signature(), "int max(int, int)");
    }
}
