//! Three-address code emitter: an append-only instruction list plus the
//! label-management stacks the semantic rules use for backpatching.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("line {index} is not a jump instruction")]
    NotAJump { index: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Line {
    /// A reserved, not-yet-written slot (`xxx`/`yyy` placeholders).
    Placeholder(&'static str),
    Instr {
        op: String,
        dst: String,
        args: Vec<String>,
    },
}

impl Line {
    fn render(&self, index: usize) -> String {
        let label = format!("L{index}");
        match self {
            Line::Placeholder(marker) => format!("{label:<8} {marker:>8}"),
            Line::Instr { op, dst, args } => {
                let mut line = format!("{label:<8} {op:>8} {dst:>16}");
                for arg in args {
                    line.push(' ');
                    line.push_str(&format!("{arg:>16}"));
                }
                line
            }
        }
    }

    fn op(&self) -> Option<&str> {
        match self {
            Line::Instr { op, .. } => Some(op),
            Line::Placeholder(_) => None,
        }
    }
}

/// Address of a temporary/constant, formatted `$(0x<hex>)` per the
/// three-address listing format.
pub fn address_operand(address: u64) -> String {
    format!("$(0x{address:X})")
}

#[derive(Default)]
pub struct Emitter {
    lines: Vec<Line>,
    pub label_stack: Vec<usize>,
    pub endif_stack: Vec<usize>,
    pub loop_label_stack: Vec<usize>,
    pub break_label_stack: Vec<Vec<usize>>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn emit(
        &mut self,
        op: impl Into<String>,
        dst: impl Into<String>,
        args: Vec<String>,
    ) -> usize {
        let index = self.lines.len();
        self.lines.push(Line::Instr {
            op: op.into(),
            dst: dst.into(),
            args,
        });
        index
    }

    pub fn new_label(&mut self) -> usize {
        let index = self.lines.len();
        self.lines.push(Line::Placeholder("xxx"));
        self.label_stack.push(index);
        index
    }

    pub fn new_goto_label(&mut self) -> usize {
        let index = self.lines.len();
        self.lines.push(Line::Placeholder("yyy"));
        self.endif_stack.push(index);
        index
    }

    pub fn emit_label(&mut self, index: usize, op: impl Into<String>, dst: impl Into<String>, args: Vec<String>) {
        self.lines[index] = Line::Instr {
            op: op.into(),
            dst: dst.into(),
            args,
        };
    }

    pub fn emit_goto(&mut self, index: usize, target_index: usize) {
        self.lines[index] = Line::Instr {
            op: "jmp".to_string(),
            dst: format!("L{target_index}"),
            args: Vec::new(),
        };
    }

    pub fn adjust_jmp(&mut self, index: usize, new_target: usize) -> Result<(), EmitError> {
        let is_jump = matches!(self.lines[index].op(), Some("jmp" | "jz" | "jnz"));
        if !is_jump {
            return Err(EmitError::NotAJump { index });
        }
        if let Line::Instr { dst, .. } = &mut self.lines[index] {
            *dst = format!("L{new_target}");
        }
        Ok(())
    }

    pub fn enter_loop(&mut self) {
        self.break_label_stack.push(Vec::new());
    }

    pub fn exit_loop(&mut self, end: usize) {
        if let Some(breaks) = self.break_label_stack.pop() {
            for index in breaks {
                self.lines[index] = Line::Instr {
                    op: "jmp".to_string(),
                    dst: format!("L{end}"),
                    args: Vec::new(),
                };
            }
        }
    }

    pub fn add_break_label(&mut self) -> usize {
        let index = self.emit("nop", "", Vec::new());
        if let Some(top) = self.break_label_stack.last_mut() {
            top.push(index);
        }
        index
    }

    pub fn render_all(&self) -> Vec<String> {
        self.lines
            .iter()
            .enumerate()
            .map(|(index, line)| line.render(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_returns_a_stable_index() {
        let mut emitter = Emitter::new();
        let first = emitter.emit("mov", "$(0x10000000)", vec!["0".into()]);
        let second = emitter.emit("mov", "$(0x10000001)", vec!["1".into()]);
        assert_eq!(first, 0);
        assert_eq!(second, 1);
    }

    #[test]
    fn new_label_pushes_a_placeholder_onto_the_label_stack() {
        let mut emitter = Emitter::new();
        let index = emitter.new_label();
        assert_eq!(emitter.label_stack, vec![index]);
        assert!(emitter.render_all()[index].contains("xxx"));
    }

    #[test]
    fn emit_goto_overwrites_a_reserved_placeholder() {
        let mut emitter = Emitter::new();
        let label = emitter.new_label();
        emitter.emit("nop", "", vec![]);
        emitter.emit_goto(label, 1);
        assert!(emitter.render_all()[label].contains("jmp") && emitter.render_all()[label].contains("L1"));
    }

    #[test]
    fn adjust_jmp_rejects_a_non_jump_line() {
        let mut emitter = Emitter::new();
        let index = emitter.emit("mov", "dst", vec!["src".into()]);
        assert_eq!(emitter.adjust_jmp(index, 5), Err(EmitError::NotAJump { index }));
    }

    #[test]
    fn break_labels_are_patched_at_loop_exit() {
        let mut emitter = Emitter::new();
        emitter.enter_loop();
        let break_idx = emitter.add_break_label();
        emitter.exit_loop(10);
        assert!(emitter.render_all()[break_idx].contains("L10"));
    }

    #[test]
    fn address_operand_formats_as_hex() {
        assert_eq!(address_operand(0x10000000), "$(0x10000000)");
    }
}
