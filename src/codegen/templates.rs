use crate::graph::BlockType;
use serde::{Deserialize, Serialize};

/// Immutable template tag attached to every block at creation.
///
/// Default-template lookup is driven by this tag, never by the block's
/// mutable title: retitling a block cannot change the code it generates.
/// Library entries declare their tag explicitly; blocks created without one
/// derive it once from `(block_type, title)` via [`TemplateKey::from_title`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKey {
    // Control
    IfThen,
    IfElse,
    ForLoop,
    WhileLoop,
    RepeatUntil,
    // Operators
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    Equal,
    NotEqual,
    Greater,
    Less,
    // Variables
    SetVariable,
    GetVariable,
    Increment,
    Decrement,
    // Functions
    QuantumState,
    ApplyGate,
    Measure,
    Print,
    ReadInput,
    /// No recognized tag; the default template is a TODO comment.
    #[default]
    Unknown,
}

impl TemplateKey {
    /// Derives a tag from the display title, case-insensitive substring
    /// match, first match wins. This runs once at block creation; later
    /// title edits never re-derive.
    pub fn from_title(block_type: BlockType, title: &str) -> Self {
        let t = title.to_lowercase();
        match block_type {
            BlockType::Control => {
                if t.contains("if") || t.contains("then") {
                    TemplateKey::IfThen
                } else if t.contains("for") && t.contains("loop") {
                    TemplateKey::ForLoop
                } else if t.contains("while") {
                    TemplateKey::WhileLoop
                } else if t.contains("repeat") {
                    TemplateKey::RepeatUntil
                } else {
                    TemplateKey::Unknown
                }
            }
            BlockType::Operator => {
                if t.contains("add") || t.contains('+') {
                    TemplateKey::Add
                } else if t.contains("subtract") || t.contains('-') {
                    TemplateKey::Subtract
                } else if t.contains("multiply") || t.contains('×') || t.contains('*') {
                    TemplateKey::Multiply
                } else if t.contains("divide") || t.contains('÷') || t.contains('/') {
                    TemplateKey::Divide
                } else if t.contains("equal") {
                    // "not equal" titles also land here; the library tags its
                    // Not Equal entry explicitly.
                    TemplateKey::Equal
                } else if t.contains("not equal") {
                    TemplateKey::NotEqual
                } else if t.contains("greater") {
                    TemplateKey::Greater
                } else if t.contains("less") {
                    TemplateKey::Less
                } else {
                    TemplateKey::Unknown
                }
            }
            BlockType::Variable => {
                if t.contains("set") {
                    TemplateKey::SetVariable
                } else if t.contains("get") {
                    TemplateKey::GetVariable
                } else if t.contains("increment") {
                    TemplateKey::Increment
                } else if t.contains("decrement") {
                    TemplateKey::Decrement
                } else {
                    TemplateKey::Unknown
                }
            }
            BlockType::Function => {
                if t.contains("quantum") {
                    TemplateKey::QuantumState
                } else if t.contains("gate") {
                    TemplateKey::ApplyGate
                } else if t.contains("measure") {
                    TemplateKey::Measure
                } else if t.contains("print") {
                    TemplateKey::Print
                } else if t.contains("input") {
                    TemplateKey::ReadInput
                } else {
                    TemplateKey::Unknown
                }
            }
            _ => TemplateKey::Unknown,
        }
    }

    /// The default Lua template for a block that carries no explicit code.
    /// The title only feeds the TODO fallback text.
    pub fn default_template(&self, title: &str) -> String {
        let fixed = match self {
            TemplateKey::IfThen => "if {condition} then\n    -- then block\nend",
            TemplateKey::IfElse => {
                "if {condition} then\n    -- then block\nelse\n    -- else block\nend"
            }
            TemplateKey::ForLoop => "for {variable} = {start}, {end} do\n    -- loop body\nend",
            TemplateKey::WhileLoop => "while {condition} do\n    -- loop body\nend",
            TemplateKey::RepeatUntil => "repeat\n    -- loop body\nuntil {condition}",
            TemplateKey::Add => "{a} + {b}",
            TemplateKey::Subtract => "{a} - {b}",
            TemplateKey::Multiply => "{a} * {b}",
            TemplateKey::Divide => "{a} / {b}",
            TemplateKey::Modulo => "{a} % {b}",
            TemplateKey::Power => "{a} ^ {b}",
            TemplateKey::Equal => "{a} == {b}",
            TemplateKey::NotEqual => "{a} ~= {b}",
            TemplateKey::Greater => "{a} > {b}",
            TemplateKey::Less => "{a} < {b}",
            TemplateKey::SetVariable => "{var_name} = {value}",
            TemplateKey::GetVariable => "{var_name}",
            TemplateKey::Increment => "{var_name} = {var_name} + 1",
            TemplateKey::Decrement => "{var_name} = {var_name} - 1",
            TemplateKey::QuantumState => "quantum_state({n_qubits})",
            TemplateKey::ApplyGate => "apply_gate({state}, {gate}, {qubit})",
            TemplateKey::Measure => "measure({state})",
            TemplateKey::Print => "print(\"{message}\")",
            TemplateKey::ReadInput => "io.read()",
            TemplateKey::Unknown => {
                return format!("-- TODO: Implement {} functionality", title);
            }
        };
        fixed.to_string()
    }
}
