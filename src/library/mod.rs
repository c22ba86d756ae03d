//! The static block catalog: every template a user can drag onto the
//! canvas, grouped into ordered categories. Pure data, no behavior beyond
//! conversion into a [`BlockSpec`].

use crate::codegen::TemplateKey;
use crate::graph::{BlockSpec, BlockType};

/// One instantiable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockTemplate {
    pub block_type: BlockType,
    pub title: &'static str,
    /// Toolbox glyph, presentation-only.
    pub icon: &'static str,
    pub description: &'static str,
    /// The Lua template with `{socket_name}` placeholders.
    pub template: &'static str,
    /// Explicit tag so the block's default-template behavior never depends
    /// on its (editable) title.
    pub template_key: TemplateKey,
}

impl From<&BlockTemplate> for BlockSpec {
    fn from(entry: &BlockTemplate) -> Self {
        BlockSpec::new(entry.block_type, entry.title)
            .with_description(entry.description)
            .with_template(entry.template)
            .with_template_key(entry.template_key)
    }
}

/// An ordered group of catalog entries, as shown in the toolbox.
#[derive(Debug, Clone)]
pub struct BlockCategory {
    pub name: &'static str,
    pub blocks: Vec<BlockTemplate>,
}

/// Read-only access to the catalog.
pub struct BlockLibrary;

const fn entry(
    block_type: BlockType,
    title: &'static str,
    icon: &'static str,
    description: &'static str,
    template: &'static str,
    template_key: TemplateKey,
) -> BlockTemplate {
    BlockTemplate {
        block_type,
        title,
        icon,
        description,
        template,
        template_key,
    }
}

impl BlockLibrary {
    /// All categories in toolbox order.
    pub fn categories() -> Vec<BlockCategory> {
        use BlockType::*;
        use TemplateKey::*;

        vec![
            BlockCategory {
                name: "Events",
                blocks: vec![
                    entry(
                        Event,
                        "On Start",
                        "🚀",
                        "Executes when program starts",
                        "print(\"Program started\")",
                        Unknown,
                    ),
                    entry(
                        Event,
                        "On Timer",
                        "⏱️",
                        "Executes on timer interval",
                        "print(\"Timer event triggered\")",
                        Unknown,
                    ),
                    entry(
                        Event,
                        "On Click",
                        "🖱️",
                        "Executes on mouse click",
                        "print(\"Mouse clicked!\")",
                        Unknown,
                    ),
                ],
            },
            BlockCategory {
                name: "Control",
                blocks: vec![
                    entry(
                        Control,
                        "If-Then",
                        "🔀",
                        "Conditional execution",
                        "if {condition} then\n    -- then block\nend",
                        IfThen,
                    ),
                    entry(
                        Control,
                        "If-Else",
                        "⚖️",
                        "Conditional with else branch",
                        "if {condition} then\n    -- then block\nelse\n    -- else block\nend",
                        IfElse,
                    ),
                    entry(
                        Control,
                        "For Loop",
                        "🔄",
                        "For loop with counter",
                        "for {variable} = {start}, {end} do\n    -- loop body\nend",
                        ForLoop,
                    ),
                    entry(
                        Control,
                        "While Loop",
                        "∞",
                        "While condition is true",
                        "while {condition} do\n    -- loop body\nend",
                        WhileLoop,
                    ),
                    entry(
                        Control,
                        "Repeat-Until",
                        "↩️",
                        "Repeat until condition",
                        "repeat\n    -- loop body\nuntil {condition}",
                        RepeatUntil,
                    ),
                ],
            },
            BlockCategory {
                name: "Variables",
                blocks: vec![
                    entry(
                        Variable,
                        "Set Variable",
                        "📝",
                        "Set variable value",
                        "{var_name} = {value}",
                        SetVariable,
                    ),
                    entry(
                        Variable,
                        "Get Variable",
                        "📖",
                        "Get variable value",
                        "{var_name}",
                        GetVariable,
                    ),
                    entry(
                        Variable,
                        "Increment",
                        "➕",
                        "Increase variable by 1",
                        "{var_name} = {var_name} + 1",
                        Increment,
                    ),
                    entry(
                        Variable,
                        "Decrement",
                        "➖",
                        "Decrease variable by 1",
                        "{var_name} = {var_name} - 1",
                        Decrement,
                    ),
                ],
            },
            BlockCategory {
                name: "Math",
                blocks: vec![
                    entry(Operator, "Add", "+", "Addition operator", "{a} + {b}", Add),
                    entry(
                        Operator,
                        "Subtract",
                        "-",
                        "Subtraction operator",
                        "{a} - {b}",
                        Subtract,
                    ),
                    entry(
                        Operator,
                        "Multiply",
                        "×",
                        "Multiplication operator",
                        "{a} * {b}",
                        Multiply,
                    ),
                    entry(
                        Operator,
                        "Divide",
                        "÷",
                        "Division operator",
                        "{a} / {b}",
                        Divide,
                    ),
                    entry(Operator, "Modulo", "%", "Modulo operator", "{a} % {b}", Modulo),
                    entry(Operator, "Power", "^", "Exponentiation", "{a} ^ {b}", Power),
                    entry(
                        Operator,
                        "Equal",
                        "=",
                        "Equality comparison",
                        "{a} == {b}",
                        Equal,
                    ),
                    entry(
                        Operator,
                        "Not Equal",
                        "≠",
                        "Inequality comparison",
                        "{a} ~= {b}",
                        NotEqual,
                    ),
                ],
            },
            BlockCategory {
                name: "Quantum",
                blocks: vec![
                    entry(
                        Function,
                        "Quantum State",
                        "⚛️",
                        "Create quantum state",
                        "quantum_state({n_qubits})",
                        QuantumState,
                    ),
                    entry(
                        Function,
                        "Apply Gate",
                        "🔷",
                        "Apply quantum gate",
                        "apply_gate({state}, \"{gate}\", {qubit})",
                        ApplyGate,
                    ),
                    entry(
                        Function,
                        "Measure",
                        "📏",
                        "Measure quantum state",
                        "measure({state})",
                        Measure,
                    ),
                    entry(
                        Function,
                        "Hadamard Gate",
                        "H",
                        "Apply Hadamard gate",
                        "apply_gate({state}, \"H\", {qubit})",
                        ApplyGate,
                    ),
                    entry(
                        Function,
                        "CNOT Gate",
                        "⊕",
                        "Apply CNOT gate",
                        "apply_gate({state}, \"CNOT\", {control}, {target})",
                        ApplyGate,
                    ),
                    entry(
                        Function,
                        "Quantum Circuit",
                        "🔗",
                        "Create quantum circuit",
                        "-- Quantum circuit initialization\nlocal circuit = {}\nprint(\"Quantum circuit created\")",
                        Unknown,
                    ),
                ],
            },
            BlockCategory {
                name: "Input/Output",
                blocks: vec![
                    entry(
                        Function,
                        "Print",
                        "🖨️",
                        "Print to console",
                        "print(\"{message}\")",
                        Print,
                    ),
                    entry(
                        Function,
                        "Read Input",
                        "📥",
                        "Read user input",
                        "local input = io.read()",
                        ReadInput,
                    ),
                    entry(
                        Function,
                        "Read File",
                        "📄",
                        "Read from file",
                        "local file = io.open(\"{filename}\", \"r\")\nlocal content = file:read(\"*a\")\nfile:close()",
                        Unknown,
                    ),
                    entry(
                        Function,
                        "Write File",
                        "📝",
                        "Write to file",
                        "local file = io.open(\"{filename}\", \"w\")\nfile:write(\"{content}\")\nfile:close()",
                        Unknown,
                    ),
                ],
            },
        ]
    }

    /// Looks an entry up by its catalog title.
    pub fn find(title: &str) -> Option<BlockTemplate> {
        Self::categories()
            .into_iter()
            .flat_map(|category| category.blocks)
            .find(|block| block.title == title)
    }
}
