//! Code generation: walks the scene, resolves each block's template
//! depth-first through its input sockets, and assembles the complete Lua
//! document with header, section ordering and the error-handling epilogue.

use crate::error::GenerateError;
use crate::graph::{Block, BlockId, BlockType, Scene, SocketRef};
use crate::project::EngineSettings;
use chrono::{DateTime, Utc};

mod runtime;
pub mod templates;

pub use templates::TemplateKey;

/// Per-bucket block tallies reported in the document header. `total` counts
/// every block in the scene, including ones no bucket claimed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketCounts {
    pub total: usize,
    pub events: usize,
    pub variables: usize,
    pub functions: usize,
    pub controls: usize,
    pub math: usize,
    pub quantum: usize,
}

/// Every block classified into at most one section bucket.
///
/// Type decides the bucket for events, variables, functions and controls.
/// The remaining types are pulled into the math bucket by `operator` type or
/// a `Math` title marker, and into the quantum bucket by `action` type or a
/// `Quantum` title marker; anything left is unbucketed and only reachable
/// through wiring.
struct Buckets<'a> {
    events: Vec<&'a Block>,
    variables: Vec<&'a Block>,
    functions: Vec<&'a Block>,
    controls: Vec<&'a Block>,
    math: Vec<&'a Block>,
    quantum: Vec<&'a Block>,
}

impl<'a> Buckets<'a> {
    fn classify(scene: &'a Scene) -> Self {
        let mut buckets = Self {
            events: Vec::new(),
            variables: Vec::new(),
            functions: Vec::new(),
            controls: Vec::new(),
            math: Vec::new(),
            quantum: Vec::new(),
        };
        for block in scene.blocks() {
            match block.block_type {
                BlockType::Event => buckets.events.push(block),
                BlockType::Variable => buckets.variables.push(block),
                BlockType::Function => buckets.functions.push(block),
                BlockType::Control => buckets.controls.push(block),
                _ if block.block_type == BlockType::Operator || block.title.contains("Math") => {
                    buckets.math.push(block)
                }
                _ if block.block_type == BlockType::Action || block.title.contains("Quantum") => {
                    buckets.quantum.push(block)
                }
                _ => {}
            }
        }
        buckets
    }

    fn counts(&self, total: usize) -> BucketCounts {
        BucketCounts {
            total,
            events: self.events.len(),
            variables: self.variables.len(),
            functions: self.functions.len(),
            controls: self.controls.len(),
            math: self.math.len(),
            quantum: self.quantum.len(),
        }
    }
}

/// Builder for a [`CodeGenerator`].
pub struct CodeGeneratorBuilder<'a> {
    scene: &'a Scene,
    project_name: String,
    settings: EngineSettings,
    preview: bool,
    timestamp: Option<DateTime<Utc>>,
}

impl<'a> CodeGeneratorBuilder<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            project_name: "UntitledProject".to_string(),
            settings: EngineSettings::default(),
            preview: false,
            timestamp: None,
        }
    }

    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    pub fn engine_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Preview generation skips the entry-point precondition.
    pub fn preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Fixes the header timestamp, making generation a pure function of the
    /// scene. Defaults to the current time.
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn build(self) -> CodeGenerator<'a> {
        CodeGenerator {
            scene: self.scene,
            project_name: self.project_name,
            settings: self.settings,
            preview: self.preview,
            timestamp: self.timestamp,
        }
    }
}

/// Generates one complete Lua document from a scene.
///
/// Generation is a read-only traversal: every gap in the graph (missing
/// template, unwired input) substitutes a documented default, so a
/// structurally sound scene always generates. The only failures are a
/// missing entry point in non-preview mode and a cyclic connection graph.
pub struct CodeGenerator<'a> {
    scene: &'a Scene,
    project_name: String,
    settings: EngineSettings,
    preview: bool,
    timestamp: Option<DateTime<Utc>>,
}

impl<'a> CodeGenerator<'a> {
    pub fn builder(scene: &'a Scene) -> CodeGeneratorBuilder<'a> {
        CodeGeneratorBuilder::new(scene)
    }

    /// Assembles the full document: header, variable declarations, function
    /// definitions, the quantum runtime when needed, the `main` wrapper with
    /// its per-bucket sections, and the protected-call epilogue.
    pub fn generate(&self) -> Result<String, GenerateError> {
        let buckets = Buckets::classify(self.scene);
        let counts = buckets.counts(self.scene.block_count());

        if !self.preview && buckets.events.is_empty() {
            tracing::warn!("generation aborted: no event blocks in scene");
            return Err(GenerateError::NoEntryBlocks);
        }

        tracing::debug!(
            blocks = self.scene.block_count(),
            connections = self.scene.connection_count(),
            preview = self.preview,
            "generating document"
        );

        let timestamp = self.timestamp.unwrap_or_else(Utc::now);
        let mut sections: Vec<String> = Vec::new();

        sections.push(runtime::document_header(
            &self.project_name,
            &self.settings,
            timestamp,
            &counts,
        ));

        if !buckets.variables.is_empty() {
            sections.push("\n-- VARIABLE DECLARATIONS --".to_string());
            for block in &buckets.variables {
                sections.push(self.resolve_block(block, 0)?);
            }
        }

        if !buckets.functions.is_empty() {
            sections.push("\n-- FUNCTION DEFINITIONS --".to_string());
            for block in &buckets.functions {
                sections.push(self.complete_code(block)?);
            }
        }

        if !buckets.quantum.is_empty() {
            sections.push(format!("\n{}", runtime::QUANTUM_RUNTIME));
        }

        sections.push("\n-- MAIN EXECUTION --".to_string());
        sections.push("local function main()".to_string());

        let main_sections: [(&str, &[&Block]); 4] = [
            ("EVENT HANDLERS", &buckets.events),
            ("CONTROL STRUCTURES", &buckets.controls),
            ("MATH OPERATIONS", &buckets.math),
            ("QUANTUM OPERATIONS", &buckets.quantum),
        ];
        for (label, blocks) in main_sections {
            if blocks.is_empty() {
                continue;
            }
            sections.push(format!("\n    -- {} --", label));
            for block in blocks {
                sections.push(self.resolve_block(block, 1)?);
            }
        }

        let actions: Vec<&Block> = self
            .scene
            .blocks()
            .filter(|b| b.block_type == BlockType::Action)
            .collect();
        if !actions.is_empty() {
            sections.push("\n    -- ACTIONS --".to_string());
            for block in &actions {
                sections.push(self.resolve_block(block, 1)?);
            }
        }

        sections.push("end\n".to_string());
        sections.push(format!("\n{}", runtime::ERROR_HANDLING_EPILOGUE));

        let document = sections.join("\n");
        tracing::debug!(bytes = document.len(), "document generated");
        Ok(document)
    }

    /// Resolves one block's text fragment at the given indent level.
    ///
    /// Deterministic: a fixed template and fixed wiring always produce the
    /// same text. Diamond-shaped reuse of an upstream block is legal; only a
    /// block feeding back into its own inputs is an error.
    pub fn resolve_block(&self, block: &Block, indent: usize) -> Result<String, GenerateError> {
        let mut stack = Vec::new();
        self.resolve(block, indent, &mut stack)
    }

    fn resolve(
        &self,
        block: &Block,
        indent: usize,
        stack: &mut Vec<BlockId>,
    ) -> Result<String, GenerateError> {
        if stack.contains(block.id()) {
            return Err(GenerateError::CyclicGraph {
                block_id: block.id().to_string(),
            });
        }

        let mut code = if block.template.is_empty() && block.block_type != BlockType::Event {
            block.template_key().default_template(&block.title)
        } else {
            block.template.clone()
        };

        if code.is_empty() {
            // No template at all: a comment line stands in for code.
            let mut comment = format!("-- {} block", block.title);
            if !block.description.is_empty() {
                comment.push_str(": ");
                comment.push_str(&block.description);
            }
            return Ok(format!("{}{}", "    ".repeat(indent), comment));
        }

        stack.push(block.id().clone());
        for socket in block.input_sockets() {
            let placeholder = format!("{{{}}}", socket.name);
            if !code.contains(placeholder.as_str()) {
                continue;
            }
            let socket_ref = SocketRef::new(block.id().clone(), socket.name.clone());
            let replacement = match self
                .scene
                .peer_of(&socket_ref)
                .and_then(|peer| self.scene.block(&peer.block))
            {
                Some(peer_block) => {
                    let resolved = self.resolve(peer_block, indent, stack)?;
                    resolved.trim().to_string()
                }
                None => socket.data_type.default_literal().to_string(),
            };
            code = code.replace(placeholder.as_str(), &replacement);
        }
        stack.pop();

        Ok(reindent(&code, indent))
    }

    /// A block's standalone "complete" form: an identifying comment, and for
    /// function blocks the named function wrapper plus an invocation line
    /// when the block is flagged as main.
    pub fn complete_code(&self, block: &Block) -> Result<String, GenerateError> {
        let mut out = format!("-- Block: {} (ID: {})\n", block.title, block.id());
        if block.block_type == BlockType::Function {
            let name = block.function_name();
            out.push_str(&format!("function {}({})\n", name, block.parameters()));
            out.push_str(&self.resolve_block(block, 1)?);
            out.push_str("\nend\n");
            if block.is_main() {
                out.push_str(&format!("\n{}()", name));
            }
        } else {
            out.push_str(&self.resolve_block(block, 0)?);
        }
        Ok(out)
    }
}

/// Rebalances indentation line by line without parsing Lua.
///
/// The counter starts at `base`; a line opening with `end`/`else`/`elseif`
/// dedents before it is emitted (floor zero), a line closing with `then` or
/// `do`, or opening with `function`, indents after. Raw template indentation
/// is discarded.
fn reindent(code: &str, base: usize) -> String {
    let mut level = base;
    let mut lines: Vec<String> = Vec::new();
    for raw in code.lines() {
        let line = raw.trim();
        if line.is_empty() {
            lines.push(String::new());
            continue;
        }
        if line.starts_with("end") || line.starts_with("else") || line.starts_with("elseif") {
            level = level.saturating_sub(1);
        }
        lines.push(format!("{}{}", "    ".repeat(level), line));
        if line.ends_with("then") || line.ends_with("do") || line.starts_with("function") {
            level += 1;
        }
    }
    lines.join("\n")
}
