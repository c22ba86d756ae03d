//! Fixed Lua text emitted verbatim into generated documents: the simulated
//! quantum runtime and the protected-call epilogue, plus the document header
//! builder.

use super::BucketCounts;
use crate::project::EngineSettings;
use chrono::{DateTime, Utc};

/// Support library prepended once when the quantum bucket is non-empty.
/// Emitted output, not program logic: generated scripts call into it.
pub(super) const QUANTUM_RUNTIME: &str = r#"-- QUANTUM HELPER FUNCTIONS --
-- These are simulated quantum operations for demonstration

local quantum_states = {}

function quantum_state(n_qubits)
    -- Create a simulated quantum state
    local state = {
        n_qubits = n_qubits,
        amplitudes = {},
        probabilities = {}
    }

    -- Initialize to |0⟩^n
    local total_states = 2^n_qubits
    for i = 0, total_states - 1 do
        state.amplitudes[i] = complex.new(i == 0 and 1 or 0, 0)
    end

    table.insert(quantum_states, state)
    print(string.format("Created quantum state with %d qubits", n_qubits))
    return #quantum_states
end

function apply_gate(state_id, gate_name, target_qubit)
    -- Apply a simulated quantum gate
    local state = quantum_states[state_id]
    if not state then
        error("Invalid quantum state ID")
    end

    print(string.format("Applying gate '%s' to qubit %d in state %d",
          gate_name, target_qubit, state_id))
    return state_id
end

function measure(state_id)
    -- Simulate measurement
    local state = quantum_states[state_id]
    if not state then
        error("Invalid quantum state ID")
    end

    -- Simulate probabilistic measurement
    local result = math.random(0, 2^state.n_qubits - 1)
    print(string.format("Measured state %d: |%d⟩", state_id, result))
    return result
end

-- Complex number support for quantum simulations
local complex = {}
complex.__index = complex

function complex.new(real, imag)
    return setmetatable({real = real or 0, imag = imag or 0}, complex)
end

function complex:__tostring()
    return string.format("%.3f + %.3fi", self.real, self.imag)
end

function complex:conjugate()
    return complex.new(self.real, -self.imag)
end

function complex.__add(a, b)
    return complex.new(a.real + b.real, a.imag + b.imag)
end

function complex.__mul(a, b)
    return complex.new(
        a.real * b.real - a.imag * b.imag,
        a.real * b.imag + a.imag * b.real
    )
end"#;

/// Epilogue appended to every document: runs `main` under `pcall`, prints a
/// targeted hint for known error classes, and returns an explicit exit code
/// for external callers.
pub(super) const ERROR_HANDLING_EPILOGUE: &str = r#"-- ERROR HANDLING WRAPPER --
local success, err = pcall(main)
if not success then
    print("\n=== ERROR ===")
    print("Error during execution:", err)

    -- Provide helpful hints based on error type
    if string.find(err, "attempt to perform arithmetic") then
        print("Hint: Check your math operations for type mismatches")
    elseif string.find(err, "attempt to call") then
        print("Hint: Make sure you're calling functions that exist")
    elseif string.find(err, "not enough memory") then
        print("Hint: Try increasing memory limit in engine settings")
    elseif string.find(err, "syntax error") then
        print("Hint: Check for missing parentheses, brackets, or quotes")
    end

    print("\nStack trace:")
    debug.traceback(err, 2)
else
    print("\n=== SUCCESS ===")
    print("Execution completed successfully")

    -- Show statistics if available
    if quantum_states and #quantum_states > 0 then
        print(string.format("Quantum states created: %d", #quantum_states))
    end
end

print("\n=== End of Program ===")

-- Return success code for external calling
if success then
    return 0
else
    return 1
end"#;

/// The comment banner and boot prints that open every generated document.
pub(super) fn document_header(
    project_name: &str,
    settings: &EngineSettings,
    timestamp: DateTime<Utc>,
    counts: &BucketCounts,
) -> String {
    let engine = settings.engine.name().to_uppercase();
    let stamp = timestamp.format("%Y-%m-%d %H:%M:%S");
    let enabled = |flag: bool| if flag { "Enabled" } else { "Disabled" };

    format!(
        "-- Generated by the Tsumiki block editor\n\
         -- Project: {project_name}\n\
         -- Engine: {engine}\n\
         -- Generated: {stamp}\n\
         -- Memory Limit: {}MB\n\
         -- JIT: {}\n\
         -- Debug: {}\n\
         -- Blocks: {} total ({} events, {} vars, {} funcs, {} controls, {} math, {} quantum)\n\
         \n\
         print(\"=== {project_name} ===\")\n\
         print(\"Engine: {engine}\")\n\
         print(\"Generated: {stamp}\")\n\
         print(\"Total blocks: {}\")",
        settings.memory_limit,
        enabled(settings.enable_jit),
        enabled(settings.debug_mode),
        counts.total,
        counts.events,
        counts.variables,
        counts.functions,
        counts.controls,
        counts.math,
        counts.quantum,
        counts.total,
    )
}
