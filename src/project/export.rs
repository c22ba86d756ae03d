//! Exporting generated Lua to disk: engine-specific header comments and
//! timestamped file naming, one subdirectory per engine.

use super::Engine;
use crate::error::ProjectError;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes generated scripts under an exports directory.
pub struct ScriptExporter {
    exports_dir: PathBuf,
}

impl ScriptExporter {
    pub fn new(exports_dir: impl Into<PathBuf>) -> Self {
        Self {
            exports_dir: exports_dir.into(),
        }
    }

    /// Writes `code` as `<stem>_<timestamp>.lua` under the engine's export
    /// subdirectory, prefixed with the engine header. Returns the path
    /// written.
    pub fn export(
        &self,
        code: &str,
        filename: &str,
        engine: Engine,
    ) -> Result<PathBuf, ProjectError> {
        let save_dir = self.exports_dir.join(engine.name());
        fs::create_dir_all(&save_dir).map_err(|e| ProjectError::Io {
            path: save_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let now = Utc::now();
        let stem = Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("script");
        let path = save_dir.join(format!("{}_{}.lua", stem, now.format("%Y%m%d_%H%M%S")));

        let complete = format!("{}\n\n{}", engine_header(engine, now), code);
        fs::write(&path, complete).map_err(|e| ProjectError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::info!(path = %path.display(), engine = %engine, "script exported");
        Ok(path)
    }
}

/// The comment block prefixed to exported scripts. The LuaJIT variant also
/// carries the JIT enable preamble.
pub fn engine_header(engine: Engine, timestamp: DateTime<Utc>) -> String {
    let stamp = timestamp.format("%Y-%m-%d %H:%M:%S");
    let platform = platform_info();

    match engine {
        Engine::Luajit => format!(
            "-- LuaJIT Code\n\
             -- Generated: {stamp}\n\
             -- Engine: LuaJIT 2.1.0-beta3\n\
             -- Platform: {platform}\n\
             \n\
             -- LuaJIT specific optimizations\n\
             if jit then\n\
             \x20   jit.on()\n\
             \x20   print(\"LuaJIT JIT compiler enabled\")\n\
             end"
        ),
        Engine::Lua => format!(
            "-- Lua Code\n\
             -- Generated: {stamp}\n\
             -- Engine: Lua 5.4\n\
             -- Platform: {platform}"
        ),
    }
}

fn platform_info() -> String {
    format!(
        "{} {} ({})",
        std::env::consts::OS,
        std::env::consts::ARCH,
        std::env::consts::FAMILY
    )
}
