use clap::{Parser, ValueEnum};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tsumiki::prelude::*;

/// CLI-specific engine selector for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum EngineCli {
    Lua,
    Luajit,
}

/// A block-graph to Lua code generator CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the .blockproj project file
    project_path: String,

    /// Write the generated Lua to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Export into this directory with an engine-specific header
    #[arg(short, long)]
    export_dir: Option<String>,

    /// Generate in preview mode (no entry-point requirement)
    #[arg(short, long)]
    preview: bool,

    /// Override the engine stored in the project settings
    #[arg(long, value_enum)]
    engine: Option<EngineCli>,
}

fn main() {
    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. Load the project document ---
    let load_start = Instant::now();
    let document = ProjectDocument::from_file(&cli.project_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load project '{}': {}",
            &cli.project_path, e
        ))
    });
    let load_duration = load_start.elapsed();

    let project_name = if document.metadata.name.is_empty() {
        Path::new(&cli.project_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UntitledProject")
            .to_string()
    } else {
        document.metadata.name.clone()
    };

    let mut settings = document.engine_settings;
    if let Some(engine) = cli.engine {
        settings.engine = match engine {
            EngineCli::Lua => Engine::Lua,
            EngineCli::Luajit => Engine::Luajit,
        };
    }

    let scene = document.into_scene();
    println!(
        "Loaded '{}': {} blocks, {} connections",
        project_name,
        scene.block_count(),
        scene.connection_count()
    );

    // --- 2. Generate ---
    let generate_start = Instant::now();
    let code = CodeGenerator::builder(&scene)
        .project_name(&project_name)
        .engine_settings(settings)
        .preview(cli.preview)
        .build()
        .generate()
        .unwrap_or_else(|e| exit_with_error(&format!("Generation failed: {}", e)));
    let generate_duration = generate_start.elapsed();

    println!(
        "Generated {} bytes of Lua in {:?}",
        code.len(),
        generate_duration
    );

    // --- 3. Deliver ---
    if let Some(export_dir) = &cli.export_dir {
        let exporter = ScriptExporter::new(export_dir);
        let path = exporter
            .export(&code, &project_name, settings.engine)
            .unwrap_or_else(|e| exit_with_error(&format!("Export failed: {}", e)));
        println!("Exported to '{}'", path.display());
    } else if let Some(output) = &cli.output {
        fs::write(output, &code)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", output, e)));
        println!("Wrote '{}'", output);
    } else {
        println!("\n{}", code);
    }

    println!("\n--- Summary ---");
    println!("Engine:        {}", settings.engine);
    println!("File Loading:  {:?}", load_duration);
    println!("Generation:    {:?}", generate_duration);
    println!("Total:         {:?}", total_start.elapsed());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
