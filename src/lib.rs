//! Component Model Binding Generator
//!
//! Turns the declarative component model of a plugin-facing UI library into
//! one TSX module of typed component bindings.
//!
//! # Features
//!
//! - Typed props interfaces for every component
//! - Forwarding function values that build one low-level host element each
//! - Global `JSX.IntrinsicElements` registry for the host element tags
//! - Shared enums, records and unions declared once on the root component
//! - Static sub-components attached as qualified members (`List.Item`)
//! - Byte-identical output for an unchanged model
//!
//! # Basic Usage
//!
//! ```no_run
//! use tsxgen::{generate_file, Result};
//!
//! fn main() -> Result<()> {
//!     generate_file("component_model.json", "gen/components.tsx")?;
//!     Ok(())
//! }
//! ```
//!
//! # Generation Pipeline
//!
//! 1. **Load**: Deserialize the model, rejecting unknown type tags
//! 2. **Validate**: Single root, unique names, resolvable references
//! 3. **Assemble**: Build the syntax tree (imports, helpers, registry, shared types, components)
//! 4. **Print**: Render the tree to text
//! 5. **Write**: Create the output directory if needed and write the file

pub mod assembler;
pub mod ast;
pub mod children;
pub mod classify;
pub mod cli;
pub mod component;
pub mod error;
pub mod intrinsic;
pub mod model;
pub mod printer;
pub mod shared;
pub mod type_renderer;

use serde::Serialize;
use std::path::Path;
use std::time::Instant;

// Re-export commonly used types and functions
pub use ast::SourceFile;
pub use classify::{classify, collect_component_refs, Partition, Placement};
pub use cli::Cli;
pub use error::{GeneratorError, Result};
pub use model::{
    Argument, Children, Component, ComponentModel, ComponentRef, Members, Optional, Property, PropertyType,
    SharedType, StandardComponent,
};
pub use printer::{print_file, print_type};
pub use type_renderer::render_type;

/// Generator version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Model location used when none is given
pub const DEFAULT_INPUT_PATH: &str = "./component_model.json";

/// Output location used when none is given
pub const DEFAULT_OUTPUT_PATH: &str = "../api/src/gen/components.tsx";

/// Generation options and settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// JSX namespace of the host elements (`<gauntlet:list>`)
    pub element_namespace: String,

    /// Module the React types are imported from
    pub import_source: String,

    /// Prefix the intrinsic registry with an `@internal` comment
    pub mark_internal: bool,

    /// Log every phase at info level
    pub debug_mode: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            element_namespace: "gauntlet".to_string(),
            import_source: "react".to_string(),
            mark_internal: true,
            debug_mode: false,
        }
    }
}

/// Generation statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationStats {
    /// Number of components emitted
    pub component_count: usize,

    /// Number of shared types emitted
    pub shared_type_count: usize,

    /// Properties forwarded as element attributes
    pub attribute_property_count: usize,

    /// Properties passed as nested content
    pub children_property_count: usize,

    /// Sub-components attached to parent function values
    pub member_count: usize,

    /// Generated source size in bytes
    pub output_size: u64,

    /// Generation time in milliseconds
    pub generate_time_ms: u64,
}

/// Validate and render a loaded model
pub fn generate_source(model: &ComponentModel, options: &GeneratorOptions) -> Result<(String, GenerationStats)> {
    let start_time = Instant::now();

    log::debug!("Validating component model ({} entries)", model.components.len());
    model.validate()?;

    let (file, mut stats) = assembler::assemble(model, options)?;
    log::debug!("Assembled {} top-level statements", file.len());

    let source = printer::print_file(&file);
    stats.output_size = source.len() as u64;
    stats.generate_time_ms = start_time.elapsed().as_millis() as u64;

    Ok((source, stats))
}

/// Render a model given as JSON text
pub fn generate_from_str(json: &str, options: &GeneratorOptions) -> Result<String> {
    let model = ComponentModel::from_json(json)?;
    let (source, _stats) = generate_source(&model, options)?;
    Ok(source)
}

/// Main generator entry point with default options
pub fn generate_file(input_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<GenerationStats> {
    generate_file_with_options(input_path, output_path, &GeneratorOptions::default())
}

/// Generate with custom options. Nothing is written unless generation succeeds.
pub fn generate_file_with_options(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    options: &GeneratorOptions,
) -> Result<GenerationStats> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();

    if options.debug_mode {
        log::info!("{} v{}", NAME, VERSION);
        log::info!("Generating '{}' from '{}'...", output_path.display(), input_path.display());
        log::debug!("Generator options: {:?}", options);
    }

    let model = ComponentModel::load(input_path)?;
    let (source, stats) = generate_source(&model, options)?;
    assembler::write_output(output_path, &source)?;

    log::info!(
        "Generated {} components and {} shared types ({} bytes) in {}ms",
        stats.component_count,
        stats.shared_type_count,
        stats.output_size,
        stats.generate_time_ms
    );
    if options.debug_mode {
        log::debug!("Full stats: {:?}", stats);
    }

    Ok(stats)
}

/// True when `output_path` already holds exactly what the model generates
pub fn check_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    options: &GeneratorOptions,
) -> Result<bool> {
    let model = ComponentModel::load(input_path)?;
    let (source, _stats) = generate_source(&model, options)?;

    match std::fs::read_to_string(output_path.as_ref()) {
        Ok(existing) => Ok(existing == source),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(GeneratorError::Io(e)),
    }
}
