// FILE: src/cli/handlers.rs
use crate::{
    check_file,
    classify::Partition,
    cli::OutputFormat, // Import from the `cli` module
    generate_file_with_options, ComponentModel, GenerationStats, GeneratorError, GeneratorOptions, Result,
};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Serialize;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Instant;

// --- GENERATE ---
pub fn handle_generate_command(cli: &super::Cli, matches: &clap::ArgMatches) -> Result<()> {
    let input_path = cli.input_path(matches);
    let output_path = cli.output_path(matches);
    let options = cli.build_generator_options(matches);

    if matches.get_flag("watch") {
        watch_and_generate(&input_path, &output_path, options)
    } else {
        let stats = generate_once(&input_path, &output_path, &options)?;
        if matches.get_flag("stats") {
            print_detailed_stats(&stats);
        }
        Ok(())
    }
}

pub fn generate_with_defaults(cli: &super::Cli) -> Result<()> {
    let input_path = cli.input_path(&clap::ArgMatches::default());
    let output_path = cli.output_path(&clap::ArgMatches::default());
    generate_once(&input_path, &output_path, &cli.base_options())?;
    Ok(())
}

fn generate_once(input_path: &str, output_path: &str, options: &GeneratorOptions) -> Result<GenerationStats> {
    println!("🔨 Generating {} -> {}", input_path, output_path);

    let start = Instant::now();
    let stats = generate_file_with_options(input_path, output_path, options)?;

    println!("✅ Generation successful!");
    println!("   Components: {}", stats.component_count);
    println!("   Output: {} bytes", stats.output_size);
    println!("   Time: {:.2}ms", start.elapsed().as_millis());

    Ok(stats)
}

fn watch_and_generate(input_path: &str, output_path: &str, options: GeneratorOptions) -> Result<()> {
    println!("👀 Watching {} for changes...", input_path);

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                if let Err(e) = tx.send(event) {
                    eprintln!("Watch error: {}", e);
                }
            }
        },
        notify::Config::default(),
    )
    .map_err(|e| {
        GeneratorError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to create file watcher: {}", e),
        ))
    })?;

    watcher
        .watch(Path::new(input_path), RecursiveMode::NonRecursive)
        .map_err(|e| {
            GeneratorError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to watch file: {}", e),
            ))
        })?;

    if let Err(e) = generate_file_with_options(input_path, output_path, &options) {
        eprintln!("❌ Initial generation failed: {}", e);
    } else {
        println!("✅ Initial generation successful");
    }

    loop {
        match rx.recv() {
            Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                println!("🔄 Model changed, regenerating...");
                match generate_file_with_options(input_path, output_path, &options) {
                    Ok(stats) => {
                        println!(
                            "✅ Regenerated successfully ({} bytes, {}ms)",
                            stats.output_size, stats.generate_time_ms
                        );
                    }
                    Err(e) => eprintln!("❌ Generation failed: {}", e),
                }
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Watch error: {}", e);
                break;
            }
        }
    }

    Ok(())
}

fn print_detailed_stats(stats: &GenerationStats) {
    println!("\n📊 Generation Statistics:");
    println!("   Components: {}", stats.component_count);
    println!("   Shared types: {}", stats.shared_type_count);
    println!("   Attribute properties: {}", stats.attribute_property_count);
    println!("   Children properties: {}", stats.children_property_count);
    println!("   Attached members: {}", stats.member_count);
    println!("   Output size: {} bytes", stats.output_size);
    println!("   Generation time: {}ms", stats.generate_time_ms);
}

// --- CHECK ---
pub fn handle_check_command(cli: &super::Cli, matches: &clap::ArgMatches) -> Result<()> {
    let input_path = cli.input_path(matches);
    let output_path = cli.output_path(matches);

    println!("🔍 Checking {} against {}", output_path, input_path);
    if check_file(&input_path, &output_path, &cli.base_options())? {
        println!("✅ {} is up to date", output_path);
        Ok(())
    } else {
        println!("❌ {} is out of date", output_path);
        Err(GeneratorError::Outdated { path: output_path })
    }
}

// --- ANALYZE ---
#[derive(Debug, Serialize)]
struct ComponentReport {
    name: String,
    tag: String,
    children: &'static str,
    attributes: Vec<String>,
    content: Vec<String>,
    harvested: Vec<String>,
    members: Vec<String>,
}

pub fn handle_analyze_command(cli: &super::Cli, matches: &clap::ArgMatches) -> Result<()> {
    let input_path = cli.input_path(matches);
    let format = matches.get_one::<OutputFormat>("format").unwrap_or(&OutputFormat::Text);

    println!("🔬 Analyzing {}", input_path);

    let model = ComponentModel::load(&input_path)?;
    model.validate()?;
    let reports = component_reports(&model, &cli.base_options())?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reports).map_err(|e| GeneratorError::Io(e.into()))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            for report in &reports {
                println!("{} <{}> children: {}", report.name, report.tag, report.children);
                println!("   attributes: {}", report.attributes.join(", "));
                println!("   content: {}", report.content.join(", "));
                if !report.harvested.is_empty() {
                    println!("   harvested: {}", report.harvested.join(", "));
                }
                if !report.members.is_empty() {
                    println!("   members: {}", report.members.join(", "));
                }
            }
        }
    }

    Ok(())
}

fn component_reports(model: &ComponentModel, options: &GeneratorOptions) -> Result<Vec<ComponentReport>> {
    model
        .standard_components()
        .map(|component| {
            let partition = Partition::of(component)?;
            Ok(ComponentReport {
                name: component.name.clone(),
                tag: format!("{}:{}", options.element_namespace, component.internal_name),
                children: component.children.kind(),
                attributes: partition.attributes.iter().map(|property| property.name.clone()).collect(),
                content: partition.children.iter().map(|property| property.name.clone()).collect(),
                harvested: partition
                    .harvested_refs
                    .iter()
                    .map(|reference| reference.component_name.clone())
                    .collect(),
                members: component
                    .children
                    .members()
                    .map(|members| {
                        members
                            .merged()
                            .iter()
                            .map(|(name, reference)| format!("{}.{} = {}", component.name, name, reference.component_name))
                            .collect()
                    })
                    .unwrap_or_default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_component_reports() {
        let model = ComponentModel::from_json(
            &json!([
                { "type": "root", "sharedTypes": {} },
                { "type": "standard", "name": "Item", "internalName": "item", "props": [], "children": { "type": "string" } },
                { "type": "standard", "name": "Grid", "internalName": "grid", "children": {
                    "type": "members", "ordered_members": { "Item": { "componentName": "Item" } }, "per_type_members": {}
                  }, "props": [
                    { "name": "columns", "type": { "type": "number" }, "optional": "yes" },
                    { "name": "emptyView", "type": { "type": "component", "reference": { "componentName": "Item" } }, "optional": "yes" }
                  ] }
            ])
            .to_string(),
        )
        .unwrap();

        let reports = component_reports(&model, &GeneratorOptions::default()).unwrap();
        assert_eq!(reports.len(), 2);
        let grid = &reports[1];
        assert_eq!(grid.tag, "gauntlet:grid");
        assert_eq!(grid.children, "members");
        assert_eq!(grid.attributes, vec!["columns"]);
        assert_eq!(grid.content, vec!["emptyView"]);
        assert_eq!(grid.harvested, vec!["Item"]);
        assert_eq!(grid.members, vec!["Grid.Item = Item"]);
    }

    #[test]
    fn test_check_reports_outdated() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let input = temp_dir.path().join("model.json");
        let output = temp_dir.path().join("components.tsx");
        std::fs::write(
            &input,
            json!([
                { "type": "root", "sharedTypes": {} },
                { "type": "standard", "name": "Text", "internalName": "text", "props": [], "children": { "type": "string" } }
            ])
            .to_string(),
        )
        .unwrap();

        let cli = super::super::Cli::new();
        let args = [
            "tsxgen",
            "check",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ];
        let matches = cli.build_cli().get_matches_from(args);
        let (_, check_matches) = matches.subcommand().unwrap();

        let err = handle_check_command(&cli, check_matches).unwrap_err();
        assert!(matches!(err, GeneratorError::Outdated { .. }));

        generate_file_with_options(&input, &output, &GeneratorOptions::default()).unwrap();
        assert!(handle_check_command(&cli, check_matches).is_ok());
    }
}
