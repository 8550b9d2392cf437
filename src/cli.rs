//! Minimal CLI: check | dump over interchange graph files
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::interchange::InterchangeGraph;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// import serialized interchange type graphs and either validate them or dump the native view
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// parse and import every input graph, report a per-file verdict
    Check(CheckArgs),
    /// import one graph and print a JSON view of the resolved native graph
    Dump(DumpArgs),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select the graph subnode in each document (e.g. /payload/graph)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct CheckArgs {
    #[command(flatten)]
    input_settings: InputSettings,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct DumpArgs {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Read one graph file, descending to `--json-pointer` first if given.
    fn load_graph(&self, path: &Path) -> Result<InterchangeGraph> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        match self.json_pointer.as_deref() {
            None => crate::path_de::from_str_with_path(&source)
                .with_context(|| format!("parsing {}", path.display())),
            Some(pointer) => {
                let document: serde_json::Value = serde_json::from_str(&source)
                    .with_context(|| format!("parsing {}", path.display()))?;
                let node = document.pointer(pointer).with_context(|| {
                    format!("no node at JSON pointer {pointer} in {}", path.display())
                })?;
                crate::path_de::from_value_with_path(node.clone())
                    .with_context(|| format!("parsing {} at {pointer}", path.display()))
            }
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Check(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let paths = resolve_file_path_patterns(&target.input_settings.input)?;
                let mut failures = 0usize;
                for path in &paths {
                    match check_one(&target.input_settings, path) {
                        Ok((toplevel_count, composite_count)) => {
                            println!(
                                "{} {}: {toplevel_count} top-level type(s), {composite_count} composite(s)",
                                "ok".green().bold(),
                                path.display(),
                            );
                        }
                        Err(error) => {
                            failures += 1;
                            println!("{} {}: {error:#}", "error".red().bold(), path.display());
                        }
                    }
                }
                if failures > 0 {
                    bail!("{failures} of {} input graph(s) failed to import", paths.len());
                }
                Ok(())
            }
            Command::Dump(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let paths = resolve_file_path_patterns(&target.input_settings.input)?;
                let [path] = paths.as_slice() else {
                    bail!("dump expects exactly one input graph, got {}", paths.len());
                };

                let graph = target.input_settings.load_graph(path)?;
                let toplevels = crate::import::import_graph(&graph)
                    .with_context(|| format!("importing {}", path.display()))?;
                let view = crate::emit::emit_graph(&toplevels);
                let view_src = serde_json::to_string_pretty(&view)?;

                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("creating {}", parent.display()))?;
                    }
                    std::fs::write(out, &view_src)
                        .with_context(|| format!("writing {}", out.display()))?;
                } else {
                    println!("{view_src}");
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn check_one(settings: &InputSettings, path: &Path) -> Result<(usize, usize)> {
    let graph = settings.load_graph(path)?;
    let toplevels = crate::import::import_graph(&graph)
        .with_context(|| format!("importing {}", path.display()))?;
    let composite_count = graph.composites.iter().flatten().count();
    Ok((toplevels.len(), composite_count))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            // Treat as a glob pattern
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // Treat as a literal path
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
