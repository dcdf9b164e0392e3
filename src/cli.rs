//! Minimal CLI: AST JSON → (schema | tree)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::ast::SourceFile;
use crate::emit::{self, EmitOptions};
use crate::extract::{SchemaSet, extract};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// extract documented schemas from parsed TypeScript type declarations (AST as JSON)
#[derive(Parser, Debug)]
#[command(version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,

    /// more logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// extract and print the schema set as JSON
    Schema(SchemaOut),
    /// extract and print an indented tree with decoded annotations
    Tree(TreeOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JQ pre-process filter selecting the AST document (must yield exactly one value)
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// include `sourceRange` on every node
    #[arg(long)]
    with_ranges: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct TreeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// never colorize
    #[arg(long)]
    no_color: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_sources(&self) -> Result<Vec<(PathBuf, SourceFile)>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        source_paths
            .into_iter()
            .map(|path| {
                let file = self.load_one(&path)?;
                Ok((path, file))
            })
            .collect()
    }

    fn load_one(&self, source_path: &Path) -> Result<SourceFile> {
        let source = std::fs::read_to_string(source_path)
            .with_context(|| format!("failed to read source file {}", source_path.display()))?;
        let file = match self.jq_expr.as_ref() {
            None => crate::path_de::from_str_with_path::<SourceFile>(&source)
                .with_context(|| format!("invalid AST document {}", source_path.display()))?,
            Some(jq_expr) => {
                let json_value = serde_json::from_str::<serde_json::Value>(&source)
                    .with_context(|| format!("failed to parse JSON source file {}", source_path.display()))?;
                let selected = crate::jq_exec::select_one(jq_expr, &json_value).with_context(|| {
                    format!("failed to apply jq expression to source file {}", source_path.display())
                })?;
                crate::path_de::from_value_with_path::<SourceFile>(selected)
                    .with_context(|| format!("invalid AST document {}", source_path.display()))?
            }
        };
        debug!(
            path = %source_path.display(),
            declarations = file.declarations.len(),
            comments = file.comments.len(),
            "loaded"
        );
        Ok(file)
    }

    /// Each file is its own extraction run; runs share nothing, so they go in parallel.
    fn extract_all(&self) -> Result<Vec<(String, SchemaSet)>> {
        let sources = self.load_sources()?;
        sources
            .par_iter()
            .map(|(path, file)| {
                let set = extract(file)
                    .with_context(|| format!("schema extraction failed for {}", path.display()))?;
                info!(path = %path.display(), declarations = set.len(), "extracted");
                Ok((path.display().to_string(), set))
            })
            .collect()
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Schema(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let sets = target.input_settings.extract_all()?;
                let opts = EmitOptions { include_ranges: target.with_ranges };
                let schema = match sets.as_slice() {
                    [(_, set)] => emit::schema_set_to_json(set, &opts),
                    many => serde_json::Value::Object(
                        many.iter()
                            .map(|(path, set)| (path.clone(), emit::schema_set_to_json(set, &opts)))
                            .collect(),
                    ),
                };
                let schema_src = serde_json::to_string_pretty(&schema)?;
                write_output(target.out.as_deref(), &schema_src)
            }
            Command::Tree(target) => {
                if target.no_color {
                    colored::control::set_override(false);
                }
                let sets = target.input_settings.extract_all()?;
                let multiple = sets.len() > 1;
                for (path, set) in &sets {
                    if multiple {
                        println!("{}", format!("== {path}").bold());
                    }
                    print!("{}", emit::render_tree(set));
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, contents: &str) -> Result<()> {
    let Some(out) = out else {
        println!("{contents}");
        return Ok(());
    };
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, contents).with_context(|| format!("failed to write {}", out.display()))
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
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["a.json", "dir/b.json"]).unwrap();
        assert_eq!(paths, [PathBuf::from("a.json"), PathBuf::from("dir/b.json")]);
    }

    #[test]
    fn empty_glob_is_an_error() {
        let err = resolve_file_path_patterns(["/definitely/not/here/*.json"]).unwrap_err();
        assert!(err.to_string().contains("matched no files"));
    }

    #[test]
    fn parses_schema_subcommand() {
        let cli = CommandLineInterface::try_parse_from([
            "tsdoc-schema", "-vv", "schema", "-i", "a.json", "b.json", "--with-ranges",
        ])
        .unwrap();
        assert_eq!(cli.verbosity(), 2);
        match cli.cmd {
            Command::Schema(s) => {
                assert_eq!(s.input_settings.input, ["a.json", "b.json"]);
                assert!(s.with_ranges);
                assert!(s.out.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn input_is_required() {
        assert!(CommandLineInterface::try_parse_from(["tsdoc-schema", "tree"]).is_err());
    }
}
