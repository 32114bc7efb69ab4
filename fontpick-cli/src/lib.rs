//! fontpick CLI

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

use fontpick_core::descriptor::FontDescriptor;
use fontpick_core::manager::FontManager;
use fontpick_core::output::{write_json_pretty, write_ndjson};
use fontpick_core::query::FaceQuery;
use fontpick_core::scan::system_font_roots;

mod server;

/// CLI entrypoint for fontpick.
#[derive(Debug, Parser)]
#[command(
    name = "fontpick",
    about = "Find the best-matching installed font, or a substitute that can render your text"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every available font face
    List(ListArgs),
    /// Find faces matching a partial descriptor (or the single best match)
    Find(FindArgs),
    /// Substitute a font with one that covers a text sample
    Substitute(SubstituteArgs),
    /// Serve the same operations over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    format: FormatArgs,
}

#[derive(Debug, Args)]
struct FindArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Exact font file path to match
    #[arg(long = "font-path", value_hint = ValueHint::FilePath)]
    font_path: Option<String>,

    /// Postscript name to match
    #[arg(short = 'p', long = "postscript-name")]
    postscript_name: Option<String>,

    /// Family name to match (case-insensitive)
    #[arg(short = 'F', long = "family")]
    family: Option<String>,

    /// Style name to match ("Bold Italic")
    #[arg(short = 's', long = "style")]
    style: Option<String>,

    /// Weight to match (100-900, normal 400, bold 700)
    #[arg(short = 'w', long = "weight")]
    weight: Option<u16>,

    /// Width to match (1-9, condensed 3, normal 4, expanded 7)
    #[arg(short = 'W', long = "width")]
    width: Option<u8>,

    /// Match italic faces (use --italic=false for upright only)
    #[arg(long = "italic", num_args = 0..=1, default_missing_value = "true")]
    italic: Option<bool>,

    /// Match monospaced faces
    #[arg(long = "monospace", num_args = 0..=1, default_missing_value = "true")]
    monospace: Option<bool>,

    /// Resolve the single best match instead of listing exact matches
    #[arg(short = 'b', long = "best", action = ArgAction::SetTrue)]
    best: bool,

    #[command(flatten)]
    format: FormatArgs,
}

#[derive(Debug, Args)]
struct SubstituteArgs {
    /// Postscript name of the font to be replaced
    postscript_name: String,

    /// Text sample the result must be able to render
    text: String,

    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    format: FormatArgs,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Address to bind, e.g. 127.0.0.1:8734
    #[arg(long = "bind", default_value = "127.0.0.1:8734")]
    bind: String,
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Font directories to enumerate (defaults to the system font dirs)
    #[arg(value_hint = ValueHint::DirPath)]
    paths: Vec<PathBuf>,

    /// Include common system font directories automatically
    #[arg(long = "system-fonts", action = ArgAction::SetTrue)]
    system_fonts: bool,

    /// Follow symlinks while walking font directories
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,
}

#[derive(Debug, Args)]
struct FormatArgs {
    /// Emit a single JSON array (or object for single-result commands)
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::List(args) => run_list(args),
        Command::Find(args) => run_find(args),
        Command::Substitute(args) => run_substitute(args),
        Command::Serve(args) => run_serve(args),
    }
}

fn run_list(args: ListArgs) -> Result<()> {
    let manager = build_manager(&args.source)?;
    let faces = manager.available_fonts()?;
    emit_faces(&faces, &args.format)
}

fn run_find(args: FindArgs) -> Result<()> {
    let manager = build_manager(&args.source)?;
    let query = build_query(&args);

    if args.best {
        let face = manager.find_font(&query)?;
        emit_face(&face, &args.format)
    } else {
        let faces = manager.find_fonts(&query)?;
        emit_faces(&faces, &args.format)
    }
}

fn run_substitute(args: SubstituteArgs) -> Result<()> {
    let manager = build_manager(&args.source)?;
    let face = manager.substitute_font(&args.postscript_name, &args.text)?;
    emit_face(&face, &args.format)
}

fn run_serve(args: ServeArgs) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(server::serve(&args.bind))
}

fn build_manager(source: &SourceArgs) -> Result<FontManager> {
    let roots = gather_roots(source)?;
    Ok(FontManager::scanning(roots))
}

fn gather_roots(source: &SourceArgs) -> Result<Vec<PathBuf>> {
    let mut roots = source.paths.clone();

    if source.system_fonts || roots.is_empty() {
        roots.extend(system_font_roots()?);
    }

    roots.sort();
    roots.dedup();
    Ok(roots)
}

fn build_query(args: &FindArgs) -> FaceQuery {
    FaceQuery {
        path: args.font_path.clone(),
        postscript_name: args.postscript_name.clone(),
        family: args.family.clone(),
        style: args.style.clone(),
        weight: args.weight,
        width: args.width,
        italic: args.italic,
        monospace: args.monospace,
    }
}

fn emit_faces(faces: &[FontDescriptor], format: &FormatArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = match format.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => handle.is_terminal(),
    };

    if format.ndjson {
        write_ndjson(faces, &mut handle)
    } else if format.json {
        write_json_pretty(faces, &mut handle)
    } else {
        write_columns(faces, &mut handle, use_color)
    }
}

fn emit_face(face: &FontDescriptor, format: &FormatArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if format.ndjson {
        write_ndjson(std::slice::from_ref(face), &mut handle)
    } else {
        // a single face is always worth its full JSON record
        write_json_pretty(std::slice::from_ref(face), &mut handle)
    }
}

fn write_columns(faces: &[FontDescriptor], mut w: impl Write, color: bool) -> Result<()> {
    let rows: Vec<(String, String, String)> = faces
        .iter()
        .map(|face| {
            let path = face.path.display().to_string();
            let name = format!("{} {}", face.family, face.style);

            let traits = format!(
                "w:{:<3} wd:{}{}{}",
                face.weight,
                face.width,
                if face.italic { " italic" } else { "" },
                if face.monospace { " mono" } else { "" },
            );

            (path, name, traits)
        })
        .collect();

    let path_width = rows
        .iter()
        .map(|r| r.0.len())
        .max()
        .unwrap_or(0)
        .clamp(0, 120);
    let name_width = rows
        .iter()
        .map(|r| r.1.len())
        .max()
        .unwrap_or(0)
        .clamp(0, 80);

    for (path, name, traits) in rows {
        let padded_path = format!("{path:<path_width$}");
        let padded_name = format!("{name:<name_width$}");
        let rendered_path = apply_color(&padded_path, color, AnsiColor::Cyan);
        let rendered_name = apply_color(&padded_name, color, AnsiColor::Yellow);
        let rendered_traits = apply_color(&traits, color, AnsiColor::Green);

        writeln!(w, "{rendered_path}  {rendered_name}  {rendered_traits}")?;
    }

    Ok(())
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}
