// gclip - clipboard paste and copy against the demo grid

mod exit_codes;
mod prompt;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use gridclip_cli::{demo, path};
use gridclip_config::{PromptPolicy, Settings};
use gridclip_core::{CellClickAction, CopyType, Culture, Grid, PasteBlock, RowId, RowKind, RowParent};
use gridclip_engine::{
    copy_selection, paste_and_select, resolve_copy_type, validate_selection, AlwaysCancel,
    AlwaysProceed, Converter, GridModel, PasteStatus, SelectionError, INVALID_SELECTION_MESSAGE,
};
use gridclip_io::{clipboard, json};

use exit_codes::{
    EXIT_ERROR, EXIT_INVALID_SELECTION, EXIT_PASTE_CANCELLED, EXIT_SUCCESS, EXIT_USAGE,
};
use prompt::LinePrompt;

#[derive(Parser)]
#[command(name = "gclip")]
#[command(about = "Clipboard paste and copy for hierarchical grids")]
#[command(version)]
#[command(long_version = long_version())]
struct Cli {
    /// Settings file (default: <config dir>/gridclip/settings.json)
    #[arg(long, global = true, env = "GCLIP_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the demo grid
    #[command(after_help = "\
Examples:
  gclip demo
  gclip demo --rows 4 --json
  gclip demo --group-by NBool")]
    Demo {
        #[command(flatten)]
        grid: GridArgs,

        /// Print the grid as JSON
        #[arg(long)]
        json: bool,
    },

    /// Paste clipboard text into the demo grid
    #[command(after_help = "\
Rows are addressed as N (root row), N/DataItems/M (child row) or, with
--group-by, gN/M (row M under group row N). --text understands \\t and \\n.

Examples:
  gclip paste --at 0:Int --text '7\\ttrue\\n8\\tfalse' --on-prompt proceed
  printf '1\\t2\\n' | gclip paste --at 1/DataItems/0:Int --on-prompt cancel
  gclip paste --at 3:Double --input clip.txt --culture de-DE")]
    Paste {
        /// Anchor cell, ROW:COLUMN
        #[arg(long, value_name = "ROW:COLUMN")]
        at: String,

        /// Clipboard text file, '-' for stdin (the default)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Clipboard text given inline
        #[arg(long, conflicts_with = "input")]
        text: Option<String>,

        /// How to answer paste prompts (default: paste.onPrompt setting)
        #[arg(long, value_enum)]
        on_prompt: Option<OnPrompt>,

        /// Culture for numbers and dates (default: clipboard.culture setting)
        #[arg(long, value_name = "NAME")]
        culture: Option<String>,

        /// Print the written cells and resulting grid as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Copy a selection of the demo grid as clipboard text
    #[command(after_help = "\
Exits 3 when the selection is not a rectangle inside one band.

Examples:
  gclip copy --cells 1:Int,1:NInt,2:Int,2:NInt
  gclip copy --rows 2,3,4 --mode rows
  gclip copy --rows 0/DataItems/0,0/DataItems/1 --click-action row")]
    Copy {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Check whether a selection could be copied
    Validate {
        #[command(flatten)]
        selection: SelectionArgs,
    },
}

#[derive(Args)]
struct GridArgs {
    /// Root rows in the demo grid (default: demo.rowCount setting)
    #[arg(long = "rows", value_name = "N")]
    row_count: Option<usize>,

    /// Group root rows by a column
    #[arg(long, value_name = "KEY")]
    group_by: Option<String>,
}

#[derive(Args)]
struct SelectionArgs {
    /// Selected cells, ROW:COLUMN,...
    #[arg(long, value_name = "CELLS", required_unless_present = "rows", conflicts_with = "rows")]
    cells: Option<String>,

    /// Selected rows, ROW,...
    #[arg(long, value_name = "ROWS")]
    rows: Option<String>,

    /// Copy mode (default: clipboard.copyType setting)
    #[arg(long, value_enum)]
    mode: Option<CopyMode>,

    /// What a cell click selects (default: selection.cellClickAction setting)
    #[arg(long, value_enum)]
    click_action: Option<ClickAction>,

    /// Culture for copied numbers and dates
    #[arg(long, value_name = "NAME")]
    culture: Option<String>,

    /// Root rows in the demo grid (default: demo.rowCount setting)
    #[arg(long, value_name = "N")]
    row_count: Option<usize>,

    /// Group root rows by a column
    #[arg(long, value_name = "KEY")]
    group_by: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OnPrompt {
    Ask,
    Proceed,
    Cancel,
}

impl From<OnPrompt> for PromptPolicy {
    fn from(value: OnPrompt) -> Self {
        match value {
            OnPrompt::Ask => PromptPolicy::Ask,
            OnPrompt::Proceed => PromptPolicy::Proceed,
            OnPrompt::Cancel => PromptPolicy::Cancel,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CopyMode {
    Default,
    Cells,
    Rows,
}

impl From<CopyMode> for CopyType {
    fn from(value: CopyMode) -> Self {
        match value {
            CopyMode::Default => CopyType::Default,
            CopyMode::Cells => CopyType::SelectedCells,
            CopyMode::Rows => CopyType::SelectedRows,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ClickAction {
    Cell,
    Row,
}

impl From<ClickAction> for CellClickAction {
    fn from(value: ClickAction) -> Self {
        match value {
            ClickAction::Cell => CellClickAction::SelectCell,
            ClickAction::Row => CellClickAction::SelectRow,
        }
    }
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nengine:  gridclip-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nengine:  gridclip-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    let result = match cli.command {
        Commands::Demo { grid, json } => cmd_demo(&settings, grid, json),
        Commands::Paste { at, input, text, on_prompt, culture, json, grid } => {
            cmd_paste(&settings, at, input, text, on_prompt, culture, json, grid)
        }
        Commands::Copy { selection } => cmd_copy(&settings, selection),
        Commands::Validate { selection } => cmd_validate(&settings, selection),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// shared setup
// ============================================================================

fn resolve_culture(name: Option<&str>, settings: &Settings) -> Result<Culture, CliError> {
    match name {
        Some(name) => Culture::from_name(name).ok_or_else(|| {
            let known: Vec<&str> = Culture::all().iter().map(|c| c.display_name()).collect();
            CliError::args(format!("unknown culture '{name}'"))
                .with_hint(format!("known cultures: {}", known.join(", ")))
        }),
        None => Ok(settings.culture()),
    }
}

fn build_grid(
    settings: &Settings,
    row_count: Option<usize>,
    group_by: Option<&str>,
) -> Result<GridModel, CliError> {
    let mut grid = demo::load(row_count.unwrap_or(settings.demo_row_count));
    grid.clipboard_mut().copy_type = settings.copy_type;
    grid.selection_mut().cell_click_action = settings.cell_click_action;
    if let Some(key) = group_by {
        grid.group_by(key).map_err(CliError::args)?;
    }
    Ok(grid)
}

// ============================================================================
// demo
// ============================================================================

fn cmd_demo(settings: &Settings, args: GridArgs, as_json: bool) -> Result<(), CliError> {
    let grid = build_grid(settings, args.row_count, args.group_by.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if as_json {
        let text = json::to_string(&grid).map_err(CliError::io)?;
        writeln!(out, "{}", text).map_err(|e| CliError::io(e.to_string()))
    } else {
        render(&grid, &settings.culture(), &mut out).map_err(|e| CliError::io(e.to_string()))
    }
}

/// Tab-separated listing, one line per row. Each collection starts with a
/// `#` line naming its columns.
fn render(grid: &GridModel, culture: &Culture, out: &mut impl Write) -> io::Result<()> {
    render_collection(grid, &RowParent::Root, culture, out)
}

fn render_collection(
    grid: &GridModel,
    parent: &RowParent,
    culture: &Culture,
    out: &mut impl Write,
) -> io::Result<()> {
    let ids = grid.rows(parent).to_vec();
    let Some(layout) = ids.first().and_then(|&id| grid.row_layout(id)) else {
        return Ok(());
    };
    let columns: Vec<String> = layout.real_columns().iter().map(|c| c.key.clone()).collect();
    let has_data = ids.iter().any(|&id| grid.row(id).is_some_and(|r| r.is_data_row()));
    if has_data {
        let label = match parent {
            RowParent::Root => layout.key.clone(),
            RowParent::ChildBand { row, band } => format!("{}/{}", path::format_row(grid, *row), band),
            RowParent::GroupRow(group) => path::format_row(grid, *group),
        };
        writeln!(out, "# {}\t{}", label, columns.join("\t"))?;
    }

    for id in ids {
        render_row(grid, id, &columns, culture, out)?;
    }
    Ok(())
}

fn render_row(
    grid: &GridModel,
    id: RowId,
    columns: &[String],
    culture: &Culture,
    out: &mut impl Write,
) -> io::Result<()> {
    let Some(row) = grid.row(id) else {
        return Ok(());
    };
    let row_path = path::format_row(grid, id);
    if row.kind == RowKind::GroupBy {
        let members = grid.rows(&RowParent::GroupRow(id)).len();
        for (column, label) in &row.cells {
            writeln!(out, "{}\t{} = {} ({} rows)", row_path, column, label.display(culture), members)?;
        }
        return render_collection(grid, &RowParent::GroupRow(id), culture, out);
    }

    let values: Vec<String> = columns.iter().map(|c| row.value(c).display(culture)).collect();
    writeln!(out, "{}\t{}", row_path, values.join("\t"))?;
    for band in grid.child_bands(id) {
        let parent = RowParent::ChildBand { row: id, band: band.to_string() };
        render_collection(grid, &parent, culture, out)?;
    }
    Ok(())
}

// ============================================================================
// paste
// ============================================================================

#[derive(Serialize)]
struct PasteOutput<'a> {
    status: &'a PasteStatus,
    written: Vec<WrittenCell>,
    skipped: usize,
    grid: json::GridSnapshot,
}

#[derive(Serialize)]
struct WrittenCell {
    cell: String,
    value: String,
}

/// `\t`, `\n` and `\\` escapes for --text.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn read_block(input: Option<&Path>, text: Option<&str>) -> Result<PasteBlock, CliError> {
    match (text, input) {
        (Some(text), _) => clipboard::parse(&unescape(text)).map_err(CliError::io),
        (None, Some(path)) if path != Path::new("-") => {
            clipboard::import(path).map_err(CliError::io)
        }
        _ => clipboard::import_from_reader(io::stdin().lock()).map_err(CliError::io),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_paste(
    settings: &Settings,
    at: String,
    input: Option<PathBuf>,
    text: Option<String>,
    on_prompt: Option<OnPrompt>,
    culture: Option<String>,
    as_json: bool,
    args: GridArgs,
) -> Result<(), CliError> {
    let culture = resolve_culture(culture.as_deref(), settings)?;
    let mut grid = build_grid(settings, args.row_count, args.group_by.as_deref())?;
    grid.set_culture(culture);

    let anchor = path::parse_cell(&grid, &at).map_err(CliError::args)?;
    grid.activate(anchor.row, anchor.column.clone());

    let policy = on_prompt.map(PromptPolicy::from).unwrap_or(settings.on_prompt);
    let data_on_stdin = text.is_none() && input.as_deref().map_or(true, |p| p == Path::new("-"));
    if policy == PromptPolicy::Ask && data_on_stdin {
        return Err(CliError::args("--on-prompt ask reads answers from stdin, which holds the data")
            .with_hint("pass the data with --input FILE or --text, or use --on-prompt proceed|cancel"));
    }

    let block = read_block(input.as_deref(), text.as_deref())?;
    let converter = Converter::new(culture);
    let report = match policy {
        PromptPolicy::Ask => {
            let stdin = io::stdin();
            let mut answers = LinePrompt::new(stdin.lock(), io::stderr());
            paste_and_select(&mut grid, &block, &converter, &mut answers)
        }
        PromptPolicy::Proceed => paste_and_select(&mut grid, &block, &converter, &mut AlwaysProceed),
        PromptPolicy::Cancel => paste_and_select(&mut grid, &block, &converter, &mut AlwaysCancel),
    };

    let written: Vec<WrittenCell> = report
        .cells()
        .iter()
        .map(|cell| WrittenCell {
            cell: path::format_cell(&grid, cell),
            value: grid.value(cell).map(|v| v.display(&culture)).unwrap_or_default(),
        })
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let io_err = |e: io::Error| CliError::io(e.to_string());
    if as_json {
        let output = PasteOutput {
            status: report.status(),
            written,
            skipped: report.skipped(),
            grid: json::snapshot(&grid),
        };
        let text = serde_json::to_string_pretty(&output).map_err(|e| CliError::io(e.to_string()))?;
        writeln!(out, "{}", text).map_err(io_err)?;
    } else {
        for cell in &written {
            writeln!(out, "{}\t{}", cell.cell, cell.value).map_err(io_err)?;
        }
    }

    match report.status() {
        PasteStatus::Completed => {
            log::info!("pasted {} cell(s)", report.cells().len());
            Ok(())
        }
        PasteStatus::Ignored(reason) => {
            eprintln!("nothing pasted: {}", reason);
            Ok(())
        }
        PasteStatus::Cancelled(error) => Err(CliError {
            code: EXIT_PASTE_CANCELLED,
            message: error.to_string(),
            hint: None,
        }),
    }
}

// ============================================================================
// copy / validate
// ============================================================================

fn selected_grid(settings: &Settings, args: &SelectionArgs) -> Result<GridModel, CliError> {
    let mut grid = build_grid(settings, args.row_count, args.group_by.as_deref())?;
    if let Some(mode) = args.mode {
        grid.clipboard_mut().copy_type = mode.into();
    }
    if let Some(action) = args.click_action {
        grid.selection_mut().cell_click_action = action.into();
    }

    if let Some(cells) = &args.cells {
        for cell in path::parse_list(&grid, cells, path::parse_cell).map_err(CliError::args)? {
            grid.selection_mut().select_cell(cell);
        }
    }
    if let Some(rows) = &args.rows {
        for row in path::parse_list(&grid, rows, path::parse_row).map_err(CliError::args)? {
            grid.selection_mut().select_row(row);
        }
    }
    Ok(grid)
}

/// Point at the mode when the selection is empty only because the flags
/// select the other kind of item.
fn selection_hint(grid: &GridModel, error: &SelectionError) -> Option<String> {
    if *error != SelectionError::Empty {
        return None;
    }
    match resolve_copy_type(grid) {
        CopyType::SelectedCells if !grid.selection().selected_rows().is_empty() => {
            Some("copy mode is cells; pass --mode rows or --click-action row".to_string())
        }
        CopyType::SelectedRows if !grid.selection().selected_cells().is_empty() => {
            Some("copy mode is rows; pass --mode cells or --click-action cell".to_string())
        }
        _ => None,
    }
}

fn cmd_copy(settings: &Settings, args: SelectionArgs) -> Result<(), CliError> {
    let culture = resolve_culture(args.culture.as_deref(), settings)?;
    let grid = selected_grid(settings, &args)?;

    match copy_selection(&grid, &culture) {
        Ok(block) => {
            let text = clipboard::format(&block).map_err(CliError::io)?;
            io::stdout()
                .lock()
                .write_all(text.as_bytes())
                .map_err(|e| CliError::io(e.to_string()))
        }
        Err(error) => {
            log::warn!("copy rejected: {}", error);
            let hint = selection_hint(&grid, &error).unwrap_or_else(|| error.to_string());
            Err(CliError {
                code: EXIT_INVALID_SELECTION,
                message: INVALID_SELECTION_MESSAGE.to_string(),
                hint: Some(hint),
            })
        }
    }
}

fn cmd_validate(settings: &Settings, args: SelectionArgs) -> Result<(), CliError> {
    let grid = selected_grid(settings, &args)?;

    match validate_selection(&grid) {
        Ok(bounds) => {
            println!(
                "valid: {} row(s) x {} column(s)",
                bounds.row_count(),
                bounds.col_count()
            );
            Ok(())
        }
        Err(error) => {
            println!("invalid: {}", error);
            Err(CliError {
                code: EXIT_INVALID_SELECTION,
                message: String::new(),
                hint: selection_hint(&grid, &error),
            })
        }
    }
}
