use chartz::api::ChartzApi;
use chartz::columns::{stored_text, COLUMNS};
use chartz::commands::{CmdMessage, MessageLevel};
use chartz::commands::flush;
use chartz::config::ChartzConfig;
use chartz::error::{ChartzError, Result};
use chartz::rows::Row;
use chartz::store::fs::FileStore;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: ChartzApi<FileStore>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Config is the one command that works without a charts directory.
    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(key.clone(), value.clone());
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { sort, desc }) => handle_list(&mut ctx, sort, desc),
        Some(Commands::Show { ids }) => handle_show(&ctx, ids),
        Some(Commands::Set { id, assignments }) => handle_set(&mut ctx, id, assignments),
        Some(Commands::Unset { id, columns }) => handle_unset(&mut ctx, id, columns),
        Some(Commands::Check) => handle_check(&ctx),
        Some(Commands::Export { ids }) => handle_export(&ctx, ids),
        Some(Commands::Config { .. }) => unreachable!("handled above"),
        None => handle_list(&mut ctx, None, false),
    }
}

fn config_dir() -> PathBuf {
    let proj_dirs =
        ProjectDirs::from("com", "chartz", "chartz").expect("Could not determine config dir");
    proj_dirs.config_dir().to_path_buf()
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = ChartzConfig::load(config_dir()).unwrap_or_default();

    let charts_dir = match (&cli.dir, &config.charts_dir) {
        (Some(dir), _) => dir.clone(),
        (None, Some(dir)) => dir.clone(),
        (None, None) => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let store = FileStore::new(charts_dir);
    let api = ChartzApi::open(store)?;
    Ok(AppContext { api })
}

fn handle_list(ctx: &mut AppContext, sort: Option<String>, desc: bool) -> Result<()> {
    if let Some(column) = sort {
        ctx.api.set_sort(&column, desc)?;
    }
    let result = ctx.api.list();
    print_rows(&result.rows);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, ids: Vec<String>) -> Result<()> {
    for (i, id) in ids.iter().enumerate() {
        let chart = ctx
            .api
            .chart(id)
            .ok_or_else(|| ChartzError::Api(format!("No chart named '{}'", id)))?;

        if i > 0 {
            println!();
        }
        println!("{}", chart.id.bold());
        println!("--------------------------------");
        for spec in COLUMNS {
            println!(
                "{:>18}  {}",
                spec.key.dimmed(),
                stored_text(chart.value(spec.key))
            );
        }
    }
    Ok(())
}

fn handle_set(ctx: &mut AppContext, id: String, assignments: Vec<String>) -> Result<()> {
    for assignment in &assignments {
        let (column, raw) = assignment.split_once('=').ok_or_else(|| {
            ChartzError::Api(format!(
                "Invalid assignment '{}' (expected column=value)",
                assignment
            ))
        })?;
        let staged = ctx.api.stage(&id, column, raw)?;
        println!("{}", format!("staged {} = {}", column, staged.text()).dimmed());
    }

    let outcome = ctx.api.flush();
    print_messages(&flush::report(&outcome).messages);
    Ok(())
}

fn handle_unset(ctx: &mut AppContext, id: String, columns: Vec<String>) -> Result<()> {
    for column in &columns {
        ctx.api.stage_clear(&id, column)?;
    }

    let outcome = ctx.api.flush();
    print_messages(&flush::report(&outcome).messages);
    Ok(())
}

fn handle_check(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.check()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, ids: Vec<String>) -> Result<()> {
    let result = ctx.api.export(&ids)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(key: Option<String>, value: Option<String>) -> Result<()> {
    let dir = config_dir();
    let mut config = ChartzConfig::load(&dir).unwrap_or_default();

    match (key.as_deref(), value) {
        (None, _) | (Some("charts-dir"), None) => {
            match &config.charts_dir {
                Some(path) => println!("charts-dir = {}", path.display()),
                None => println!("charts-dir is not set (using the current directory)"),
            }
        }
        (Some("charts-dir"), Some(v)) => {
            config.charts_dir = Some(PathBuf::from(&v));
            config.save(&dir)?;
            println!("charts-dir = {}", v);
        }
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
        }
    }
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const DIR_WIDTH: usize = 16;

fn print_rows(rows: &[Row]) {
    if rows.is_empty() {
        println!("No charts found.");
        return;
    }

    let mut header = format!("  {}", pad_cell("directory", DIR_WIDTH));
    for spec in COLUMNS {
        header.push(' ');
        header.push_str(&pad_cell(spec.key, spec.width));
    }
    println!("{}", header.bold());

    for row in rows {
        let marker = if row.dirty { "*" } else { " " };
        let mut line = format!("{} {}", marker, pad_cell(&row.id, DIR_WIDTH));
        for (spec, cell) in COLUMNS.iter().zip(&row.cells) {
            let flat: String = cell
                .chars()
                .map(|c| if c == '\n' { ' ' } else { c })
                .collect();
            line.push(' ');
            line.push_str(&pad_cell(&flat, spec.width));
        }
        if row.dirty {
            println!("{}", line.yellow());
        } else {
            println!("{}", line);
        }
    }
}

fn pad_cell(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
