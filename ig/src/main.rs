//! ignr - offline-first .gitignore generator
//!
//! CLI entry point.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result, eyre};
use serde::Serialize;
use tracing::{debug, error, info};

use chrono::Utc;
use ignr::cache::TemplateCache;
use ignr::cli::{Cli, Command, OutputArgs, OutputFormat, PresetCommand, get_log_path};
use ignr::config::{self, Config};
use ignr::detect;
use ignr::error::IgnrError;
use ignr::fuzzy;
use ignr::is_cancelled;
use ignr::output::{OutputMode, WritePlan, plan_write, resolve_target, write_output};
use ignr::selection::{resolve_members, resolve_strict};
use ignr::templates::{
    MergeOptions, Template, TemplateIndex, discover_templates, discover_user_templates, load_templates, merge_templates,
};
use ignr::tui::{self, GeneratorInfo, SessionContext, Theme};
use presetstore::{FileStore, Preset, PresetRepository, StoreError};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>, verbose: bool) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Priority: CLI --log-level > config file > --verbose > INFO
    let level_str = cli_log_level.or(config_log_level).or(verbose.then_some("DEBUG"));
    let level = match level_str.map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_cancelled(&e) => {
            info!("main: cancelled by user");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %format!("{:#}", e), "main: command failed");
            eprintln!("{}", error_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref(), cli.verbose)
        .context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::List { category, format } => cmd_list(&config, category.as_deref(), format),
        Command::Search { pattern } => cmd_search(&config, &pattern.join(" ")),
        Command::Generate {
            templates,
            output,
            no_interactive,
            suggest,
        } => cmd_generate(&config, &templates, &output, no_interactive, suggest),
        Command::Preset { command: None } => cmd_preset_app(&config),
        Command::Preset { command: Some(command) } => match command {
            PresetCommand::Create {
                name,
                templates,
                no_interactive,
            } => cmd_preset_create(&config, name, &templates, no_interactive),
            PresetCommand::Edit {
                key,
                templates,
                no_interactive,
            } => cmd_preset_edit(&config, key, &templates, no_interactive),
            PresetCommand::List => cmd_preset_list(),
            PresetCommand::Show { name } => cmd_preset_show(&name),
            PresetCommand::Delete { key, yes } => cmd_preset_delete(&config, key, yes),
            PresetCommand::Use { key, output } => cmd_preset_use(&config, key, &output),
        },
        Command::Update => cmd_update(&config),
    }
}

/// Typed errors print exactly as they read; anything wrapped in context prints its chain
fn error_message(report: &eyre::Report) -> String {
    let typed = report
        .downcast_ref::<IgnrError>()
        .map(ToString::to_string)
        .or_else(|| report.downcast_ref::<StoreError>().map(ToString::to_string));
    match typed {
        Some(message) if message == report.to_string() => message,
        _ => format!("{:#}", report),
    }
}

// === Catalog ===

/// Cache checkout, cloned on first use
fn cache_root(config: &Config) -> Result<PathBuf> {
    let cache = TemplateCache::new(config.cache_path()?);
    Ok(cache.initialize()?)
}

fn cache_templates(config: &Config) -> Result<Vec<Template>> {
    Ok(discover_templates(cache_root(config)?)?)
}

/// Cache templates first, then user templates, so cache names win collisions
fn all_templates(config: &Config) -> Result<Vec<Template>> {
    let mut templates = cache_templates(config)?;
    templates.extend(discover_user_templates(config.user_template_dir()?)?);
    debug!(count = templates.len(), "all_templates: discovered");
    Ok(templates)
}

fn open_store() -> Result<FileStore> {
    Ok(FileStore::open(config::presets_path()?)?)
}

fn generator(config: &Config, no_header: bool) -> GeneratorInfo {
    GeneratorInfo {
        name: config.generator.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        header: config.generator.header && !no_header,
    }
}

/// Context for a standalone session that never persists presets
fn standalone(config: &Config, catalog: Rc<TemplateIndex>, presets: Vec<Preset>) -> SessionContext {
    SessionContext::detached(Theme::from_env(), catalog, presets).with_generator(generator(config, false))
}

fn template_names(templates: &[Template]) -> Vec<String> {
    templates.iter().map(|t| t.name.clone()).collect()
}

// === Listing ===

#[derive(Debug, Serialize)]
struct ListEntry<'a> {
    name: &'a str,
    category: &'a str,
    path: &'a Path,
}

fn cmd_list(config: &Config, category: Option<&str>, format: OutputFormat) -> Result<()> {
    debug!(?category, %format, "cmd_list: called");
    let templates = cache_templates(config)?;
    let filter = category.map(|c| c.trim().to_lowercase()).filter(|c| !c.is_empty());
    let shown: Vec<&Template> = templates
        .iter()
        .filter(|t| filter.as_deref().is_none_or(|f| t.category.label().to_lowercase() == f))
        .collect();

    match format {
        OutputFormat::Json => {
            let entries: Vec<ListEntry> = shown
                .iter()
                .map(|t| ListEntry {
                    name: &t.name,
                    category: t.category.label(),
                    path: &t.path,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            for template in shown {
                print_template_line(template);
            }
        }
    }
    Ok(())
}

fn print_template_line(template: &Template) {
    println!("{} {}", format!("[{}]", template.category).dimmed(), template.name);
}

fn cmd_search(config: &Config, pattern: &str) -> Result<()> {
    debug!(%pattern, "cmd_search: called");
    let templates = cache_templates(config)?;
    let names = template_names(&templates);
    for hit in fuzzy::find(pattern, &names) {
        print_template_line(&templates[hit.index]);
    }
    Ok(())
}

// === Generation ===

fn cmd_generate(
    config: &Config,
    names: &[String],
    output: &OutputArgs,
    no_interactive: bool,
    suggest: bool,
) -> Result<()> {
    debug!(?names, no_interactive, suggest, "cmd_generate: called");
    let catalog = Rc::new(TemplateIndex::build(all_templates(config)?));
    let interactive = names.is_empty() && !no_interactive;

    let selected = if interactive {
        let suggested = if suggest {
            detect::suggest_for(Path::new("."))?
        } else {
            Vec::new()
        };
        let presets = open_store()?.list()?;
        let mut ctx = standalone(config, catalog, presets);
        tui::run_selector("Select Templates", &mut ctx, &[], &suggested)?
    } else {
        resolve_strict(&catalog, names)?
    };

    write_selection(config, &selected, output, interactive)
}

/// Resolve the target, settle overwrite questions, merge and write
fn write_selection(config: &Config, selected: &[Template], output: &OutputArgs, interactive: bool) -> Result<()> {
    if selected.is_empty() {
        return Err(IgnrError::NoSelection.into());
    }
    let target = resolve_target(output.output.as_deref(), config.default_output());
    debug!(?target, templates = selected.len(), "write_selection: called");

    let mode = match plan_write(&target, output.append, output.force, interactive)? {
        WritePlan::Write(mode) => mode,
        WritePlan::Confirm => {
            let mut ctx = standalone(config, Rc::new(TemplateIndex::default()), Vec::new());
            if !tui::confirm_overwrite(&mut ctx, target.clone(), selected.to_vec())? {
                return Err(IgnrError::Cancelled.into());
            }
            OutputMode::Overwrite
        }
    };

    let loaded = load_templates(selected)?;
    let info = generator(config, output.no_header);
    let content = merge_templates(
        &loaded,
        &MergeOptions {
            deduplicate: true,
            add_header: info.header,
            generator: info.name,
            version: info.version,
            timestamp: Utc::now(),
        },
    );
    write_output(&target, &content, mode)?;

    println!(
        "{} Generated {} with {} templates",
        "✓".green(),
        target.display(),
        selected.len()
    );
    Ok(())
}

// === Presets ===

fn cmd_preset_app(config: &Config) -> Result<()> {
    debug!("cmd_preset_app: called");
    let catalog = Rc::new(TemplateIndex::build(all_templates(config)?));
    let target = resolve_target(None, config.default_output());
    let mut ctx = SessionContext::new(Theme::from_env(), catalog, Box::new(open_store()?))?
        .with_output(target)
        .with_generator(generator(config, false));
    tui::run_preset_app(&mut ctx)
}

fn cmd_preset_create(config: &Config, name: Option<String>, names: &[String], no_interactive: bool) -> Result<()> {
    debug!(?name, ?names, no_interactive, "cmd_preset_create: called");
    let catalog = Rc::new(TemplateIndex::build(all_templates(config)?));
    let mut store = open_store()?;
    let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

    if !names.is_empty() || no_interactive {
        let name = name.ok_or_else(|| eyre!("preset name is required in non-interactive mode"))?;
        let selected = resolve_strict(&catalog, names)?;
        let preset = store.create(&name, &template_names(&selected))?;
        return report_saved("Created", &preset);
    }

    let Some(name) = name else {
        return create_with_name_prompt(config, catalog, store);
    };

    let presets = store.list()?;
    let key = SessionContext::key_for(&name);
    if presets.iter().any(|p| p.effective_key().eq_ignore_ascii_case(&key)) {
        return Err(StoreError::KeyExists(key).into());
    }

    let mut ctx = standalone(config, catalog, Vec::new());
    let selected = tui::run_selector("Create Templates", &mut ctx, &[], &[])?;
    if selected.is_empty() {
        return Err(IgnrError::NoSelection.into());
    }
    let preset = store.create(&name, &template_names(&selected))?;
    report_saved("Created", &preset)
}

/// Name prompt then template picker, both inside one session
fn create_with_name_prompt(config: &Config, catalog: Rc<TemplateIndex>, store: FileStore) -> Result<()> {
    let before: Vec<String> = store.list()?.iter().map(Preset::effective_key).collect();
    let mut ctx = SessionContext::new(Theme::from_env(), catalog, Box::new(store))?.with_generator(generator(config, false));
    let root = tui::Screen::NameInput(tui::screens::NameInputScreen::new());
    tui::run_session(root, &mut ctx)?;

    ctx.reload_presets()?;
    match ctx.presets.iter().find(|p| !before.contains(&p.effective_key())) {
        Some(preset) => report_saved("Created", preset),
        None => Err(IgnrError::Cancelled.into()),
    }
}

fn cmd_preset_edit(config: &Config, key: Option<String>, names: &[String], no_interactive: bool) -> Result<()> {
    debug!(?key, ?names, no_interactive, "cmd_preset_edit: called");
    let catalog = Rc::new(TemplateIndex::build(all_templates(config)?));
    let mut store = open_store()?;
    let key = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty());

    if !names.is_empty() || no_interactive {
        let key = key.ok_or_else(|| eyre!("preset key or name is required in non-interactive mode"))?;
        let selected = resolve_strict(&catalog, names)?;
        let preset = store.edit(&key, &template_names(&selected))?;
        return report_saved("Updated", &preset);
    }

    let preset = find_or_pick(config, &store, key.as_deref())?;
    let mut ctx = standalone(config, catalog, Vec::new());
    let selected = tui::run_selector("Edit Templates", &mut ctx, &preset.templates, &[])?;
    if selected.is_empty() {
        return Err(IgnrError::NoSelection.into());
    }
    let updated = store.edit(&preset.effective_key(), &template_names(&selected))?;
    report_saved("Updated", &updated)
}

fn report_saved(verb: &str, preset: &Preset) -> Result<()> {
    info!(key = %preset.key, templates = preset.templates.len(), "{} preset", verb);
    println!(
        "{} {} preset {} with {} templates",
        "✓".green(),
        verb,
        preset.name,
        preset.templates.len()
    );
    Ok(())
}

/// Preset named by `key`, or one picked interactively when `key` is absent
fn find_or_pick(config: &Config, store: &FileStore, key: Option<&str>) -> Result<Preset> {
    match key {
        Some(key) => Ok(store.find(key)?.ok_or_else(|| StoreError::NotFound(key.to_string()))?),
        None => {
            let presets = store.list()?;
            if presets.is_empty() {
                return Err(eyre!("no presets found"));
            }
            let mut ctx = standalone(config, Rc::new(TemplateIndex::default()), presets);
            tui::run_preset_picker(&mut ctx)
        }
    }
}

fn cmd_preset_list() -> Result<()> {
    let presets = open_store()?.list()?;
    if presets.is_empty() {
        println!("No presets found.");
        return Ok(());
    }
    for preset in presets {
        println!(
            "{} {} ({} templates)",
            preset.name,
            format!("[{}]", preset.effective_key()).dimmed(),
            preset.templates.len()
        );
    }
    Ok(())
}

fn cmd_preset_show(name: &str) -> Result<()> {
    let preset = open_store()?
        .find(name)?
        .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
    if !preset.key.trim().is_empty() {
        println!("Key: {}", preset.key);
    }
    println!("Name: {}", preset.name);
    println!("Templates: {}", preset.templates.join(", "));
    if !preset.created.is_empty() {
        println!("Created: {}", preset.created);
    }
    if !preset.updated.is_empty() {
        println!("Updated: {}", preset.updated);
    }
    Ok(())
}

fn cmd_preset_delete(config: &Config, key: Option<String>, yes: bool) -> Result<()> {
    debug!(?key, yes, "cmd_preset_delete: called");
    let mut store = open_store()?;
    let preset = find_or_pick(config, &store, key.as_deref())?;

    if !yes && !confirm_prompt(&format!("Delete preset {}?", preset.name))? {
        println!("Cancelled.");
        return Ok(());
    }
    store.delete(&preset.effective_key())?;
    println!("{} Deleted preset {}", "✓".green(), preset.name);
    Ok(())
}

/// `[y/N]` on stdin; anything but y/yes (including EOF) is no
fn confirm_prompt(prompt: &str) -> Result<bool> {
    print!("{} [y/N]: ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn cmd_preset_use(config: &Config, key: Option<String>, output: &OutputArgs) -> Result<()> {
    debug!(?key, "cmd_preset_use: called");
    let store = open_store()?;
    let interactive = key.is_none();
    let preset = find_or_pick(config, &store, key.as_deref())?;

    let catalog = TemplateIndex::build(all_templates(config)?);
    let (selected, missing) = resolve_members(&preset, &catalog);
    if !missing.is_empty() {
        return Err(IgnrError::UnresolvedPresetMember {
            preset: preset.name.clone(),
            names: missing,
        }
        .into());
    }
    write_selection(config, &selected, output, interactive)
}

// === Cache ===

fn cmd_update(config: &Config) -> Result<()> {
    let cache = TemplateCache::new(config.cache_path()?);
    let path = cache.update()?;
    let status = cache.status()?;
    println!("{} Updated cache at {}", "✓".green(), path.display());
    if let Some(head) = status.head_commit {
        println!("HEAD {}", head);
    }
    Ok(())
}
