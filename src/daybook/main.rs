use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use clap::Parser;
use colored::*;
use console::Style;
use daybook::api::{CmdMessage, DaybookApi, EntryUpdate, MessageLevel};
use daybook::codec::{load_or_create_key, Base64Codec};
use daybook::config::DaybookConfig;
use daybook::error::{DaybookError, Result};
use daybook::markup::{Block, MarkupFormatter, SpanStyle};
use daybook::model::{Entry, EntryDraft, Mood, Tag};
use daybook::passkey::StoreGate;
use daybook::store::fs::FileStore;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;
use uuid::Uuid;

mod args;
use args::{Cli, Commands, GateAction};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let DaybookError::Validation(messages) = &e {
            for msg in messages {
                eprintln!("  - {}", msg);
            }
        }
        std::process::exit(1);
    }
}

struct AppContext {
    api: DaybookApi<FileStore<Base64Codec>>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context()?;

    // Every data command runs behind the store gate, verified once per
    // invocation (the CLI's notion of a session).
    if !matches!(cli.command, Commands::Gate { .. }) {
        let passkey = cli.passkey.as_deref().unwrap_or_default();
        ctx.api.gate_verify(passkey)?;
    }

    match cli.command {
        Commands::Write {
            title,
            body,
            date,
            mood,
            tags,
            image,
            entry_passkey,
        } => handle_write(&mut ctx, title, body, date, mood, tags, image, entry_passkey),
        Commands::List { search, tag } => handle_list(&ctx, search, tag),
        Commands::View { index } => handle_view(&ctx, index),
        Commands::Edit {
            index,
            title,
            body,
            date,
            mood,
            tags,
            image,
            remove_image,
            entry_passkey,
        } => handle_edit(
            &mut ctx,
            index,
            title,
            body,
            date,
            mood,
            tags,
            image,
            remove_image,
            entry_passkey,
        ),
        Commands::Delete {
            index,
            entry_passkey,
        } => handle_delete(&mut ctx, index, entry_passkey),
        Commands::Export { indexes, output } => handle_export(&ctx, indexes, output),
        Commands::Stats => handle_stats(&ctx),
        Commands::Gate { action } => handle_gate(&ctx, action, cli.passkey.as_deref()),
    }
}

fn journal_dir() -> PathBuf {
    if let Ok(home) = std::env::var("DAYBOOK_HOME") {
        return PathBuf::from(home);
    }
    directories::ProjectDirs::from("com", "daybook", "daybook")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".daybook"))
}

fn init_context() -> Result<AppContext> {
    let dir = journal_dir();
    daybook::logging::init(&dir.join("logs"));

    let config = DaybookConfig::load(&dir).unwrap_or_default();
    // Materialize the codec key lifecycle even though the stock codec does
    // not consume it; a cipher-backed codec slots in without a migration.
    let _ = load_or_create_key(&dir.join(".codec_key"))?;

    let store = FileStore::new(dir.clone(), Base64Codec);
    let gate = StoreGate::new(&dir);
    Ok(AppContext {
        api: DaybookApi::new(store, gate, config),
    })
}

#[allow(clippy::too_many_arguments)]
fn handle_write(
    ctx: &mut AppContext,
    title: String,
    body: String,
    date: Option<String>,
    mood: Option<String>,
    tags: Vec<String>,
    image: Option<PathBuf>,
    entry_passkey: String,
) -> Result<()> {
    let draft = EntryDraft {
        title,
        body,
        date: parse_date(date.as_deref())?,
        mood: parse_mood(mood.as_deref())?,
        tags: parse_tags(&tags)?,
        image: image.map(read_image).transpose()?,
        passkey: entry_passkey,
    };

    let result = ctx.api.write_entry(draft)?;
    print_messages(&result.messages);
    if let Some(entry) = result.affected_entries.first() {
        print_analysis(entry);
    }
    Ok(())
}

fn handle_list(ctx: &AppContext, search: Option<String>, tag: Option<String>) -> Result<()> {
    let tag = match tag {
        Some(t) => Some(t.parse::<Tag>().map_err(DaybookError::Api)?),
        None => None,
    };
    let result = ctx.api.list_entries(search.as_deref(), tag)?;
    print_entry_table(&result.listed_entries);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, index: usize) -> Result<()> {
    let id = resolve_index(ctx, index)?;
    let result = ctx.api.view_entry(&id)?;
    if let Some(entry) = result.listed_entries.first() {
        print_full_entry(entry);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_edit(
    ctx: &mut AppContext,
    index: usize,
    title: String,
    body: String,
    date: Option<String>,
    mood: Option<String>,
    tags: Vec<String>,
    image: Option<PathBuf>,
    remove_image: bool,
    entry_passkey: String,
) -> Result<()> {
    let id = resolve_index(ctx, index)?;
    let image = if remove_image {
        Some(None)
    } else {
        image.map(read_image).transpose()?.map(Some)
    };

    let update = EntryUpdate {
        id,
        title,
        body,
        date: parse_date(date.as_deref())?,
        mood: parse_mood(mood.as_deref())?,
        tags: parse_tags(&tags)?,
        image,
        passkey: entry_passkey,
    };

    let result = ctx.api.edit_entry(update)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, index: usize, entry_passkey: String) -> Result<()> {
    let id = resolve_index(ctx, index)?;
    let result = ctx.api.delete_entry(&id, &entry_passkey)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, indexes: Vec<usize>, output: Option<PathBuf>) -> Result<()> {
    let ids: Vec<Uuid> = indexes
        .into_iter()
        .map(|i| resolve_index(ctx, i))
        .collect::<Result<_>>()?;
    let output_dir = match output {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(DaybookError::Io)?,
    };
    let result = ctx.api.export_entries(&ids, output_dir)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stats()?;
    if let Some(stats) = &result.stats {
        println!("{}", "Writing Summary".bold());
        println!("  Entries:          {}", stats.entry_count);
        println!("  Total words:      {}", stats.total_words);
        println!("  Avg. sentiment:   {:+.2}", stats.avg_polarity);
        println!("  Avg. words/entry: {:.0}", stats.avg_words_per_entry);

        println!("\n{}", "Moods".bold());
        for (mood, count) in &stats.mood_counts {
            println!("  {} {:12} {}", mood.glyph(), mood.label(), count);
        }

        if !stats.top_keywords.is_empty() {
            println!("\n{}", "Top Keywords".bold());
            for (word, count) in &stats.top_keywords {
                println!("  {:20} {}", word, count);
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_gate(ctx: &AppContext, action: GateAction, passkey: Option<&str>) -> Result<()> {
    let result = match action {
        GateAction::Setup {
            new_passkey,
            confirm_passkey,
        } => ctx.api.gate_setup(&new_passkey, &confirm_passkey)?,
        GateAction::Verify => ctx
            .api
            .gate_verify(passkey.unwrap_or_default())?,
        GateAction::Status => ctx.api.gate_status()?,
    };
    print_messages(&result.messages);
    Ok(())
}

// --- input parsing ---

fn parse_date(date: Option<&str>) -> Result<Option<NaiveDate>> {
    match date {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| DaybookError::Api(format!("Invalid date (want YYYY-MM-DD): {}", s))),
    }
}

fn parse_mood(mood: Option<&str>) -> Result<Option<Mood>> {
    match mood {
        None => Ok(None),
        Some(s) => s.parse::<Mood>().map(Some).map_err(DaybookError::Api),
    }
}

fn parse_tags(tags: &[String]) -> Result<Vec<Tag>> {
    tags.iter()
        .map(|t| t.parse::<Tag>().map_err(DaybookError::Api))
        .collect()
}

fn read_image(path: PathBuf) -> Result<String> {
    let bytes = std::fs::read(&path).map_err(DaybookError::Io)?;
    Ok(STANDARD.encode(bytes))
}

/// Map a 1-based listing number to the entry's id.
fn resolve_index(ctx: &AppContext, index: usize) -> Result<Uuid> {
    let entries = ctx.api.list_entries(None, None)?.listed_entries;
    entries
        .get(index.checked_sub(1).ok_or_else(|| {
            DaybookError::Api("Entry numbers start at 1".to_string())
        })?)
        .map(|e| e.id)
        .ok_or_else(|| DaybookError::Api(format!("No entry number {}", index)))
}

// --- output ---

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

fn print_entry_table(entries: &[Entry]) {
    let time_fmt = timeago::Formatter::new();
    let title_width = entries
        .iter()
        .map(|e| e.title.width())
        .max()
        .unwrap_or(0)
        .min(40);

    for (i, entry) in entries.iter().enumerate() {
        let tags = entry
            .tags
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ");
        let age = time_fmt.convert(
            chrono::Utc::now()
                .signed_duration_since(entry.created_at)
                .to_std()
                .unwrap_or_default(),
        );
        let pad = title_width.saturating_sub(entry.title.width());
        println!(
            "{:>3}  {}  {} {}{}  {}  {:>4}w {:+.1}  {}",
            (i + 1).to_string().bold(),
            entry.date,
            entry.mood.glyph(),
            entry.title.bold(),
            " ".repeat(pad),
            tags.dimmed(),
            entry.metrics.word_count,
            entry.metrics.polarity,
            age.dimmed().italic()
        );
    }
}

fn print_analysis(entry: &Entry) {
    println!("  Words:        {}", entry.metrics.word_count);
    println!("  Sentiment:    {:+.2}", entry.metrics.polarity);
    println!("  Subjectivity: {:.2}", entry.metrics.subjectivity);
    if !entry.metrics.keywords.is_empty() {
        println!("  Keywords:     {}", entry.metrics.keywords.join(", "));
    }
}

fn print_full_entry(entry: &Entry) {
    let heading = Style::new().bold().underlined();
    let code = Style::new().dim();

    println!("{}", heading.apply_to(&entry.title));
    let tags = entry
        .tags
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "{}",
        format!("{} | {} | {}", entry.date, entry.mood.glyph(), tags).dimmed()
    );
    println!();

    for block in MarkupFormatter::new().format(&entry.body) {
        match block {
            Block::Heading { text, .. } => println!("{}", heading.apply_to(text)),
            Block::Code(text) => {
                for line in text.lines() {
                    println!("    {}", code.apply_to(line));
                }
            }
            Block::Paragraph(spans) => {
                let mut line = String::new();
                for span in spans {
                    let styled = match span.style {
                        SpanStyle::Plain => span.text.normal(),
                        SpanStyle::Bold => span.text.bold(),
                        SpanStyle::Italic => span.text.italic(),
                        SpanStyle::Code => span.text.dimmed(),
                    };
                    line.push_str(&styled.to_string());
                }
                println!("{}", line);
            }
        }
    }

    if entry.image.is_some() {
        println!("\n{}", "[image attached]".dimmed());
    }
}
