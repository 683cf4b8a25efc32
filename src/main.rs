use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use notion_blocks::{Destination, NotionApi, NotionClient};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "md2notion", version, about = "Publish Markdown documents as Notion pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Target options shared by the upload commands. Exactly one must be given;
/// a URL wins over a database id, which wins over a page id.
#[derive(Args)]
struct TargetArgs {
    /// Notion page URL to create the page under
    #[arg(long)]
    parent_url: Option<String>,

    /// Database id to create the page in
    #[arg(long)]
    database_id: Option<String>,

    /// Parent page id to create the page under
    #[arg(long)]
    parent_page_id: Option<String>,
}

impl TargetArgs {
    fn resolve(&self) -> Result<Destination, notion_blocks::Error> {
        Destination::resolve(
            self.parent_url.as_deref(),
            self.database_id.as_deref(),
            self.parent_page_id.as_deref(),
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a Markdown file as a new page (title = file name)
    Upload {
        /// Path to the Markdown file
        file: PathBuf,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Upload inline Markdown text as a new page
    UploadText {
        /// Page title
        title: String,

        /// Markdown content
        #[arg(long)]
        text: String,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Show metadata for an existing page
    Info {
        /// Page id
        page_id: String,
    },

    /// List the child blocks of a page
    List {
        /// Page id
        container_id: String,

        /// Max children to return (the API caps this at 100)
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<String> {
    // One client per process, passed by reference into every call.
    let client = NotionClient::from_env()?;

    match cli.command {
        Commands::Upload { file, target } => {
            let destination = target.resolve()?;
            let page_id = notion_blocks::publish_file(&client, &file, &destination)?;
            Ok(format!(
                "{} uploaded '{}' as page {page_id}",
                "Success:".green().bold(),
                file.display(),
            ))
        }
        Commands::UploadText {
            title,
            text,
            target,
        } => {
            let destination = target.resolve()?;
            let page_id = notion_blocks::publish_text(&client, &text, &title, &destination)?;
            Ok(format!(
                "{} uploaded '{title}' as page {page_id}",
                "Success:".green().bold(),
            ))
        }
        Commands::Info { page_id } => {
            let info = client.page_info(&page_id)?;
            Ok(serde_json::to_string_pretty(&info)?)
        }
        Commands::List {
            container_id,
            limit,
        } => {
            let children = client.list_children(&container_id, limit)?;
            if children.is_empty() {
                return Ok(format!("No children found under {container_id}"));
            }
            let lines: Vec<String> = children
                .iter()
                .enumerate()
                .map(|(i, child)| format!("{:>3}. {}", i + 1, describe_child(child)))
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

/// One-line summary of a child block: its type plus a text snippet when the
/// payload carries rich text.
fn describe_child(child: &Value) -> String {
    let kind = child
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let snippet = child
        .get(kind)
        .and_then(|payload| payload.pointer("/rich_text/0/text/content"))
        .and_then(Value::as_str)
        .unwrap_or("");
    if snippet.is_empty() {
        kind.to_string()
    } else {
        format!("{}  {snippet}", kind.cyan())
    }
}
