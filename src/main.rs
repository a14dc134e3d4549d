use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use converge_site::api::{IssueSeverity, RuntimeClient, ValidateRulesResponse, ValidationIssue};
use converge_site::cli::{Cli, Commands, RequestsCommands, SignalsCommands};
use converge_site::config::ConvergeConfig;
use converge_site::pager::{PITCH_TRANSCRIPT, Pager};
use converge_site::rules::{self, ValidationMode};
use converge_site::server::{AppState, RequestStore, run_server};
use converge_site::signals::{ArticleMeta, SignalsStore, Source};
use converge_site::{logging, pager};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.clone());

    let config = ConvergeConfig::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve { port } => {
            let state = Arc::new(AppState::new(config));
            println!(
                "Serving demo-request endpoint on http://localhost:{}",
                port
            );
            run_server(state, port).await?;
            Ok(())
        }
        Commands::Validate {
            file,
            local,
            use_llm,
            json,
        } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read rules from {}", file))?;

            let (response, mode) = if local {
                (rules::local_response(&content), ValidationMode::Local)
            } else {
                let client = RuntimeClient::new(&config);
                rules::validate_with_fallback(&client, &content, use_llm).await?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_validation(&file, &response, mode);
            }

            if response.is_valid {
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
        Commands::Signals { command } => {
            let store = SignalsStore::new(&config);
            match command {
                SignalsCommands::List { json } => {
                    let (index, source) = store.index().await;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&index)?);
                    } else {
                        print_article_list(&index, source);
                    }
                }
                SignalsCommands::Show { slug, json } => {
                    let (article, source) = store
                        .article(&slug)
                        .await
                        .with_context(|| format!("Failed to load article '{}'", slug))?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&article)?);
                    } else {
                        print_article_meta(&article.meta, source);
                        println!("\n{}", article.content);
                    }
                }
            }
            Ok(())
        }
        Commands::Requests { command } => {
            let store = RequestStore::new(&config.data_path);
            match command {
                RequestsCommands::List { json } => {
                    let requests = store.list()?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&requests)?);
                    } else if requests.is_empty() {
                        println!("No demo requests stored.");
                    } else {
                        for request in &requests {
                            println!(
                                "{} {} <{}> {}",
                                request.created_at.format("%Y-%m-%d %H:%M"),
                                request.name.bold(),
                                request.email.cyan(),
                                format!("{}", request.status).yellow()
                            );
                        }
                    }
                }
            }
            Ok(())
        }
        Commands::Health => {
            let client = RuntimeClient::new(&config);
            match client.health().await {
                Ok(health) => println!("{} {}", "health:".bold(), health.status.green()),
                Err(e) => println!("{} {}", "health:".bold(), format!("{}", e).red()),
            }
            match client.ready().await {
                Ok(ready) => {
                    println!("{} {}", "ready: ".bold(), ready.status.green());
                    for (service, status) in &ready.services {
                        println!("  {}: {}", service, status);
                    }
                }
                Err(e) => println!("{} {}", "ready: ".bold(), format!("{}", e).red()),
            }
            Ok(())
        }
        Commands::Pitch { lines } => {
            let viewer = Pager::new(PITCH_TRANSCRIPT, lines);
            pager::run_interactive(viewer, "converge — scripted run")?;
            Ok(())
        }
    }
}

fn print_validation(file: &str, response: &ValidateRulesResponse, mode: ValidationMode) {
    let verdict = if response.is_valid {
        "valid".green().bold()
    } else {
        "invalid".red().bold()
    };
    println!(
        "{} is {} ({} mode, confidence {:.2})",
        file.bold(),
        verdict,
        mode,
        response.confidence
    );

    if response.scenario_count > 0 {
        println!("Scenarios: {}", response.scenario_count);
    }

    for issue in &response.issues {
        print_issue(issue);
    }
}

fn print_issue(issue: &ValidationIssue) {
    let severity = match issue.severity {
        IssueSeverity::Error => "error".red().bold(),
        IssueSeverity::Warning => "warning".yellow(),
        IssueSeverity::Info => "info".dimmed(),
    };
    println!("  {} [{}] {}", severity, issue.location, issue.message);
    if let Some(suggestion) = &issue.suggestion {
        println!("          {}", suggestion.dimmed());
    }
}

fn print_article_list(index: &[ArticleMeta], source: Source) {
    if index.is_empty() {
        println!("No articles found.");
        return;
    }
    for meta in index {
        let featured = if meta.featured { "* " } else { "  " };
        println!(
            "{}{} {} ({} min) {}",
            featured,
            meta.published_at.format("%Y-%m-%d"),
            meta.title.bold(),
            meta.reading_time,
            meta.slug.cyan()
        );
    }
    println!("\n{} articles ({})", index.len(), source);
}

fn print_article_meta(meta: &ArticleMeta, source: Source) {
    println!("{}", meta.title.bold());
    if let Some(subtitle) = &meta.subtitle {
        println!("{}", subtitle.dimmed());
    }
    println!(
        "{} · {} · {} min read · {}",
        meta.author,
        meta.published_at.format("%Y-%m-%d"),
        meta.reading_time,
        source
    );
    if !meta.tags.is_empty() {
        println!("Tags: {}", meta.tags.join(", ").magenta());
    }
}
