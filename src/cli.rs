// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::core::{ApiClient, DashboardConfig};
use crate::derive::{JobFilter, SortKey, VelocityFilter};
use crate::render;
use crate::selection::SelectionSlot;
use crate::types::JobStatus;
use crate::views::overview::ReportExpansion;
use crate::views::{
    load_company_view, load_digest, load_directory, load_feed, load_job_directory, load_overview,
    CompanyView,
};
use crate::web::start_dashboard_server;

#[derive(Parser, Debug)]
#[command(name = "openroles")]
#[command(about = "Hiring intelligence dashboard for frontier AI companies")]
pub struct DashboardCli {
    #[command(subcommand)]
    pub command: DashboardCommand,

    /// Backend base URL, overrides OPENROLES_API_URL and config.yaml
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print the view model as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum DashboardCommand {
    /// Company table, signals and the weekly report
    Dashboard {
        /// Show every trending role and skill
        #[arg(long)]
        expand: bool,
    },
    /// Company directory
    Companies {
        #[arg(long, default_value = "all")]
        velocity: VelocityFilter,
        #[arg(long, default_value = "jobs")]
        sort: SortKey,
    },
    /// Job directory across all companies
    Jobs {
        #[arg(long)]
        search: Option<String>,
        /// Company slug
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        function: Option<String>,
        #[arg(long)]
        status: Option<JobStatus>,
    },
    /// Recent job additions and removals
    Feed {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Weekly digest; 0 is the current week, higher is older
    Digest {
        #[arg(long, default_value_t = 0)]
        week: usize,
        #[arg(long)]
        expand: bool,
    },
    /// Detail panel of one company
    Company {
        slug: String,
        #[arg(long)]
        function: Option<String>,
    },
    /// Read company slugs from stdin; the latest selection wins
    Browse,
    /// Serve the view models over HTTP
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

fn print_view<V>(view: &V, json: bool, text: impl FnOnce(&V) -> String) -> Result<()>
where
    V: Serialize,
{
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(view).context("Failed to serialize view")?
        );
    } else {
        println!("{}", text(view));
    }
    Ok(())
}

pub async fn handle_command(cli: DashboardCli, config: DashboardConfig) -> Result<()> {
    let config = match cli.api_url.as_deref() {
        Some(url) => config.with_api_base_url(url),
        None => config,
    };
    let json = cli.json;
    let connect = || -> Result<ApiClient> {
        let client = ApiClient::new(&config).context("Failed to create API client")?;
        info!("Using backend at {}", client.base_url());
        Ok(client)
    };

    match cli.command {
        DashboardCommand::Dashboard { expand } => {
            let expansion = ReportExpansion {
                roles: expand,
                skills: expand,
            };
            let view = load_overview(&connect()?, expansion).await;
            print_view(&view, json, render::render_overview)
        }
        DashboardCommand::Companies { velocity, sort } => {
            let view = load_directory(&connect()?, velocity, sort).await;
            print_view(&view, json, render::render_directory)
        }
        DashboardCommand::Jobs {
            search,
            company,
            function,
            status,
        } => {
            let filter = JobFilter {
                search,
                company,
                function,
            };
            let view = load_job_directory(&connect()?, &filter, status).await;
            print_view(&view, json, render::render_jobs)
        }
        DashboardCommand::Feed { limit } => {
            let limit = limit.unwrap_or(config.feed_limit);
            let view = load_feed(&connect()?, limit).await;
            print_view(&view, json, render::render_feed)
        }
        DashboardCommand::Digest { week, expand } => {
            let view = load_digest(&connect()?, week, config.history_limit, expand).await;
            print_view(&view, json, render::render_digest)
        }
        DashboardCommand::Company { slug, function } => {
            let client = connect()?;
            let view =
                load_company_view(&client, &slug, function.as_deref(), config.history_limit).await;
            print_view(&view, json, render::render_company)
        }
        DashboardCommand::Browse => browse(connect()?, config.history_limit, json).await,
        DashboardCommand::Serve { port } => {
            let config = match port {
                Some(port) => config.clone().with_port(port),
                None => config.clone(),
            };
            start_dashboard_server(config).await
        }
    }
}

/// Each stdin line selects a company. Fetches run concurrently, and a result
/// is shown only if no later line has been entered meanwhile.
async fn browse(client: ApiClient, history_limit: u32, json: bool) -> Result<()> {
    let client = Arc::new(client);
    let slot: Arc<SelectionSlot<CompanyView>> = Arc::new(SelectionSlot::new());
    let mut in_flight = Vec::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let slug = line.trim().to_string();
        if slug.is_empty() {
            continue;
        }
        if slug == "q" || slug == "quit" {
            break;
        }

        let ticket = slot.select();
        let client = Arc::clone(&client);
        let slot = Arc::clone(&slot);
        in_flight.push(tokio::spawn(async move {
            let view = load_company_view(client.as_ref(), &slug, None, history_limit).await;
            if slot.publish(ticket, view.clone()) {
                if let Err(e) = print_view(&view, json, render::render_company) {
                    warn!("Failed to print {}: {}", slug, e);
                }
            }
        }));
    }

    for handle in in_flight {
        if let Err(e) = handle.await {
            warn!("Selection task failed: {}", e);
        }
    }
    Ok(())
}
