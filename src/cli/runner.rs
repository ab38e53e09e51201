//! CLI runner - executes commands

use crate::auth::Authenticator;
use crate::cli::commands::{Cli, Commands, SearchArgs};
use crate::config::SearchConfig;
use crate::engine::{PaginationEngine, SessionOutcome};
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClient, Transport};
use crate::output::{build_sink, SearchResult};
use crate::query::QuerySet;
use crate::request::RequestRange;
use crate::state::NewestIdStore;
use crate::time::parse_timestamp;
use crate::types::WriteMode;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Config file read when `--config` is not given, if it exists
pub const DEFAULT_CONFIG_PATH: &str = "./config/.config.yaml";

/// Shortest pause between polling cycles
const MIN_POLL_PAUSE: Duration = Duration::from_secs(1);

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = load_config(self.cli.config.as_deref())?;

        match &self.cli.command {
            Commands::Search { args, poll } => self.search(config, args, *poll).await,
            Commands::Poll {
                args,
                interval,
                cycles,
            } => self.poll(config, args, *interval, *cycles).await,
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    async fn search(&self, mut config: SearchConfig, args: &SearchArgs, poll: bool) -> Result<()> {
        apply_overrides(&mut config, args)?;
        let queries = build_queries(args)?;
        let mut range = build_range(args, Utc::now())?;

        let store = NewestIdStore::new(config.newest_id_file());
        if poll {
            if let Some(id) = store.load().await? {
                info!("Retrieving Tweets since ID {id}");
                range = range.resumed_from(id);
            }
        } else if let Some(start) = range.start_time {
            info!("Backfilling Tweets since {start}");
        }

        let engine = build_engine(&config).await?;
        let outcomes = run_queries(&engine, &queries, &range, &config).await?;

        if poll {
            if let Some(id) = newest_of(&outcomes) {
                store.save(&id).await?;
                debug!("Stored newest ID {id} in {}", store.path().display());
            }
        }

        Ok(())
    }

    async fn poll(
        &self,
        mut config: SearchConfig,
        args: &SearchArgs,
        interval_minutes: f64,
        cycles: Option<u32>,
    ) -> Result<()> {
        let interval = Duration::try_from_secs_f64(interval_minutes * 60.0)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or_else(|| {
                Error::invalid_value("interval", "must be a positive number of minutes")
            })?;

        apply_overrides(&mut config, args)?;
        let queries = build_queries(args)?;
        let mut range = build_range(args, Utc::now())?;

        let store = NewestIdStore::new(config.newest_id_file());
        if let Some(id) = store.load().await? {
            info!("Retrieving Tweets since ID {id}");
            range = range.resumed_from(id);
        }

        let engine = build_engine(&config).await?;
        let mut cycle: u32 = 0;

        loop {
            let started = Instant::now();
            cycle += 1;
            info!("Polling cycle {cycle}");

            let outcomes = run_queries(&engine, &queries, &range, &config).await?;
            if let Some(id) = newest_of(&outcomes) {
                store.save(&id).await?;
                range = range.resumed_from(id);
            }

            if cycles.is_some_and(|limit| cycle >= limit) {
                return Ok(());
            }

            let pause = interval
                .saturating_sub(started.elapsed())
                .max(MIN_POLL_PAUSE);
            info!("Next poll in {:.0} seconds", pause.as_secs_f64());
            tokio::time::sleep(pause).await;
        }
    }
}

// ============================================================================
// Session Setup
// ============================================================================

/// Load the given config file, or the default one when present
pub fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    if let Some(path) = path {
        return SearchConfig::from_file(path)
            .with_context(|| format!("Loading config {}", path.display()));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_PATH);
    if default.exists() {
        SearchConfig::from_file(&default)
            .with_context(|| format!("Loading config {}", default.display()))
    } else {
        debug!("No config file, using defaults and environment");
        Ok(SearchConfig::default())
    }
}

/// Fold command-line options into the loaded config
pub fn apply_overrides(config: &mut SearchConfig, args: &SearchArgs) -> Result<()> {
    let options = &mut config.options;
    if let Some(max) = args.max_results {
        options.max_results = Some(max);
    }
    if let Some(exit_after) = args.exit_after {
        options.exit_after = Some(exit_after);
    }
    if let Some(write) = &args.write {
        options.write_mode = Some(write.clone());
    }
    if let Some(out_box) = &args.outbox {
        options.out_box = Some(out_box.clone());
        options.write_mode = Some(WriteMode::Files.as_str().to_string());
    }
    if args.zip {
        options.compress_files = true;
    }
    config.validate()
}

/// Queries named by `--query`, with `--tag` on the first
pub fn build_queries(args: &SearchArgs) -> Result<QuerySet> {
    let mut queries = QuerySet::from_arg(&args.query)?;
    if let Some(tag) = &args.tag {
        queries.tag_first(tag.clone());
    }
    if queries.is_empty() {
        return Err(Error::missing_field("query"));
    }
    Ok(queries)
}

/// Time and ID bounds from the command line
pub fn build_range(args: &SearchArgs, now: DateTime<Utc>) -> Result<RequestRange> {
    let mut range = RequestRange::new();
    if let Some(start) = &args.start_time {
        range = range.with_start_time(parse_timestamp(start, now)?);
    }
    if let Some(end) = &args.end_time {
        range = range.with_end_time(parse_timestamp(end, now)?);
    }
    if let Some(id) = &args.since_id {
        range = range.with_since_id(id.clone());
    }
    if let Some(id) = &args.until_id {
        range = range.with_until_id(id.clone());
    }
    Ok(range)
}

/// Authenticate and assemble the engine
async fn build_engine(config: &SearchConfig) -> Result<PaginationEngine<HttpClient>> {
    let http_config = config.http_config()?;
    let client = http_config.build_client()?;
    let auth = config.resolve_auth()?;
    debug!("Authenticating with {}", auth.kind());
    let authenticator = Authenticator::acquire(auth, &client).await?;
    let transport = HttpClient::from_parts(client, http_config, authenticator)?;

    Ok(PaginationEngine::new(transport, config.parameter_builder())
        .with_config(config.engine_config()?))
}

// ============================================================================
// Running
// ============================================================================

/// Run one session per query, printing accumulated results
pub async fn run_queries<T: Transport>(
    engine: &PaginationEngine<T>,
    queries: &QuerySet,
    range: &RequestRange,
    config: &SearchConfig,
) -> Result<Vec<SessionOutcome>> {
    let mode = config.write_mode()?;
    let output = config.output_config();
    let mut outcomes = Vec::with_capacity(queries.len());

    for query in queries.iter() {
        info!("Searching with query: {}", query.value);
        let mut sink = build_sink(mode, &output)?;
        let outcome = engine.run(query, range, sink.as_mut()).await?;
        if let Some(line) = render_result(&outcome)? {
            println!("{line}");
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// One-line JSON for results held in memory
pub fn render_result(outcome: &SessionOutcome) -> Result<Option<String>> {
    let value = match &outcome.result {
        SearchResult::Emitted => return Ok(None),
        SearchResult::Collected { items, includes } => json!({
            "data": items,
            "includes": includes,
            "newest_id": outcome.newest_id,
        }),
        SearchResult::Serialized { items, includes } => json!({
            "data": serde_json::from_str::<serde_json::Value>(items)?,
            "includes": serde_json::from_str::<serde_json::Value>(includes)?,
            "newest_id": outcome.newest_id,
        }),
    };
    Ok(Some(serde_json::to_string(&value)?))
}

/// Highest newest ID across sessions
///
/// IDs are decimal strings of growing length, so longer wins before
/// lexical order decides.
pub fn newest_of(outcomes: &[SessionOutcome]) -> Option<String> {
    outcomes
        .iter()
        .filter_map(|o| o.newest_id.as_deref())
        .filter(|id| !id.is_empty() && *id != "0")
        .max_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
        .map(ToString::to_string)
}
