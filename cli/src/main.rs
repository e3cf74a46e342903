//! CLI entrypoint for squadron
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use squadron_application::{
    AgentEventSink, AgentNode, AgentRoster, AutoApproveConfirmation, AutoRejectConfirmation,
    Brain, BrainConfig, Delegator, ExternalToolSource, FanoutEvents, LanguageModel, MemoryPort,
    SafetyConfirmationPort, SafetySwitch,
};
use squadron_domain::AgentProfile;
use squadron_infrastructure::{
    ConfigLoader, ConfirmMode, FileConfig, InMemoryRecall, JsonlAgentEventLog, McpBridge,
    McpToolSource, OpenAiCompatibleModel, builtin_tools,
};
use squadron_presentation::{
    Cli, Command, ConsoleAgentEvents, ConsoleFormatter, InteractiveConfirmation,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create log directory {}", dir.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    for issue in config.validate() {
        warn!("Config: {}", issue);
    }
    Ok(config)
}

/// Everything the agents share.
struct Services {
    model: Arc<dyn LanguageModel>,
    brain_config: BrainConfig,
    safety: SafetySwitch,
    confirmation: Arc<dyn SafetyConfirmationPort>,
    tool_source: Option<Arc<dyn ExternalToolSource>>,
    builtin_tools: bool,
    events: Arc<dyn AgentEventSink>,
    memory: Arc<dyn MemoryPort>,
}

impl Services {
    fn new(cli: &Cli, config: &FileConfig) -> Result<Self> {
        let model: Arc<dyn LanguageModel> = Arc::new(
            OpenAiCompatibleModel::from_config(&config.model)
                .context("Failed to create language model client")?,
        );

        let confirmation: Arc<dyn SafetyConfirmationPort> = match config.safety.confirm {
            ConfirmMode::Interactive => Arc::new(InteractiveConfirmation::new()),
            ConfirmMode::AutoReject => Arc::new(AutoRejectConfirmation),
            ConfirmMode::AutoApprove => Arc::new(AutoApproveConfirmation),
        };

        let safety = SafetySwitch::new(config.safety.enabled && !cli.god_mode);
        if !safety.is_enabled() {
            warn!("Safety mode is OFF: hazardous tools run without confirmation");
        }

        // One bridge for every brain, so discovered handles are shared
        let tool_source: Option<Arc<dyn ExternalToolSource>> = if config.mcp.servers.is_empty() {
            None
        } else {
            Some(Arc::new(McpToolSource::new(
                Arc::new(McpBridge::new()),
                config.mcp.servers.clone(),
            )))
        };

        let mut events = FanoutEvents::new(vec![Arc::new(ConsoleAgentEvents::new())]);
        if let Some(path) = &cli.events_file {
            match JsonlAgentEventLog::new(path) {
                Some(log) => events.push(Arc::new(log)),
                None => warn!("Agent events will not be logged to {}", path.display()),
            }
        }

        Ok(Self {
            model,
            brain_config: config.brain_config(),
            safety,
            confirmation,
            tool_source,
            builtin_tools: config.builtin_tools.enabled,
            events: Arc::new(events),
            memory: Arc::new(InMemoryRecall::new()),
        })
    }

    fn brain(&self) -> Brain {
        let mut brain = Brain::new(self.model.clone())
            .with_config(self.brain_config.clone())
            .with_safety_switch(self.safety.clone())
            .with_confirmation(self.confirmation.clone());
        if self.builtin_tools {
            brain = brain.with_tools(builtin_tools());
        }
        if let Some(source) = &self.tool_source {
            brain = brain.with_tool_source(source.clone());
        }
        brain
    }

    fn agent(&self, profile: AgentProfile) -> AgentNode {
        AgentNode::new(profile, self.brain())
            .with_events(self.events.clone())
            .with_memory(self.memory.clone())
    }

    fn roster(&self, profiles: Vec<AgentProfile>) -> AgentRoster {
        profiles
            .into_iter()
            .fold(AgentRoster::new(), |roster, profile| {
                roster.with_agent(self.agent(profile))
            })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting squadron");

    if cli.command == Command::Config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = load_config(&cli)?;

    // === Dependency Injection ===
    let services = Services::new(&cli, &config)?;
    let profiles = config.agent_profiles();

    match &cli.command {
        Command::Ask { agent, .. } => {
            let task = cli.command.task_text().unwrap_or_default();
            let delegator = Delegator::new(Arc::new(services.roster(profiles)));
            let result = delegator.assign_task(agent, &task, None).await;
            println!("{}", ConsoleFormatter::format_result(agent, &result));
        }
        Command::Handoff { from, to, notes, .. } => {
            let task = cli.command.task_text().unwrap_or_default();
            let delegator = Delegator::new(Arc::new(services.roster(profiles)));
            let result = delegator
                .handoff_task(from, to, &task, notes.as_deref())
                .await;
            println!("{}", ConsoleFormatter::format_result(to, &result));
        }
        Command::Agents => {
            let delegator = Delegator::new(Arc::new(services.roster(profiles.clone())));
            println!(
                "{}",
                ConsoleFormatter::format_agents(&profiles, &delegator.statuses())
            );
        }
        Command::Tools => {
            let brain = services.brain();
            brain.ensure_external_tools().await;
            println!(
                "{}",
                ConsoleFormatter::format_tools(&brain.tool_definitions())
            );
        }
        // Printed before configuration is loaded
        Command::Config => {}
    }

    Ok(())
}
