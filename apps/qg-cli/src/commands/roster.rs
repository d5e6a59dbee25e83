// roster.rs — Roster subcommands: add, list, show, reinstate.
//
// `reinstate` is the explicit manual counterpart to the sweep's block:
// nothing in the engine ever reactivates an agent automatically.

use chrono::Utc;
use clap::Subcommand;
use uuid::Uuid;

use qg_directory::{AgentRecord, Directory, FileDirectory};

use crate::commands::parse_id;
use crate::config::EngineConfig;

#[derive(Subcommand)]
pub enum RosterCommands {
    /// Add an agent to the roster.
    Add {
        /// Display name.
        name: String,
        /// Free-text role name (e.g., "sales_rep", "Account Executive").
        #[arg(long)]
        role: String,
        /// Tenant ID (a fresh one is generated when omitted).
        #[arg(long)]
        tenant: Option<String>,
        /// Mark the agent as a tenant admin (exempt from sweeps).
        #[arg(long)]
        tenant_admin: bool,
    },
    /// List all agents.
    List,
    /// Show one agent, metadata included.
    Show {
        /// Agent ID.
        id: String,
    },
    /// Reinstate a blocked agent.
    Reinstate {
        /// Agent ID.
        id: String,
    },
}

pub fn execute(cmd: &RosterCommands, config: &EngineConfig) -> anyhow::Result<()> {
    let directory = FileDirectory::new(&config.roster_dir)?;

    match cmd {
        RosterCommands::Add {
            name,
            role,
            tenant,
            tenant_admin,
        } => add_agent(&directory, name, role, tenant.as_deref(), *tenant_admin),
        RosterCommands::List => list_agents(&directory),
        RosterCommands::Show { id } => show_agent(&directory, id),
        RosterCommands::Reinstate { id } => reinstate_agent(&directory, id),
    }
}

fn add_agent(
    directory: &FileDirectory,
    name: &str,
    role: &str,
    tenant: Option<&str>,
    tenant_admin: bool,
) -> anyhow::Result<()> {
    let tenant_id = match tenant {
        Some(t) => parse_id(t)?,
        None => Uuid::new_v4(),
    };

    let mut agent = AgentRecord::new(tenant_id, name, role);
    agent.tenant_admin = tenant_admin;
    directory.update(&agent)?;

    println!("Agent added: {}", agent.agent_id);
    println!("  Name:   {}", agent.display_name);
    println!("  Role:   {}", agent.role);
    println!("  Tenant: {}", agent.tenant_id);
    if agent.sales_role().is_none() {
        println!("  Note: role is not quota-carrying; sweeps will skip this agent.");
    }

    Ok(())
}

fn list_agents(directory: &FileDirectory) -> anyhow::Result<()> {
    let agents = directory.list()?;

    if agents.is_empty() {
        println!("No agents found.");
        return Ok(());
    }

    println!(
        "{:<38} {:<20} {:<20} {:<8}",
        "ID", "NAME", "ROLE", "ACTIVE"
    );
    println!("{}", "-".repeat(88));

    for a in &agents {
        println!(
            "{:<38} {:<20} {:<20} {:<8}",
            a.agent_id,
            a.display_name,
            a.role,
            if a.active { "yes" } else { "no" },
        );
    }
    println!("\n{} agent(s) total.", agents.len());

    Ok(())
}

fn show_agent(directory: &FileDirectory, id: &str) -> anyhow::Result<()> {
    let agent_id = parse_id(id)?;
    match directory.get(agent_id)? {
        Some(a) => {
            println!("Agent:   {}", a.agent_id);
            println!("Name:    {}", a.display_name);
            println!("Role:    {}", a.role);
            println!("Tenant:  {}", a.tenant_id);
            println!("Active:  {}", a.active);
            println!("Admin:   {}", a.is_admin_tier());
            if !a.metadata.is_empty() {
                println!("Metadata:");
                for (key, value) in &a.metadata {
                    println!("  {}: {}", key, value);
                }
            }
        }
        None => {
            eprintln!("Agent not found: {}", id);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn reinstate_agent(directory: &FileDirectory, id: &str) -> anyhow::Result<()> {
    let agent_id = parse_id(id)?;
    let agent = directory.reinstate(agent_id, Utc::now())?;
    println!("Agent reinstated: {} ({})", agent.agent_id, agent.display_name);
    Ok(())
}
