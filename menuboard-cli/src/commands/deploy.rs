//! Rich-menu deploy command.

use std::path::Path;

use menuboard_core::deploy::{DeployPlan, Deployer};

use crate::cli::ContextArg;
use crate::error::CliError;
use crate::util::{Workspace, create_runtime};

/// Deploy command handler
///
/// Publishes the applied layout; the deploy target decides the context, so
/// `--context` defaults to the rich menu here.
pub fn cmd_deploy(
    config_path: Option<&Path>,
    context: Option<ContextArg>,
    dry_run: bool,
) -> Result<(), CliError> {
    let workspace = Workspace::open(config_path, Some(context.unwrap_or(ContextArg::RichMenu)))?;
    let session = workspace.load_session()?;

    if dry_run {
        let plan = DeployPlan::build(session.applied(), session.registry())?;
        print_plan(&plan);
        return Ok(());
    }

    let deployer = Deployer::new(workspace.repository.clone());
    let runtime = create_runtime()?;
    let payload = runtime.block_on(deployer.deploy(&session))?;
    print_plan(&payload.plan);
    println!(
        "Deployed {} area(s) via {} at {}",
        payload.plan.areas.len(),
        workspace.repository.display_name(),
        payload.deployed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    Ok(())
}

fn print_plan(plan: &DeployPlan) {
    println!(
        "Rich menu {} ({}x{} px):",
        plan.shape_id, plan.width, plan.height
    );
    for area in &plan.areas {
        let label = area
            .config
            .get("label")
            .map(ToString::to_string)
            .unwrap_or_default();
        println!(
            "  {:<10} {:<20} x={:<5} y={:<5} {}x{}",
            area.unit_type.as_str(),
            label,
            area.bounds.x,
            area.bounds.y,
            area.bounds.width,
            area.bounds.height
        );
    }
}
