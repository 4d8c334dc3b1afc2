//! Rich-menu deployment
//!
//! Saving a preset stores configuration for later; deploying publishes the
//! applied rich-menu layout to the live channel. The two never share a
//! repository call.
//!
//! A [`DeployPlan`] maps every visible unit onto the pixel bounds of its
//! grid cell. Hidden units leave their cell empty.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::error::{DeployError, DeployResult};
use crate::layout::LayoutModel;
use crate::models::{Bounds, LayoutContext, ShapeId, UnitConfig, UnitId, UnitType};
use crate::registry::UnitConfigRegistry;
use crate::repository::LayoutRepository;
use crate::session::LayoutEditorSession;
use crate::tracing::span_names;
use crate::trace_operation;

/// One tappable area of the published menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuArea {
    /// Unit the area came from
    pub unit_id: UnitId,
    /// Pixel rectangle on the canvas
    pub bounds: Bounds,
    /// Button type
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    /// Validated button config
    pub config: UnitConfig,
}

/// Validated, positioned rich-menu layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployPlan {
    /// Grid shape
    pub shape_id: ShapeId,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Areas of the visible units, in order
    pub areas: Vec<MenuArea>,
}

impl DeployPlan {
    /// Validates `layout` and computes its menu areas.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::NotAGrid` for free-list layouts and
    /// `DeployError::NotReady` with every violation of every visible unit.
    pub fn build(layout: &LayoutModel, registry: &UnitConfigRegistry) -> DeployResult<Self> {
        let shape = layout.shape();
        let Some((width, height)) = shape.canvas() else {
            return Err(DeployError::NotAGrid(layout.shape_id()));
        };

        let violations: Vec<_> = layout
            .visible_units()
            .flat_map(|unit| {
                registry
                    .validate(&unit.unit_type, &unit.config)
                    .into_iter()
                    .map(|v| (unit.id.clone(), v))
            })
            .collect();
        if !violations.is_empty() {
            return Err(DeployError::NotReady(violations));
        }

        let areas = layout
            .visible_units()
            .filter_map(|unit| {
                shape.cell_bounds(unit.order).map(|bounds| MenuArea {
                    unit_id: unit.id.clone(),
                    bounds,
                    unit_type: unit.unit_type.clone(),
                    config: unit.config.clone(),
                })
            })
            .collect();

        Ok(Self {
            shape_id: layout.shape_id(),
            width,
            height,
            areas,
        })
    }
}

/// What the repository publishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployPayload {
    /// Positioned layout
    #[serde(flatten)]
    pub plan: DeployPlan,
    /// When the deploy was requested
    pub deployed_at: DateTime<Utc>,
}

impl DeployPayload {
    /// Stamps a plan with the current time.
    #[must_use]
    pub fn new(plan: DeployPlan) -> Self {
        Self {
            plan,
            deployed_at: Utc::now(),
        }
    }
}

/// Publishes applied rich-menu layouts through a repository.
pub struct Deployer {
    repository: Arc<dyn LayoutRepository>,
}

impl Deployer {
    /// Creates a deployer.
    #[must_use]
    pub fn new(repository: Arc<dyn LayoutRepository>) -> Self {
        Self { repository }
    }

    /// Deploys the session's applied layout. A pending working copy is
    /// never deployed.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::UnsupportedContext` outside the rich menu, the
    /// [`DeployPlan::build`] errors, or `DeployError::Persistence` if the
    /// repository fails.
    pub async fn deploy(&self, session: &LayoutEditorSession) -> DeployResult<DeployPayload> {
        if session.context() != LayoutContext::RichMenu {
            return Err(DeployError::UnsupportedContext(session.context()));
        }
        if session.is_dirty() {
            tracing::info!("Deploying applied layout; unapplied edits are not included");
        }

        let plan = DeployPlan::build(session.applied(), session.registry())?;
        let payload = DeployPayload::new(plan);
        let span = trace_operation!(
            span_names::MENU_DEPLOY,
            shape = %payload.plan.shape_id,
            areas = payload.plan.areas.len(),
            backend = self.repository.backend_id()
        );
        self.repository.deploy(&payload).instrument(span).await?;
        tracing::info!(areas = payload.plan.areas.len(), "Deployed rich menu");
        Ok(payload)
    }
}
