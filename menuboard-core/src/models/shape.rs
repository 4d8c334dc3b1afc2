//! Container shapes and layout contexts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maximum number of sections on a dashboard.
pub const FREE_LIST_CAPACITY: usize = 12;

/// Rich-menu canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 2500;

/// Canvas height of two-row rich menus.
pub const CANVAS_HEIGHT_LARGE: u32 = 1686;

/// Canvas height of one-row rich menus.
pub const CANVAS_HEIGHT_COMPACT: u32 = 843;

/// Which editor a layout belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutContext {
    /// Dashboard widget sections
    #[default]
    Dashboard,
    /// Rich-menu button grid
    RichMenu,
}

impl LayoutContext {
    /// Returns the wire name of the context.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::RichMenu => "rich-menu",
        }
    }

    /// Shape a fresh layout of this context starts with.
    #[must_use]
    pub const fn default_shape(self) -> ShapeId {
        match self {
            Self::Dashboard => ShapeId::Free,
            Self::RichMenu => ShapeId::Grid2x2,
        }
    }

    /// Shapes available to this context.
    #[must_use]
    pub fn shapes(self) -> Vec<ShapeId> {
        ShapeId::all()
            .iter()
            .copied()
            .filter(|shape| shape.context() == self)
            .collect()
    }
}

impl fmt::Display for LayoutContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "rich-menu" | "richmenu" | "rich_menu" | "menu" => Ok(Self::RichMenu),
            _ => Err(format!("unknown layout context '{s}'")),
        }
    }
}

/// Identifier of a container shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeId {
    /// Unconstrained dashboard list
    #[serde(rename = "free")]
    Free,
    /// One large button
    #[serde(rename = "1x1")]
    Grid1x1,
    /// One row, two buttons
    #[serde(rename = "1x2")]
    Grid1x2,
    /// One row, three buttons
    #[serde(rename = "1x3")]
    Grid1x3,
    /// Two rows, two buttons each
    #[serde(rename = "2x2")]
    Grid2x2,
    /// Two rows, three buttons each
    #[serde(rename = "2x3")]
    Grid2x3,
}

impl ShapeId {
    /// Returns every known shape.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Free,
            Self::Grid1x1,
            Self::Grid1x2,
            Self::Grid1x3,
            Self::Grid2x2,
            Self::Grid2x3,
        ]
    }

    /// Returns the wire name of the shape.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Grid1x1 => "1x1",
            Self::Grid1x2 => "1x2",
            Self::Grid1x3 => "1x3",
            Self::Grid2x2 => "2x2",
            Self::Grid2x3 => "2x3",
        }
    }

    /// Rows and columns of a grid shape.
    #[must_use]
    pub const fn grid(self) -> Option<(u8, u8)> {
        match self {
            Self::Free => None,
            Self::Grid1x1 => Some((1, 1)),
            Self::Grid1x2 => Some((1, 2)),
            Self::Grid1x3 => Some((1, 3)),
            Self::Grid2x2 => Some((2, 2)),
            Self::Grid2x3 => Some((2, 3)),
        }
    }

    /// Returns true for grid shapes.
    #[must_use]
    pub const fn is_grid(self) -> bool {
        self.grid().is_some()
    }

    /// Context this shape belongs to.
    #[must_use]
    pub const fn context(self) -> LayoutContext {
        if self.is_grid() {
            LayoutContext::RichMenu
        } else {
            LayoutContext::Dashboard
        }
    }

    /// Capacity of the shape.
    #[must_use]
    pub const fn max_units(self) -> usize {
        match self.grid() {
            Some((rows, cols)) => rows as usize * cols as usize,
            None => FREE_LIST_CAPACITY,
        }
    }

    /// Expands the identifier into its full shape description.
    #[must_use]
    pub const fn shape(self) -> ContainerShape {
        let (rows, cols) = match self.grid() {
            Some((rows, cols)) => (Some(rows), Some(cols)),
            None => (None, None),
        };
        ContainerShape {
            id: self,
            max_units: self.max_units(),
            rows,
            cols,
        }
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|shape| shape.as_str() == needle)
            .ok_or_else(|| format!("unknown shape '{s}'"))
    }
}

/// Pixel rectangle of a rich-menu area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Structural constraint a layout is arranged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerShape {
    /// Shape identifier
    pub id: ShapeId,
    /// Derived capacity
    pub max_units: usize,
    /// Grid rows, if a grid
    pub rows: Option<u8>,
    /// Grid columns, if a grid
    pub cols: Option<u8>,
}

impl ContainerShape {
    /// Canvas size of a grid shape as `(width, height)`.
    #[must_use]
    pub const fn canvas(&self) -> Option<(u32, u32)> {
        match self.rows {
            Some(1) => Some((CANVAS_WIDTH, CANVAS_HEIGHT_COMPACT)),
            Some(_) => Some((CANVAS_WIDTH, CANVAS_HEIGHT_LARGE)),
            None => None,
        }
    }

    /// Grid cell `(row, col)` of an order slot, filled row-major.
    #[must_use]
    pub fn cell(&self, order: usize) -> Option<(u8, u8)> {
        let (rows, cols) = (self.rows?, self.cols?);
        if order >= self.max_units {
            return None;
        }
        let row = (order / cols as usize) as u8;
        let col = (order % cols as usize) as u8;
        (row < rows).then_some((row, col))
    }

    /// Pixel bounds of an order slot.
    ///
    /// The last row and column absorb the rounding remainder so the cells
    /// tile the canvas exactly.
    #[must_use]
    pub fn cell_bounds(&self, order: usize) -> Option<Bounds> {
        let (row, col) = self.cell(order)?;
        let (rows, cols) = (u32::from(self.rows?), u32::from(self.cols?));
        let (canvas_width, canvas_height) = self.canvas()?;

        let base_width = canvas_width / cols;
        let base_height = canvas_height / rows;
        let x = u32::from(col) * base_width;
        let y = u32::from(row) * base_height;
        let width = if u32::from(col) + 1 == cols {
            canvas_width - x
        } else {
            base_width
        };
        let height = if u32::from(row) + 1 == rows {
            canvas_height - y
        } else {
            base_height
        };

        Some(Bounds {
            x,
            y,
            width,
            height,
        })
    }
}
