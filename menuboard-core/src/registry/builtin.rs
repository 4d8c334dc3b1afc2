//! Built-in unit schemas for the dashboard and the rich menu.

use std::sync::LazyLock;

use regex::Regex;

use super::{FieldDescriptor, UnitConfigRegistry, UnitSchema};
use crate::models::{LayoutContext, UnitSize};

/// Uploaded PDF reference: a bare file name ending in `.pdf`.
static PDF_FILE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\w\-. ]+\.pdf$").expect("PDF_FILE_REGEX is a valid regex pattern")
});

/// Uploaded image reference: a bare file name with an image extension.
static IMAGE_FILE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\w\-. ]+\.(png|jpe?g)$").expect("IMAGE_FILE_REGEX is a valid regex pattern")
});

static COUPON_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9-]{4,16}$").expect("COUPON_CODE_REGEX is a valid regex pattern")
});

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9][0-9\- ]{5,19}$").expect("PHONE_REGEX is a valid regex pattern")
});

/// Maximum characters of a rich-menu button label.
pub const MENU_LABEL_MAX: usize = 20;

const PERIODS: &[&str] = &["day", "week", "month"];

fn menu_label(default: &str) -> FieldDescriptor {
    FieldDescriptor::text("label", "Button label", default)
        .required()
        .max_length(MENU_LABEL_MAX)
}

fn menu_icon() -> FieldDescriptor {
    FieldDescriptor::text("icon", "Icon image", "").pattern(IMAGE_FILE_REGEX.clone())
}

fn section_title(default: &str) -> FieldDescriptor {
    FieldDescriptor::text("title", "Section title", default)
        .required()
        .max_length(40)
}

impl UnitConfigRegistry {
    /// Registry for the given context.
    #[must_use]
    pub fn for_context(context: LayoutContext) -> Self {
        match context {
            LayoutContext::Dashboard => Self::dashboard(),
            LayoutContext::RichMenu => Self::rich_menu(),
        }
    }

    /// Dashboard section types.
    #[must_use]
    pub fn dashboard() -> Self {
        Self::new()
            .with_schema(
                UnitSchema::new("reservation_summary", "Reservation summary")
                    .with_default_size(UnitSize::Full)
                    .field(section_title("Today's reservations"))
                    .field(FieldDescriptor::number("days", "Days ahead", 1.0, 30.0, 7.0))
                    .field(FieldDescriptor::boolean(
                        "show_cancelled",
                        "Show cancelled",
                        false,
                    )),
            )
            .with_schema(
                UnitSchema::new("chat_activity", "Chat activity")
                    .with_default_size(UnitSize::Half)
                    .field(section_title("Chat activity"))
                    .field(FieldDescriptor::select("range", "Range", PERIODS, "week"))
                    .field(FieldDescriptor::boolean(
                        "show_unanswered",
                        "Highlight unanswered",
                        true,
                    )),
            )
            .with_schema(
                UnitSchema::new("sales_chart", "Sales chart")
                    .with_default_size(UnitSize::Half)
                    .field(section_title("Sales"))
                    .field(FieldDescriptor::select(
                        "chart",
                        "Chart type",
                        &["line", "bar", "area"],
                        "line",
                    ))
                    .field(FieldDescriptor::select("period", "Period", PERIODS, "month"))
                    .field(FieldDescriptor::select(
                        "currency",
                        "Currency",
                        &["JPY", "USD", "EUR"],
                        "JPY",
                    )),
            )
            .with_schema(
                UnitSchema::new("recent_reports", "Recent reports")
                    .with_default_size(UnitSize::TwoThirds)
                    .field(section_title("Recent reports"))
                    .field(FieldDescriptor::number("limit", "Rows", 1.0, 50.0, 10.0))
                    .field(FieldDescriptor::select(
                        "category",
                        "Category",
                        &["all", "incident", "feedback", "inventory"],
                        "all",
                    )),
            )
            .with_schema(
                UnitSchema::new("broadcast_stats", "Broadcast stats")
                    .with_default_size(UnitSize::Third)
                    .field(section_title("Broadcasts"))
                    .field(FieldDescriptor::number("limit", "Messages", 1.0, 20.0, 5.0))
                    .field(FieldDescriptor::boolean(
                        "show_open_rate",
                        "Show open rate",
                        true,
                    )),
            )
            .with_schema(
                UnitSchema::new("schedule_calendar", "Schedule calendar")
                    .with_default_size(UnitSize::TwoThirds)
                    .field(section_title("Schedule"))
                    .field(FieldDescriptor::select(
                        "view",
                        "View",
                        &["week", "month"],
                        "week",
                    ))
                    .field(FieldDescriptor::boolean(
                        "show_holidays",
                        "Show holidays",
                        true,
                    )),
            )
            .with_schema(
                UnitSchema::new("notification_feed", "Notification feed")
                    .with_default_size(UnitSize::Third)
                    .field(section_title("Notifications"))
                    .field(FieldDescriptor::number("limit", "Items", 1.0, 50.0, 8.0))
                    .field(FieldDescriptor::boolean("unread_only", "Unread only", false)),
            )
            .with_schema(
                UnitSchema::new("bookmarks", "Bookmarks")
                    .with_default_size(UnitSize::Quarter)
                    .field(section_title("Bookmarks"))
                    .field(FieldDescriptor::number("limit", "Items", 1.0, 30.0, 6.0))
                    .field(FieldDescriptor::textarea("note", "Note", "").max_length(500)),
            )
    }

    /// Rich-menu button types.
    #[must_use]
    pub fn rich_menu() -> Self {
        Self::new()
            .with_schema(
                UnitSchema::new("reserve", "Reservation")
                    .field(menu_label("Reserve"))
                    .field(FieldDescriptor::url("url", "Booking page", "").required())
                    .field(menu_icon()),
            )
            .with_schema(
                UnitSchema::new("chat", "Chat")
                    .field(menu_label("Chat"))
                    .field(
                        FieldDescriptor::textarea(
                            "message",
                            "Message sent on tap",
                            "I have a question",
                        )
                        .required()
                        .max_length(300),
                    )
                    .field(menu_icon()),
            )
            .with_schema(
                UnitSchema::new("menu", "Menu")
                    .field(menu_label("Menu"))
                    .field(
                        FieldDescriptor::text("pdf", "Menu PDF", "")
                            .required()
                            .pattern(PDF_FILE_REGEX.clone()),
                    )
                    .field(menu_icon()),
            )
            .with_schema(
                UnitSchema::new("access", "Access")
                    .field(menu_label("Access"))
                    .field(FieldDescriptor::textarea("address", "Address", "").max_length(200))
                    .field(FieldDescriptor::url("map_url", "Map link", "").required())
                    .field(menu_icon()),
            )
            .with_schema(
                UnitSchema::new("coupon", "Coupon")
                    .field(menu_label("Coupon"))
                    .field(
                        FieldDescriptor::text("code", "Coupon code", "")
                            .required()
                            .pattern(COUPON_CODE_REGEX.clone()),
                    )
                    .field(FieldDescriptor::number(
                        "discount",
                        "Discount (%)",
                        1.0,
                        100.0,
                        10.0,
                    ))
                    .field(menu_icon()),
            )
            .with_schema(
                UnitSchema::new("website", "Website")
                    .field(menu_label("Website"))
                    .field(FieldDescriptor::url("url", "Page", "").required())
                    .field(FieldDescriptor::boolean(
                        "open_external",
                        "Open in external browser",
                        false,
                    ))
                    .field(menu_icon()),
            )
            .with_schema(
                UnitSchema::new("phone", "Phone")
                    .field(menu_label("Call us"))
                    .field(
                        FieldDescriptor::text("number", "Phone number", "")
                            .required()
                            .pattern(PHONE_REGEX.clone()),
                    )
                    .field(menu_icon()),
            )
    }
}
