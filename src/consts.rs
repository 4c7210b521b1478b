//! Shared constants for the background mode controller.

// ── Storage ─────────────────────────────────────────────────────

/// Storage key holding the explicit user override (`dynamic` / `static`).
pub const MODE_KEY: &str = "aurora-performance-mode";

/// Storage key caching the last applied level. Never read back into a decision.
pub const LEVEL_KEY: &str = "aurora-performance-level";

// ── Markup ──────────────────────────────────────────────────────

pub const CLASS_PERFORMANCE_HIGH: &str = "performance-high";
pub const CLASS_PERFORMANCE_LOW: &str = "performance-low";
pub const CLASS_REDUCE_MOTION: &str = "reduce-motion";

/// Every class the applier owns on the page root.
pub const MANAGED_CLASSES: [&str; 3] = [CLASS_PERFORMANCE_HIGH, CLASS_PERFORMANCE_LOW, CLASS_REDUCE_MOTION];

/// Root attribute carrying the user-facing background mode.
pub const MODE_ATTRIBUTE: &str = "data-background-mode";

/// Tooltip attribute on the toggle control.
pub const TITLE_ATTRIBUTE: &str = "title";

/// Id of the toggle control element.
pub const CONTROL_ID: &str = "switch-background";

// ── Platform ────────────────────────────────────────────────────

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Inclusive screen width range (CSS px) that counts as a touch tablet.
pub const TABLET_MIN_WIDTH: u32 = 768;
pub const TABLET_MAX_WIDTH: u32 = 1024;

// ── Control binding ─────────────────────────────────────────────

pub const RETRY_DELAY_MS: u32 = 200;

/// Delayed lookups after the first one before giving up.
pub const MAX_RETRIES: u32 = 10;

/// Default global path of the toast function, `window.anzhiyu.snackbarShow`.
pub const TOAST_PATH: [&str; 2] = ["anzhiyu", "snackbarShow"];

// ── User-facing text ────────────────────────────────────────────

pub const TITLE_TO_STATIC: &str = "Switch to static mode";
pub const TITLE_TO_DYNAMIC: &str = "Switch to dynamic mode";
pub const SWITCHED_TO_DYNAMIC: &str = "Background switched to dynamic mode";
pub const SWITCHED_TO_STATIC: &str = "Background switched to static mode";
