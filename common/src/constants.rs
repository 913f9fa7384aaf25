/// Target size of one search chunk in bytes (1 MiB)
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;

/// Board width used when a turn snapshot is created. The event log does not
/// carry board dimensions.
pub const DEFAULT_BOARD_WIDTH: u16 = 10;

/// Board height used when a turn snapshot is created
pub const DEFAULT_BOARD_HEIGHT: u16 = 10;

/// Largest board side; positions are stored as `i16`
pub const MAX_BOARD_DIMENSION: u16 = i16::MAX as u16;

/// Placeholder snake length; per-event logs do not record it
pub const PLACEHOLDER_LENGTH: u32 = 99;

/// Placeholder snake health; per-event logs do not record it
pub const PLACEHOLDER_HEALTH: u32 = 99;

/// Tag namespace written by the snake server in front of `.info.`
pub const DEFAULT_TAG_NAMESPACE: &str = "luasnake";

/// Format of replay key start times, in local time
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
