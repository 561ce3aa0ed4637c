pub const APP_NAME: &str = "blockbind";

/// Environment variable naming an extra block type definition file.
pub const BLOCK_TYPES_ENV: &str = "BLOCKBIND_BLOCK_TYPES";

/// Key under a block's `metadata` attribute holding its binding declaration.
pub const BINDINGS_KEY: &str = "bindings";

pub const METADATA_KEY: &str = "metadata";
