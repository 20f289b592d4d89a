//! Server Module
//!
//! This module contains the code that initializes and configures the Axum
//! HTTP server.
//!
//! # Architecture
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Database connection and migrations
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - SQLite pool setup and migrations
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: `AppConfig::load()` (defaults, TOML file, environment)
//! 2. **Database**: pool creation and migrations
//! 3. **State Creation**: pool, JWT keys and config bundled into `AppState`
//! 4. **Router Creation**: routes, middleware and layers
//!
//! # Example
//!
//! ```rust,no_run
//! use userauths::backend::server::{build_state, create_app};
//! use userauths::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(build_state(AppConfig::load()?).await?);
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Database setup
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::{build_state, create_app, InitError};
pub use state::AppState;
