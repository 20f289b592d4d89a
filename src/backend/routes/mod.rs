//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation and layers
//! └── api_routes.rs   - /api/v1 endpoints
//! ```
//!
//! # API Routes
//!
//! - `POST /api/v1/user/token/` - Login
//! - `POST /api/v1/user/token/refresh/` - Refresh access token
//! - `POST /api/v1/user/register/` - Registration
//! - `GET /api/v1/user/password-reset/{email}/` - Start password reset
//! - `POST /api/v1/user/password-change/` - Finish password reset
//! - `GET|PATCH /api/v1/user/profile/` - Profile (requires authentication)
//!
//! Anything else gets a JSON 404.

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
