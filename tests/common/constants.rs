//! Shared constants for end-to-end tests
//!
//! When the seeded test catalog changes, update only this file.
#![allow(dead_code)]

// ============================================================================
// Authentication
// ============================================================================

/// Key the test server expects in `x-api-key`
pub const TEST_API_KEY: &str = "test-api-key";

// ============================================================================
// Seeded Plants (ids follow insertion order)
// ============================================================================

pub const TULIP_ID: i64 = 1;
pub const TULIP_NAME_EN: &str = "Tulip";
pub const TULIP_NAME_JA: &str = "チューリップ";
pub const TULIP_BOTANICAL: &str = "Tulipa gesneriana";
pub const TULIP_IMAGE: &str = "tulip.jpg";
pub const TULIP_DATE: &str = "2023-04-10";

pub const ROSE_ID: i64 = 2;
pub const ROSE_NAME_EN: &str = "Rose";
pub const ROSE_NAME_JA: &str = "バラ";
pub const ROSE_BOTANICAL: &str = "Rosa chinensis";
pub const ROSE_IMAGE: &str = "rose.jpg";
pub const ROSE_DATE: &str = "2022-06-01";

pub const SUNFLOWER_ID: i64 = 3;
pub const SUNFLOWER_NAME_EN: &str = "Sunflower";
pub const SUNFLOWER_NAME_JA: &str = "ヒマワリ";
pub const SUNFLOWER_BOTANICAL: &str = "Helianthus annuus";
pub const SUNFLOWER_IMAGE: &str = "sunflower.jpg";
pub const SUNFLOWER_DATE: &str = "2024-08-15";

pub const SEEDED_PLANT_COUNT: usize = 3;

// ============================================================================
// Seeded Lookups
// ============================================================================

pub const LILIACEAE_EN: &str = "Liliaceae";
pub const LILIACEAE_JA: &str = "ユリ科";
pub const ROSACEAE_EN: &str = "Rosaceae";
pub const ROSACEAE_JA: &str = "バラ科";
pub const ASTERACEAE_EN: &str = "Asteraceae";
pub const ASTERACEAE_JA: &str = "キク科";

pub const FRONT_GARDEN_EN: &str = "Front garden";
pub const FRONT_GARDEN_JA: &str = "前庭";
pub const BALCONY_EN: &str = "Balcony";
pub const BALCONY_JA: &str = "ベランダ";

// ============================================================================
// Uploads
// ============================================================================

/// Bytes of the image file placed in the upload directory as `TULIP_IMAGE`
pub const TEST_IMAGE_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0not really a jpeg\xFF\xD9";

pub const UPLOADS_CACHE_AGE_SEC: usize = 60;

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
