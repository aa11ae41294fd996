/* src/core/rust/src/config/tests/mod.rs */

use super::*;
