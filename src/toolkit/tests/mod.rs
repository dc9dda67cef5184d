//! Toolkit tests
//!
//! Covers the headless toolkit:
//! - Catalog lookups and aliases
//! - Id index, containers, grids and selection widgets
//! - Click simulation and snapshots
