//! camp - virtualenvs and a shared wheelhouse for sibling Python packages
//!
//! Discovers every package (a directory holding both `setup.py` and
//! `requirements.txt`) directly under a workspace root, gives each one its
//! own virtualenv, builds the union of their requirements into a shared
//! wheelhouse and installs every package's requirements from it offline.

pub mod cli;
pub mod config;
pub mod error;
pub mod orchestration;
pub mod ui;
pub mod workspace;

pub use error::{CampError, CampResult};
