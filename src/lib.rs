//! Workspace tooling package (pre-commit hooks); the code lives under `crates/`.
