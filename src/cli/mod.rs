//! Terminal helpers shared by the `qada_cli` binary.

pub mod output;
