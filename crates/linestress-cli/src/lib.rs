pub mod cli;

pub use cli::{Cli, Commands, EnvironmentArgs, Grid, InputArgs, OutputFormat};
