// Application layer: what the CLI binary runs on top of the client.

pub mod commands;
