mod common;
mod registry;
mod wizard;
