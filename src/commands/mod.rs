//! Entry points for the presentation layer: loads for screen mount, mutations
//! for user actions. Mutations return the resulting record or a `CommandError`.

pub mod chat;
pub mod planner;
pub mod profile;
pub mod suggestions;
pub mod theme;
