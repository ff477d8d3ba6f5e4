//! Domain operations: the query & mutation layer over the relational store.
//!
//! Every operation runs inside a single transaction on the shared
//! [`Database`](crate::storage::Database); failures roll back and surface as
//! [`AppError`](crate::error::AppError) taxonomy members.

pub mod accounts;
pub mod messaging;
pub mod nearby;
pub mod profiles;
pub mod rides;
